use crate::telemetry::ApiEvent;
use tracing::{info, warn};

/// Destination of telemetry events.
pub trait TelemetrySink {
    fn log_api(&self, event: &ApiEvent);
}

/// Emits every event as a structured `tracing` record.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TelemetrySink for TracingSink {
    fn log_api(&self, event: &ApiEvent) {
        match serde_json::to_string(event) {
            Ok(metadata) => info!(
                target: "modeleval::telemetry",
                action = %event.action,
                runtime = event.total_runtime,
                %metadata,
                "api call"
            ),
            Err(e) => warn!(target: "modeleval::telemetry", action = %event.action, "unserializable event: {e}"),
        }
    }
}
