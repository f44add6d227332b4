use crate::telemetry::{ApiEvent, TelemetrySink};
use std::sync::{Arc, Mutex, PoisonError};

/// Keeps every event in memory; clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<ApiEvent>>>,
}

impl MemorySink {
    pub fn events(&self) -> Vec<ApiEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl TelemetrySink for MemorySink {
    fn log_api(&self, event: &ApiEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
