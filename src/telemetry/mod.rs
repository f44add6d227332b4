//! Usage telemetry for the public entry points.
//!
//! Telemetry never changes the outcome of the wrapped call: events are
//! emitted after the call returns and sinks cannot fail.

mod event;
mod sink;

pub use event::{ApiEvent, KNOWN_FLAGS};
pub use sink::{TelemetrySink, TracingSink};

use serde_json::{Map, Value};
use std::time::Instant;

pub const TELEMETRY_ENV: &str = "MODELEVAL_TELEMETRY";

pub struct Telemetry {
    sink: Box<dyn TelemetrySink>,
    enabled: bool,
}

impl Telemetry {
    pub fn new(sink: Box<dyn TelemetrySink>) -> Self {
        Self {
            sink,
            enabled: true,
        }
    }

    pub fn disabled() -> Self {
        Self {
            sink: Box::new(TracingSink),
            enabled: false,
        }
    }

    /// Tracing-backed telemetry, switched off when `MODELEVAL_TELEMETRY`
    /// is `0`, `false`, `no` or `off`.
    pub fn from_env() -> Self {
        let value = std::env::var(TELEMETRY_ENV).ok();
        Self {
            sink: Box::new(TracingSink),
            enabled: enabled_from(value.as_deref()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Runs `f` and reports it as `action` once it returns.
    pub fn log_call<T>(
        &self,
        action: &str,
        feature: Option<&str>,
        args: Map<String, Value>,
        flags: &[(&str, Value)],
        f: impl FnOnce() -> T,
    ) -> T {
        let start = Instant::now();
        let out = f();
        if self.enabled {
            let event = ApiEvent::new(action, feature, args, flags, start.elapsed().as_secs_f64());
            self.sink.log_api(&event);
        }
        out
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::from_env()
    }
}

fn enabled_from(value: Option<&str>) -> bool {
    match value.map(|v| v.trim().to_ascii_lowercase()) {
        Some(v) => !matches!(v.as_str(), "0" | "false" | "no" | "off"),
        None => true,
    }
}
