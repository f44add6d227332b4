use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Keyword flags worth reporting; anything else passed as a flag is dropped.
pub const KNOWN_FLAGS: &[&str] = &["is_report"];

/// One public API call, as shipped to a telemetry sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiEvent {
    pub action: String,
    pub feature: Option<String>,
    pub args: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<Map<String, Value>>,
    pub timestamp: DateTime<Utc>,
    pub total_runtime: f64,
}

impl ApiEvent {
    pub fn new(
        action: &str,
        feature: Option<&str>,
        args: Map<String, Value>,
        flags: &[(&str, Value)],
        total_runtime: f64,
    ) -> Self {
        let known: Map<String, Value> = flags
            .iter()
            .filter(|(k, _)| KNOWN_FLAGS.contains(k))
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();

        Self {
            action: action.to_string(),
            feature: feature.map(str::to_string),
            args,
            flags: if known.is_empty() { None } else { Some(known) },
            timestamp: Utc::now(),
            total_runtime,
        }
    }
}
