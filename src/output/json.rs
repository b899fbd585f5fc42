//! JSON envelope for machine-readable CLI output.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

use crate::clipper::BatchReport;

/// Version of the JSON envelope format.
pub const SPEC_VERSION: &str = "1.0";

/// JSON envelope wrapping CLI output events.
#[derive(Debug, Serialize)]
pub struct JsonEnvelope<T> {
    /// API specification version.
    pub spec_version: String,
    /// Event timestamp.
    pub timestamp: DateTime<Utc>,
    /// Event type.
    pub event: EventType,
    /// Event-specific payload.
    pub payload: T,
}

impl<T: Serialize> JsonEnvelope<T> {
    /// Create a new envelope with the current timestamp.
    pub fn new(event: EventType, payload: T) -> Self {
        Self {
            spec_version: SPEC_VERSION.to_string(),
            timestamp: Utc::now(),
            event,
            payload,
        }
    }
}

/// Event types for JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Final result.
    Result,
    /// Fatal error.
    Error,
}

/// Result type discriminator for result payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    /// Clip extraction results.
    ClipExtraction,
}

/// Payload for a finished batch.
#[derive(Debug, Serialize)]
pub struct ClipExtractionPayload<'a> {
    /// Result discriminator.
    pub result_type: ResultType,
    /// Source folder that was searched.
    pub source_dir: PathBuf,
    /// Output folder.
    pub output_dir: PathBuf,
    /// Batch counts, manifest path and entries.
    #[serde(flatten)]
    pub report: &'a BatchReport,
}

/// Payload for a fatal error.
#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    /// Error message, including its causes.
    pub message: String,
}

/// Serialize a payload in an envelope and print it on stdout.
pub fn emit_json<T: Serialize>(event: EventType, payload: &T) {
    let envelope = JsonEnvelope::new(event, payload);
    match serde_json::to_string(&envelope) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            // Log to stderr so it doesn't corrupt JSON output stream
            eprintln!("error: failed to serialize JSON result: {e}");
        }
    }
}

/// Emit a result envelope.
pub fn emit_json_result<T: Serialize>(payload: &T) {
    emit_json(EventType::Result, payload);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let report = BatchReport::default();
        let payload = ClipExtractionPayload {
            result_type: ResultType::ClipExtraction,
            source_dir: PathBuf::from("videos"),
            output_dir: PathBuf::from("out"),
            report: &report,
        };
        let envelope = JsonEnvelope::new(EventType::Result, &payload);
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["spec_version"], "1.0");
        assert_eq!(value["event"], "result");
        assert_eq!(value["payload"]["result_type"], "clip_extraction");
        assert_eq!(value["payload"]["clips_extracted"], 0);
        assert!(value["payload"]["manifest"].as_array().unwrap().is_empty());
    }
}
