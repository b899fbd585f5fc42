//! Progress display and machine-readable output.

pub mod json;
pub mod progress;

pub use json::{
    ClipExtractionPayload, ErrorPayload, EventType, ResultType, emit_json, emit_json_result,
};
