//! Video clip extraction from sidecar clip lists.
//!
//! This module discovers `.clips` definition files, parses their clip
//! records, resolves the matching source videos, cuts each clip with an
//! external transcoder and records the results in a manifest.

pub mod batch;
pub mod command;
mod extractor;
mod manifest;
mod parser;
mod resolver;
mod template;
mod timestamp;

pub use batch::{BatchReport, ExtractConfig, run_batch};
pub use extractor::{ExtractionJob, ExtractionOptions, FfmpegTranscoder, Transcoder};
pub use manifest::{Manifest, ManifestEntry};
pub use parser::{ClipRecord, ParsedLine, parse_clip_line, parse_definition_file};
pub use resolver::{discover_definition_files, find_source_video, is_definition_file};
pub use template::{NamePattern, output_path_for, sanitize_clip_name, unique_output_path};
pub use timestamp::Timestamp;
