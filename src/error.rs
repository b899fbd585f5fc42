//! Error types for vidclip.

use std::path::PathBuf;

/// Result type alias for vidclip operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for vidclip.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Internal error (for unexpected failures).
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },

    // Format errors
    /// Timestamp is not in `MM:SS` form.
    #[error("invalid timestamp '{value}': {reason}")]
    InvalidTimestamp {
        /// The offending text.
        value: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// Clip definition line does not have exactly three fields.
    #[error("invalid clip line '{line}': expected '<name> <MM:SS> <MM:SS>', got {fields} field(s)")]
    InvalidClipLine {
        /// The offending line.
        line: String,
        /// Number of space-separated fields found.
        fields: usize,
    },

    /// Clip ends before it starts.
    #[error("clip '{name}' ends ({end}) before it starts ({start})")]
    InvalidClipRange {
        /// Clip name.
        name: String,
        /// Start timestamp as written.
        start: String,
        /// End timestamp as written.
        end: String,
    },

    // Resolution errors
    /// Failed to read a definition file.
    #[error("failed to read definition file '{path}'")]
    DefinitionRead {
        /// Path to the definition file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// No video file matches the definition file.
    #[error("no source video found for definition file '{definition_path}' (tried: {tried})")]
    SourceVideoNotFound {
        /// Path to the definition file.
        definition_path: PathBuf,
        /// Comma-separated candidate file names that were tried.
        tried: String,
    },

    // Extraction errors
    /// The transcoder failed or produced no output.
    #[error("failed to extract '{output_path}': {reason}")]
    ExtractionFailed {
        /// Output file that should have been written.
        output_path: PathBuf,
        /// Description of the failure (exit status, stderr tail).
        reason: String,
    },

    // Environment errors
    /// Source directory does not exist or is not a directory.
    #[error("source directory not found: {path}")]
    SourceDirNotFound {
        /// Path to the source directory.
        path: PathBuf,
    },

    /// Failed to list a directory while discovering definition files.
    #[error("failed to read directory '{path}'")]
    DirectoryRead {
        /// Path to the directory.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreateFailed {
        /// Path to the output directory.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the manifest file.
    #[error("failed to write manifest '{path}'")]
    ManifestWrite {
        /// Path to the manifest file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Whether this error only invalidates a single definition line.
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTimestamp { .. } | Self::InvalidClipLine { .. } | Self::InvalidClipRange { .. }
        )
    }
}
