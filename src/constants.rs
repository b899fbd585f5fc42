//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "vidclip";

/// Configuration file name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV_VAR: &str = "VIDCLIP_CONFIG";

/// Default naming pattern for extracted clips.
pub const DEFAULT_NAME_PATTERN: &str = "{name}.mp4";

/// File name of the manifest written to the output directory.
pub const MANIFEST_FILE_NAME: &str = "manifest.txt";

/// Default transcoder executable (looked up on `PATH`).
pub const DEFAULT_FFMPEG: &str = "ffmpeg";

/// Clip definition and source resolution constants.
pub mod definitions {
    /// Extension (without dot) identifying clip definition files.
    pub const EXTENSION: &str = "clips";

    /// Video extensions tried, in order, when resolving the source of a
    /// definition file.
    pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "MP4", "mov", "MOV"];
}

/// Output naming constants.
pub mod naming {
    /// Placeholder for the source file stem.
    pub const SOURCE: &str = "{source}";
    /// Placeholder for the clip name.
    pub const NAME: &str = "{name}";
    /// Placeholder for the clip start time, verbatim.
    pub const START_TIME: &str = "{start_time}";
    /// Placeholder for the clip end time, verbatim.
    pub const END_TIME: &str = "{end_time}";

    /// Width of the zero-padded collision suffix (`_001`).
    pub const COLLISION_SUFFIX_WIDTH: usize = 3;
}

/// Transcoder invocation constants.
pub mod extraction {
    /// Seconds added past the nominal end of every clip so encoder
    /// granularity does not truncate it.
    pub const END_PADDING_SECS: u64 = 1;

    /// Number of trailing stderr lines kept in extraction errors.
    pub const STDERR_TAIL_LINES: usize = 5;
}
