//! Configuration type definitions.

use crate::constants::{DEFAULT_FFMPEG, DEFAULT_NAME_PATTERN, definitions};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default extraction settings.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Definition file and source video lookup.
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// External transcoder settings.
    #[serde(default)]
    pub transcoder: TranscoderConfig,
}

/// Default extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Output file naming pattern.
    pub name_pattern: String,

    /// Encoding mode.
    pub encoding: EncodingMode,

    /// Replace filesystem-unsafe characters in clip names.
    pub sanitize_names: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            name_pattern: DEFAULT_NAME_PATTERN.to_string(),
            encoding: EncodingMode::default(),
            sanitize_names: true,
        }
    }
}

/// Definition file and source video lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Extension of clip definition files, without the dot.
    pub definition_extension: String,

    /// Video extensions tried in order, without the dot.
    pub video_extensions: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            definition_extension: definitions::EXTENSION.to_string(),
            video_extensions: definitions::VIDEO_EXTENSIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// External transcoder settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscoderConfig {
    /// Path to (or name of) the ffmpeg executable.
    pub ffmpeg_path: PathBuf,
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from(DEFAULT_FFMPEG),
        }
    }
}

/// How clips are encoded.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum EncodingMode {
    /// Copy the video and audio streams. Fast, but cuts land on keyframes
    /// and the result may not play everywhere.
    CopyCodecs,
    /// Re-encode. Slower, frame-accurate.
    #[default]
    ReEncode,
}

impl std::fmt::Display for EncodingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CopyCodecs => write!(f, "copy-codecs"),
            Self::ReEncode => write!(f, "re-encode"),
        }
    }
}

impl std::str::FromStr for EncodingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "copy-codecs" | "copy" => Ok(Self::CopyCodecs),
            "re-encode" | "reencode" => Ok(Self::ReEncode),
            other => Err(format!("unknown encoding mode: {other}")),
        }
    }
}

/// How results are reported on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputMode {
    /// Log lines and progress bars.
    #[default]
    Human,
    /// A single JSON result envelope.
    Json,
}

impl OutputMode {
    /// Whether output is machine-readable.
    #[must_use]
    pub fn is_structured(self) -> bool {
        matches!(self, Self::Json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_mode_from_str() {
        assert_eq!(
            "copy-codecs".parse::<EncodingMode>().ok(),
            Some(EncodingMode::CopyCodecs)
        );
        assert_eq!(
            "Re-Encode".parse::<EncodingMode>().ok(),
            Some(EncodingMode::ReEncode)
        );
        assert!("fast".parse::<EncodingMode>().is_err());
    }

    #[test]
    fn test_encoding_mode_display() {
        assert_eq!(EncodingMode::CopyCodecs.to_string(), "copy-codecs");
        assert_eq!(EncodingMode::ReEncode.to_string(), "re-encode");
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.defaults.name_pattern, "{name}.mp4");
        assert_eq!(config.defaults.encoding, EncodingMode::ReEncode);
        assert!(config.defaults.sanitize_names);
        assert_eq!(config.discovery.definition_extension, "clips");
        assert_eq!(
            config.discovery.video_extensions,
            ["mp4", "MP4", "mov", "MOV"]
        );
        assert_eq!(config.transcoder.ffmpeg_path, PathBuf::from("ffmpeg"));
    }

    #[test]
    fn test_output_mode_is_structured() {
        assert!(OutputMode::Json.is_structured());
        assert!(!OutputMode::Human.is_structured());
    }
}
