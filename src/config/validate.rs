//! Configuration validation.

use crate::config::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_name_pattern(&config.defaults.name_pattern)?;
    validate_discovery(config)?;

    if config.transcoder.ffmpeg_path.as_os_str().is_empty() {
        return Err(Error::ConfigValidation {
            message: "transcoder.ffmpeg_path must not be empty".to_string(),
        });
    }

    Ok(())
}

/// Validate a naming pattern.
pub fn validate_name_pattern(pattern: &str) -> Result<()> {
    if pattern.trim().is_empty() {
        return Err(Error::ConfigValidation {
            message: "name_pattern must not be empty".to_string(),
        });
    }

    if pattern.ends_with('/') || pattern.ends_with('\\') {
        return Err(Error::ConfigValidation {
            message: format!("name_pattern must end in a file name, got '{pattern}'"),
        });
    }

    Ok(())
}

/// Validate an extension setting (no dot, no separators).
fn validate_extension(field: &str, ext: &str) -> Result<()> {
    if ext.is_empty() || ext.contains(['.', '/', '\\']) {
        return Err(Error::ConfigValidation {
            message: format!("{field} entries must be bare extensions like 'mp4', got '{ext}'"),
        });
    }
    Ok(())
}

/// Validate discovery settings.
fn validate_discovery(config: &Config) -> Result<()> {
    let discovery = &config.discovery;

    validate_extension(
        "discovery.definition_extension",
        &discovery.definition_extension,
    )?;

    if discovery.video_extensions.is_empty() {
        return Err(Error::ConfigValidation {
            message: "discovery.video_extensions must list at least one extension".to_string(),
        });
    }

    for ext in &discovery.video_extensions {
        validate_extension("discovery.video_extensions", ext)?;
    }

    if discovery
        .video_extensions
        .iter()
        .any(|ext| ext.eq_ignore_ascii_case(&discovery.definition_extension))
    {
        return Err(Error::ConfigValidation {
            message: "discovery.definition_extension cannot also be a video extension"
                .to_string(),
        });
    }

    Ok(())
}
