//! CLI argument validators.

use crate::config::validate_name_pattern;

/// Parse and validate a clip naming pattern.
pub fn parse_name_pattern(s: &str) -> Result<String, String> {
    validate_name_pattern(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

/// Parse a file extension, accepting an optional leading dot.
pub fn parse_extension(s: &str) -> Result<String, String> {
    let ext = s.strip_prefix('.').unwrap_or(s);

    if ext.is_empty() {
        return Err("extension cannot be empty".to_string());
    }

    if ext.contains(['.', '/', '\\']) {
        return Err(format!("'{s}' is not a plain file extension"));
    }

    Ok(ext.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_pattern() {
        assert_eq!(
            parse_name_pattern("{name}.mp4").ok().as_deref(),
            Some("{name}.mp4")
        );
        assert!(parse_name_pattern("").is_err());
        assert!(parse_name_pattern("clips/").is_err());
    }

    #[test]
    fn test_parse_extension() {
        assert_eq!(parse_extension("clips").ok().as_deref(), Some("clips"));
        assert_eq!(parse_extension(".cuts").ok().as_deref(), Some("cuts"));
        assert!(parse_extension(".").is_err());
        assert!(parse_extension("a/b").is_err());
        assert!(parse_extension("tar.gz").is_err());
    }
}
