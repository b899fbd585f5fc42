//! Output file naming.
//!
//! Expands a naming pattern such as `{source}_{name}.mp4` into a file name
//! and finds a path in the output directory that does not collide with an
//! existing file.

use std::path::{Path, PathBuf};

use super::ClipRecord;
use crate::constants::{MANIFEST_FILE_NAME, naming};

/// A naming pattern for extracted clips.
///
/// Recognised placeholders: `{source}`, `{name}`, `{start_time}`,
/// `{end_time}`. Anything else is copied literally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePattern(String);

impl NamePattern {
    /// Wrap a pattern string.
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    /// The raw pattern.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Expand the pattern for one clip.
    ///
    /// The pattern is scanned once, so placeholder text inside substituted
    /// values is never expanded again.
    #[must_use]
    pub fn expand(&self, source_stem: &str, clip_name: &str, clip: &ClipRecord) -> String {
        let tokens = [
            (naming::SOURCE, source_stem),
            (naming::NAME, clip_name),
            (naming::START_TIME, clip.start().as_str()),
            (naming::END_TIME, clip.end().as_str()),
        ];

        let mut out = String::with_capacity(self.0.len());
        let mut rest = self.0.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            rest = &rest[open..];

            if let Some((token, value)) = tokens.iter().find(|(token, _)| rest.starts_with(token)) {
                out.push_str(value);
                rest = &rest[token.len()..];
            } else {
                out.push('{');
                rest = &rest[1..];
            }
        }
        out.push_str(rest);
        out
    }
}

impl Default for NamePattern {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_NAME_PATTERN)
    }
}

impl std::fmt::Display for NamePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sanitize a clip name for use inside a file name.
///
/// Replaces characters that are invalid in filenames across platforms
/// and prevents path traversal.
#[must_use]
pub fn sanitize_clip_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect();

    sanitized.replace("..", "__")
}

/// Return `candidate`, or the first `<stem>_NNN.<ext>` sibling that does not
/// exist yet.
///
/// The check is not atomic; callers must be the only writer to the output
/// directory.
#[must_use]
pub fn unique_output_path(candidate: PathBuf) -> PathBuf {
    unique_output_path_avoiding(candidate, None)
}

/// Like [`unique_output_path`], but also treats `reserved` as taken even
/// before it exists.
fn unique_output_path_avoiding(candidate: PathBuf, reserved: Option<&Path>) -> PathBuf {
    let is_taken = |path: &Path| path.exists() || reserved.is_some_and(|r| r == path);

    if !is_taken(&candidate) {
        return candidate;
    }

    let stem = candidate
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = candidate
        .extension()
        .map(|e| e.to_string_lossy().into_owned());

    let width = naming::COLLISION_SUFFIX_WIDTH;
    let mut n: u64 = 1;
    loop {
        let file_name = match &extension {
            Some(ext) => format!("{stem}_{n:0width$}.{ext}"),
            None => format!("{stem}_{n:0width$}"),
        };
        let path = candidate.with_file_name(file_name);
        if !is_taken(&path) {
            return path;
        }
        n += 1;
    }
}

/// Expand `pattern` for a clip and resolve it to a free path under
/// `output_dir`.
///
/// The manifest location is never handed out, since the manifest is written
/// after all clips.
#[must_use]
pub fn output_path_for(
    pattern: &NamePattern,
    output_dir: &Path,
    source_path: &Path,
    clip: &ClipRecord,
    sanitize: bool,
) -> PathBuf {
    let source_stem = source_path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();

    let file_name = if sanitize {
        pattern.expand(&source_stem, &sanitize_clip_name(clip.name()), clip)
    } else {
        pattern.expand(&source_stem, clip.name(), clip)
    };

    let manifest_path = output_dir.join(MANIFEST_FILE_NAME);
    unique_output_path_avoiding(output_dir.join(file_name), Some(&manifest_path))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::clipper::parse_clip_line;
    use std::fs;
    use tempfile::TempDir;

    fn clip(line: &str) -> ClipRecord {
        parse_clip_line(line).unwrap()
    }

    #[test]
    fn test_expand_all_tokens() {
        let pattern = NamePattern::new("{source}-{name}-{start_time}-{end_time}.mov");
        let c = clip("goal 01:05 01:20");
        assert_eq!(
            pattern.expand("match", "goal", &c),
            "match-goal-01:05-01:20.mov"
        );
    }

    #[test]
    fn test_expand_repeated_and_unknown_tokens() {
        let pattern = NamePattern::new("{name}/{name}{unknown}{.mp4");
        let c = clip("x 00:01 00:02");
        assert_eq!(pattern.expand("src", "x", &c), "x/x{unknown}{.mp4");
    }

    #[test]
    fn test_expand_does_not_rescan_values() {
        let pattern = NamePattern::new("{name}_{source}.mp4");
        let c = clip("{source} 00:01 00:02");
        assert_eq!(pattern.expand("video", "{source}", &c), "{source}_video.mp4");
    }

    #[test]
    fn test_default_pattern() {
        let c = clip("intro 00:10 00:20");
        assert_eq!(NamePattern::default().expand("v", "intro", &c), "intro.mp4");
    }

    #[test]
    fn test_sanitize_clip_name() {
        assert_eq!(sanitize_clip_name("highlight"), "highlight");
        assert_eq!(sanitize_clip_name("a/b:c*d"), "a_b_c_d");
        assert_eq!(sanitize_clip_name("../etc"), "___etc");
        assert_eq!(sanitize_clip_name("take.2"), "take.2");
    }

    #[test]
    fn test_unique_path_without_collision() {
        let dir = TempDir::new().unwrap();
        let path = unique_output_path(dir.path().join("clip.mp4"));
        assert_eq!(path, dir.path().join("clip.mp4"));
    }

    #[test]
    fn test_unique_path_without_extension() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("clip"), "").unwrap();
        let path = unique_output_path(dir.path().join("clip"));
        assert_eq!(path, dir.path().join("clip_001"));
    }

    #[test]
    fn test_output_path_sanitizes_by_default() {
        let dir = TempDir::new().unwrap();
        let c = clip("a/b 00:01 00:02");
        let path = output_path_for(
            &NamePattern::default(),
            dir.path(),
            Path::new("/videos/src.mp4"),
            &c,
            true,
        );
        assert_eq!(path, dir.path().join("a_b.mp4"));

        let raw = output_path_for(
            &NamePattern::default(),
            dir.path(),
            Path::new("/videos/src.mp4"),
            &c,
            false,
        );
        assert_eq!(raw, dir.path().join("a/b.mp4"));
    }

    #[test]
    fn test_manifest_name_is_never_handed_out() {
        let dir = TempDir::new().unwrap();
        let c = clip("manifest 00:01 00:02");
        let pattern = NamePattern::new("{name}.txt");

        let path = output_path_for(&pattern, dir.path(), Path::new("v.mp4"), &c, true);
        assert_eq!(path, dir.path().join("manifest_001.txt"));

        // Only the top-level manifest location is reserved
        let nested = output_path_for(
            &NamePattern::new("{source}/{name}.txt"),
            dir.path(),
            Path::new("v.mp4"),
            &c,
            true,
        );
        assert_eq!(nested, dir.path().join("v/manifest.txt"));
    }
}
