//! Definition file discovery and source video resolution.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::Error;

/// Recursively collect definition files under `source_dir`.
///
/// Symbolic links to directories are skipped; links to files are kept.
///
/// Files are matched by extension (ASCII case-insensitive) and returned
/// sorted by path so discovery order does not depend on the filesystem.
///
/// # Errors
///
/// Returns [`Error::SourceDirNotFound`] if `source_dir` is not a directory,
/// or [`Error::DirectoryRead`] if a directory cannot be listed.
pub fn discover_definition_files(source_dir: &Path, extension: &str) -> Result<Vec<PathBuf>, Error> {
    if !source_dir.is_dir() {
        return Err(Error::SourceDirNotFound {
            path: source_dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    collect_definition_files_recursive(source_dir, extension, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_definition_files_recursive(
    dir: &Path,
    extension: &str,
    files: &mut Vec<PathBuf>,
) -> Result<(), Error> {
    let read_err = |e| Error::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    };

    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let path = entry.path();

        // Symlinked directories are not followed; a link to an ancestor would loop
        if entry.file_type().map_err(read_err)?.is_dir() {
            collect_definition_files_recursive(&path, extension, files)?;
        } else if is_definition_file(&path, extension) {
            files.push(path);
        }
    }

    Ok(())
}

/// Check whether a path carries the definition file extension.
pub fn is_definition_file(path: &Path, extension: &str) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(OsStr::new(extension)))
}

/// Find the video file belonging to a definition file.
///
/// Tries `extensions` in order against the definition file's path with its
/// extension replaced, returning the first existing regular file.
///
/// # Errors
///
/// Returns [`Error::SourceVideoNotFound`] if no candidate exists.
pub fn find_source_video(definition_path: &Path, extensions: &[String]) -> Result<PathBuf, Error> {
    let candidates: Vec<PathBuf> = extensions
        .iter()
        .map(|ext| definition_path.with_extension(ext))
        .collect();

    if let Some(found) = candidates.iter().find(|path| path.is_file()) {
        return Ok(found.clone());
    }

    let tried = candidates
        .iter()
        .filter_map(|path| path.file_name())
        .map(|name| name.to_string_lossy())
        .collect::<Vec<_>>()
        .join(", ");

    Err(Error::SourceVideoNotFound {
        definition_path: definition_path.to_path_buf(),
        tried,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::constants::definitions::VIDEO_EXTENSIONS;
    use std::fs;
    use tempfile::TempDir;

    fn default_extensions() -> Vec<String> {
        VIDEO_EXTENSIONS.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_prefers_earlier_extension() {
        let dir = TempDir::new().unwrap();
        let definition = dir.path().join("a.clips");
        fs::write(&definition, "").unwrap();
        fs::write(dir.path().join("a.mov"), "").unwrap();
        fs::write(dir.path().join("a.mp4"), "").unwrap();

        let found = find_source_video(&definition, &default_extensions()).unwrap();
        assert_eq!(found, dir.path().join("a.mp4"));
    }

    #[test]
    fn test_directory_is_not_a_match() {
        let dir = TempDir::new().unwrap();
        let definition = dir.path().join("a.clips");
        fs::write(&definition, "").unwrap();
        fs::create_dir(dir.path().join("a.mp4")).unwrap();

        let result = find_source_video(&definition, &default_extensions());
        assert!(matches!(result, Err(Error::SourceVideoNotFound { .. })));
    }

    #[test]
    fn test_not_found_lists_candidates() {
        let dir = TempDir::new().unwrap();
        let definition = dir.path().join("trip.clips");

        let err = find_source_video(&definition, &default_extensions()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("trip.mp4"));
        assert!(message.contains("trip.MOV"));
    }

    #[test]
    fn test_stem_with_dots() {
        let dir = TempDir::new().unwrap();
        let definition = dir.path().join("day.one.clips");
        fs::write(dir.path().join("day.one.mp4"), "").unwrap();

        let found = find_source_video(&definition, &default_extensions()).unwrap();
        assert_eq!(found, dir.path().join("day.one.mp4"));
    }

    #[test]
    fn test_discover_recurses_and_sorts() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("b/nested")).unwrap();
        fs::write(dir.path().join("b/nested/z.clips"), "").unwrap();
        fs::write(dir.path().join("b/y.CLIPS"), "").unwrap();
        fs::write(dir.path().join("a.clips"), "").unwrap();
        fs::write(dir.path().join("a.mp4"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = discover_definition_files(dir.path(), "clips").unwrap();
        assert_eq!(
            files,
            vec![
                dir.path().join("a.clips"),
                dir.path().join("b/nested/z.clips"),
                dir.path().join("b/y.CLIPS"),
            ]
        );
    }

    #[test]
    fn test_discover_missing_dir() {
        let result = discover_definition_files(Path::new("/nonexistent/source"), "clips");
        assert!(matches!(result, Err(Error::SourceDirNotFound { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop_is_not_followed() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("v.clips"), "").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("sub/back")).unwrap();
        std::os::unix::fs::symlink(".", dir.path().join("loop")).unwrap();

        let files = discover_definition_files(dir.path(), "clips").unwrap();
        assert_eq!(files, vec![dir.path().join("v.clips")]);
    }
}
