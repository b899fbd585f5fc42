//! Tests for source video resolution.

use std::fs;

use tempfile::TempDir;
use vidclip::Error;
use vidclip::clipper::find_source_video;
use vidclip::constants::definitions::VIDEO_EXTENSIONS;

fn extensions() -> Vec<String> {
    VIDEO_EXTENSIONS.iter().map(ToString::to_string).collect()
}

#[test]
fn test_uppercase_mov_is_found() {
    let dir = TempDir::new().unwrap();
    let definition = dir.path().join("a.clips");
    fs::write(&definition, "intro 00:01 00:02\n").unwrap();
    fs::write(dir.path().join("a.MOV"), "").unwrap();

    let found = find_source_video(&definition, &extensions()).unwrap();
    assert_eq!(found.file_name().unwrap(), "a.MOV");
}

#[test]
fn test_no_video_is_resolution_error() {
    let dir = TempDir::new().unwrap();
    let definition = dir.path().join("a.clips");
    fs::write(&definition, "intro 00:01 00:02\n").unwrap();
    fs::write(dir.path().join("b.mp4"), "").unwrap();

    let result = find_source_video(&definition, &extensions());
    assert!(matches!(result, Err(Error::SourceVideoNotFound { .. })));
}

#[test]
fn test_custom_extension_list() {
    let dir = TempDir::new().unwrap();
    let definition = dir.path().join("a.clips");
    fs::write(dir.path().join("a.mkv"), "").unwrap();
    fs::write(dir.path().join("a.mp4"), "").unwrap();

    let found = find_source_video(&definition, &["mkv".to_string()]).unwrap();
    assert_eq!(found, dir.path().join("a.mkv"));
}
