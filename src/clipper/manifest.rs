//! Extraction manifest.
//!
//! Records every clip that was written, in completion order, and renders
//! the plain-text `manifest.txt` block format.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::ClipRecord;
use crate::Error;
use crate::constants::MANIFEST_FILE_NAME;

/// A successfully extracted clip.
#[derive(Debug, Clone)]
pub struct ManifestEntry {
    /// File that was written.
    pub output_path: PathBuf,
    /// Video the clip was cut from.
    pub source_path: PathBuf,
    /// The clip definition.
    pub clip: ClipRecord,
}

impl fmt::Display for ManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.output_path.display())?;
        writeln!(f, "  source: {}", self.source_path.display())?;
        writeln!(f, "  name: {}", self.clip.name())?;
        writeln!(f, "  start_time: {}", self.clip.start())?;
        writeln!(f, "  end_time: {}", self.clip.end())
    }
}

impl Serialize for ManifestEntry {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut s = serializer.serialize_struct("ManifestEntry", 5)?;
        s.serialize_field("output_file", &self.output_path)?;
        s.serialize_field("source_video", &self.source_path)?;
        s.serialize_field("name", self.clip.name())?;
        s.serialize_field("start_time", self.clip.start().as_str())?;
        s.serialize_field("end_time", self.clip.end().as_str())?;
        s.end()
    }
}

/// Ordered, append-only list of extracted clips for one run.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Create an empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a written clip.
    pub fn push(&mut self, entry: ManifestEntry) {
        self.entries.push(entry);
    }

    /// Entries in completion order.
    #[must_use]
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no clip has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the manifest text: one block per entry, each followed by a
    /// blank line.
    #[must_use]
    pub fn render(&self) -> String {
        self.entries.iter().map(|entry| format!("{entry}\n")).collect()
    }

    /// Write `manifest.txt` into `output_dir`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ManifestWrite`] if the file cannot be written.
    pub fn write_to(&self, output_dir: &Path) -> Result<PathBuf, Error> {
        let path = output_dir.join(MANIFEST_FILE_NAME);
        std::fs::write(&path, self.render()).map_err(|e| Error::ManifestWrite {
            path: path.clone(),
            source: e,
        })?;
        Ok(path)
    }
}
