//! Clip definition file parsing.
//!
//! A definition file holds one clip per line in the form
//! `<name> <MM:SS> <MM:SS>`, fields separated by single spaces.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::Timestamp;
use crate::Error;

/// A single clip parsed from a definition line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipRecord {
    name: String,
    start: Timestamp,
    end: Timestamp,
}

impl ClipRecord {
    /// Build a record from already parsed parts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidClipRange`] if `end` is earlier than `start`.
    pub fn new(name: impl Into<String>, start: Timestamp, end: Timestamp) -> Result<Self, Error> {
        let name = name.into();
        if end < start {
            return Err(Error::InvalidClipRange {
                name,
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { name, start, end })
    }

    /// Clip name as written in the definition file.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Clip start.
    #[must_use]
    pub fn start(&self) -> &Timestamp {
        &self.start
    }

    /// Clip end.
    #[must_use]
    pub fn end(&self) -> &Timestamp {
        &self.end
    }
}

impl FromStr for ClipRecord {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.split(' ').collect();
        let [name, start, end] = fields.as_slice() else {
            return Err(Error::InvalidClipLine {
                line: line.to_string(),
                fields: fields.len(),
            });
        };

        Self::new(*name, start.parse()?, end.parse()?)
    }
}

impl fmt::Display for ClipRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "name: {}, start_time: {}, end_time: {}",
            self.name, self.start, self.end
        )
    }
}

/// Parse one definition line.
///
/// # Errors
///
/// Returns a format error if the line does not have exactly three fields,
/// a timestamp is malformed, or the clip ends before it starts.
pub fn parse_clip_line(line: &str) -> Result<ClipRecord, Error> {
    line.parse()
}

/// Outcome of parsing one line of a definition file.
#[derive(Debug)]
pub struct ParsedLine {
    /// 1-based line number.
    pub line_number: usize,
    /// The parsed clip, or the format error for this line.
    pub clip: Result<ClipRecord, Error>,
}

/// Read a definition file and parse every line.
///
/// Each line is parsed independently so a malformed line does not hide the
/// ones after it. Blank lines are reported as format errors.
///
/// # Errors
///
/// Returns [`Error::DefinitionRead`] if the file cannot be read.
pub fn parse_definition_file(path: &Path) -> Result<Vec<ParsedLine>, Error> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::DefinitionRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(contents
        .lines()
        .enumerate()
        .map(|(index, line)| ParsedLine {
            line_number: index + 1,
            clip: parse_clip_line(line),
        })
        .collect())
}
