//! `MM:SS` timestamp parsing.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// A clip boundary given as `MM:SS`.
///
/// Keeps the text exactly as written so it can be echoed back in file names
/// and the manifest. Comparison uses the second count only.
#[derive(Debug, Clone)]
pub struct Timestamp {
    seconds: u64,
    raw: String,
}

impl Timestamp {
    /// Total number of seconds (`minutes * 60 + seconds`).
    #[must_use]
    pub fn to_seconds(&self) -> u64 {
        self.seconds
    }

    /// The timestamp as it appeared in the definition file.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// Parse a non-empty run of ASCII digits.
fn parse_part(value: &str, part: &str) -> Result<u64, Error> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidTimestamp {
            value: value.to_string(),
            reason: "minutes and seconds must be non-negative integers",
        });
    }
    part.parse().map_err(|_| Error::InvalidTimestamp {
        value: value.to_string(),
        reason: "value out of range",
    })
}

impl FromStr for Timestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let (Some(minutes), Some(seconds), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(Error::InvalidTimestamp {
                value: s.to_string(),
                reason: "expected exactly one ':'",
            });
        };

        let minutes = parse_part(s, minutes)?;
        let seconds = parse_part(s, seconds)?;

        let total = minutes
            .checked_mul(60)
            .and_then(|m| m.checked_add(seconds))
            .ok_or_else(|| Error::InvalidTimestamp {
                value: s.to_string(),
                reason: "value out of range",
            })?;

        Ok(Self {
            seconds: total,
            raw: s.to_string(),
        })
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.seconds == other.seconds
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.seconds.cmp(&other.seconds)
    }
}
