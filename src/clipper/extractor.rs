//! Clip extraction through an external transcoder.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use super::ClipRecord;
use crate::Error;
use crate::config::EncodingMode;
use crate::constants::extraction::{END_PADDING_SECS, STDERR_TAIL_LINES};

/// One clip to cut out of a source video.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionJob<'a> {
    /// Clip boundaries.
    pub clip: &'a ClipRecord,
    /// Source video.
    pub source: &'a Path,
    /// Destination file; must not exist yet.
    pub output: &'a Path,
}

impl ExtractionJob<'_> {
    /// Start offset in seconds.
    #[must_use]
    pub fn start_seconds(&self) -> u64 {
        self.clip.start().to_seconds()
    }

    /// Absolute end offset in seconds, one second past the nominal end.
    #[must_use]
    pub fn end_seconds(&self) -> u64 {
        self.clip.end().to_seconds() + END_PADDING_SECS
    }
}

/// Something that can write a clip file for an [`ExtractionJob`].
pub trait Transcoder {
    /// Extract one clip, blocking until the output file is written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExtractionFailed`] if the clip could not be written.
    fn extract(&self, job: &ExtractionJob<'_>) -> Result<(), Error>;
}

/// Settings for [`FfmpegTranscoder`].
#[derive(Debug, Clone)]
pub struct ExtractionOptions {
    /// Stream copy or re-encode.
    pub encoding: EncodingMode,
    /// Pass the transcoder's own output through to the terminal.
    pub verbose: bool,
    /// Transcoder executable.
    pub ffmpeg_path: PathBuf,
}

/// Runs `ffmpeg` once per clip.
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    options: ExtractionOptions,
}

impl FfmpegTranscoder {
    /// Create a transcoder with the given options.
    #[must_use]
    pub fn new(options: ExtractionOptions) -> Self {
        Self { options }
    }

    /// Build the argument list for a job, without the program name.
    #[must_use]
    pub fn command_args(&self, job: &ExtractionJob<'_>) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-nostdin".into(), "-n".into()];

        if !self.options.verbose {
            args.extend(["-hide_banner", "-loglevel", "error"].map(OsString::from));
        }

        args.extend([
            OsString::from("-ss"),
            OsString::from(job.start_seconds().to_string()),
            OsString::from("-to"),
            OsString::from(job.end_seconds().to_string()),
            OsString::from("-i"),
            job.source.as_os_str().to_owned(),
        ]);

        if self.options.encoding == EncodingMode::CopyCodecs {
            args.extend(["-c:v", "copy", "-c:a", "copy"].map(OsString::from));
        }

        args.push(job.output.as_os_str().to_owned());
        args
    }

    fn failure(job: &ExtractionJob<'_>, reason: String) -> Error {
        Error::ExtractionFailed {
            output_path: job.output.to_path_buf(),
            reason,
        }
    }
}

impl Transcoder for FfmpegTranscoder {
    fn extract(&self, job: &ExtractionJob<'_>) -> Result<(), Error> {
        let args = self.command_args(job);
        debug!(
            "Running {} {}",
            self.options.ffmpeg_path.display(),
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let mut command = Command::new(&self.options.ffmpeg_path);
        command.args(&args).stdin(Stdio::null());

        let (status, stderr) = if self.options.verbose {
            let status = command.status().map_err(|e| {
                Self::failure(
                    job,
                    format!("could not run {}: {e}", self.options.ffmpeg_path.display()),
                )
            })?;
            (status, String::new())
        } else {
            let output = command
                .stdout(Stdio::null())
                .stderr(Stdio::piped())
                .output()
                .map_err(|e| {
                    Self::failure(
                        job,
                        format!("could not run {}: {e}", self.options.ffmpeg_path.display()),
                    )
                })?;
            (output.status, String::from_utf8_lossy(&output.stderr).into_owned())
        };

        if !status.success() {
            let mut reason = format!("transcoder exited with {status}");
            let tail = stderr_tail(&stderr);
            if !tail.is_empty() {
                reason.push_str(": ");
                reason.push_str(&tail);
            }
            discard_partial_output(job.output);
            return Err(Self::failure(job, reason));
        }

        match std::fs::metadata(job.output) {
            Ok(meta) if meta.len() > 0 => Ok(()),
            Ok(_) => {
                discard_partial_output(job.output);
                Err(Self::failure(job, "transcoder wrote an empty file".to_string()))
            }
            Err(_) => Err(Self::failure(job, "transcoder wrote no output file".to_string())),
        }
    }
}

/// Remove whatever a failed run left behind so the name is free next time.
fn discard_partial_output(output: &Path) {
    if let Err(e) = std::fs::remove_file(output)
        && e.kind() != std::io::ErrorKind::NotFound
    {
        debug!("Could not remove partial output {}: {e}", output.display());
    }
}

/// Last few non-empty lines of the transcoder's stderr, joined with ` | `.
fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
    let skip = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[skip..].join(" | ")
}
