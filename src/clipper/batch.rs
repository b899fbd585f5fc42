//! Batch orchestration.
//!
//! Drives discovery, parsing, source resolution, extraction and manifest
//! writing for one run. Files are processed in discovery order and clips in
//! line order; a bad line, file or clip is logged and skipped unless
//! `fail_fast` is set.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use super::{
    ClipRecord, ExtractionJob, Manifest, ManifestEntry, NamePattern, Transcoder,
    discover_definition_files, find_source_video, output_path_for, parse_definition_file,
};
use crate::Error;
use crate::output::progress;

/// Everything a batch run needs to know.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Tree searched for definition files.
    pub source_dir: PathBuf,
    /// Directory receiving clips and the manifest.
    pub output_dir: PathBuf,
    /// Output file naming pattern.
    pub name_pattern: NamePattern,
    /// Replace filesystem-unsafe characters in clip names.
    pub sanitize_names: bool,
    /// Stop at the first failed line, file or clip.
    pub fail_fast: bool,
    /// Definition file extension, without the dot.
    pub definition_extension: String,
    /// Video extensions tried in order when resolving a source.
    pub video_extensions: Vec<String>,
    /// Show per-file progress bars.
    pub show_progress: bool,
}

/// Summary of a batch run.
#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    /// Definition files discovered.
    pub files_found: usize,
    /// Definition files whose source video was resolved.
    pub files_processed: usize,
    /// Definition files skipped because of an error.
    pub files_failed: usize,
    /// Clips written and recorded in the manifest.
    pub clips_extracted: usize,
    /// Clips whose extraction failed.
    pub clips_failed: usize,
    /// Definition lines that could not be parsed.
    pub lines_skipped: usize,
    /// Location of the written manifest.
    pub manifest_path: PathBuf,
    /// Recorded clips in completion order.
    pub manifest: Manifest,
}

/// Run a full batch: extract every clip and write the manifest.
///
/// # Errors
///
/// Returns an error if the output directory cannot be created, the source
/// tree cannot be read, or the manifest cannot be written. With
/// `fail_fast`, also returns the first per-item error (after writing the
/// manifest for the clips extracted so far).
pub fn run_batch(config: &ExtractConfig, transcoder: &dyn Transcoder) -> Result<BatchReport, Error> {
    std::fs::create_dir_all(&config.output_dir).map_err(|e| Error::OutputDirCreateFailed {
        path: config.output_dir.clone(),
        source: e,
    })?;

    let definition_files =
        discover_definition_files(&config.source_dir, &config.definition_extension)?;
    info!(
        "Found {} definition file(s) in {}",
        definition_files.len(),
        config.source_dir.display()
    );

    let mut report = BatchReport {
        files_found: definition_files.len(),
        ..BatchReport::default()
    };

    let mut first_error = None;

    for definition_file in &definition_files {
        match process_definition_file(definition_file, config, transcoder, &mut report) {
            Ok(()) => report.files_processed += 1,
            Err(e) => {
                warn!("Failed to process {}: {e}", definition_file.display());
                report.files_failed += 1;
                if config.fail_fast {
                    first_error = Some(e);
                    break;
                }
            }
        }
    }

    report.manifest_path = report.manifest.write_to(&config.output_dir)?;

    if let Some(e) = first_error {
        return Err(e);
    }

    info!(
        "Extracted {} clip(s) from {} file(s) to {} ({} clip(s) failed, {} line(s) skipped, {} file(s) failed)",
        report.clips_extracted,
        report.files_processed,
        config.output_dir.display(),
        report.clips_failed,
        report.lines_skipped,
        report.files_failed
    );

    Ok(report)
}

/// Process one definition file, appending successes to the report's
/// manifest.
///
/// Returns `Err` for file-level failures, and for line or clip failures when
/// `fail_fast` is set.
fn process_definition_file(
    definition_file: &Path,
    config: &ExtractConfig,
    transcoder: &dyn Transcoder,
    report: &mut BatchReport,
) -> Result<(), Error> {
    info!("Processing file {}", definition_file.display());

    let mut clips: Vec<ClipRecord> = Vec::new();
    for line in parse_definition_file(definition_file)? {
        match line.clip {
            Ok(clip) => clips.push(clip),
            Err(e) => {
                warn!(
                    "Skipping {}:{}: {e}",
                    definition_file.display(),
                    line.line_number
                );
                report.lines_skipped += 1;
                if config.fail_fast {
                    return Err(e);
                }
            }
        }
    }

    let source = find_source_video(definition_file, &config.video_extensions)?;
    info!("Using source video: {}", source.display());

    let pb = progress::create_clip_progress(
        clips.len(),
        &source.file_name().unwrap_or_default().to_string_lossy(),
        config.show_progress,
    );

    for clip in clips {
        // The bar already shows per-clip progress
        if pb.is_some() {
            debug!("  Processing clip <{clip}>");
        } else {
            info!("  Processing clip <{clip}>");
        }

        match extract_clip(&clip, &source, config, transcoder) {
            Ok(output_path) => {
                debug!("Wrote {}", output_path.display());
                if let Some(pb) = &pb {
                    pb.println(format!(
                        "  {} -> {}",
                        clip.name(),
                        output_path.file_name().unwrap_or_default().to_string_lossy()
                    ));
                }
                report.manifest.push(ManifestEntry {
                    output_path,
                    source_path: source.clone(),
                    clip,
                });
                report.clips_extracted = report.manifest.len();
            }
            Err(e) => {
                progress::suspend(pb.as_ref(), || {
                    warn!("Failed to extract clip '{}': {e}", clip.name());
                });
                report.clips_failed += 1;
                if config.fail_fast {
                    progress::finish_progress(pb, "failed");
                    return Err(e);
                }
            }
        }

        progress::inc_progress(pb.as_ref());
    }

    progress::finish_progress(pb, "done");
    Ok(())
}

/// Pick the output path for a clip and run the transcoder on it.
fn extract_clip(
    clip: &ClipRecord,
    source: &Path,
    config: &ExtractConfig,
    transcoder: &dyn Transcoder,
) -> Result<PathBuf, Error> {
    let output_path = output_path_for(
        &config.name_pattern,
        &config.output_dir,
        source,
        clip,
        config.sanitize_names,
    );

    // Patterns may place clips in sub-directories
    if let Some(parent) = output_path.parent()
        && !parent.is_dir()
    {
        std::fs::create_dir_all(parent).map_err(|e| Error::OutputDirCreateFailed {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    transcoder.extract(&ExtractionJob {
        clip,
        source,
        output: &output_path,
    })?;

    Ok(output_path)
}
