//! Extraction command execution.

use tracing::{info, warn};

use crate::Error;
use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::output::{ClipExtractionPayload, ResultType, emit_json_result};

use super::{ExtractConfig, ExtractionOptions, FfmpegTranscoder, NamePattern, run_batch};

/// Merge CLI arguments over the loaded configuration.
///
/// # Errors
///
/// Returns an error if `--source` or `--output` is missing.
pub fn resolve_options(
    args: &ExtractArgs,
    config: &Config,
) -> Result<(ExtractConfig, ExtractionOptions), Error> {
    // Both are guaranteed by clap constraints when no subcommand is given
    let source_dir = args.source.clone().ok_or_else(|| Error::Internal {
        message: "--source is required".to_string(),
    })?;
    let output_dir = args.output.clone().ok_or_else(|| Error::Internal {
        message: "--output is required".to_string(),
    })?;

    let extract = ExtractConfig {
        source_dir,
        output_dir,
        name_pattern: NamePattern::new(
            args.name_pattern
                .clone()
                .unwrap_or_else(|| config.defaults.name_pattern.clone()),
        ),
        sanitize_names: config.defaults.sanitize_names && !args.raw_names,
        fail_fast: args.fail_fast,
        definition_extension: args
            .definition_extension
            .clone()
            .unwrap_or_else(|| config.discovery.definition_extension.clone()),
        video_extensions: config.discovery.video_extensions.clone(),
        show_progress: !args.quiet && !args.no_progress && !args.output_mode.is_structured(),
    };

    let options = ExtractionOptions {
        encoding: args.encoding.unwrap_or(config.defaults.encoding),
        verbose: args.verbose > 0,
        ffmpeg_path: args
            .ffmpeg
            .clone()
            .unwrap_or_else(|| config.transcoder.ffmpeg_path.clone()),
    };

    Ok((extract, options))
}

/// Execute the extraction command.
///
/// # Errors
///
/// Returns an error if the batch hits an environment-level failure, or the
/// first per-item failure with `--fail-fast`.
pub fn execute(args: &ExtractArgs, config: &Config) -> Result<(), Error> {
    let (extract, options) = resolve_options(args, config)?;

    info!(
        "Extracting clips from {} to {} (pattern: {}, encoding: {})",
        extract.source_dir.display(),
        extract.output_dir.display(),
        extract.name_pattern,
        options.encoding
    );
    if !extract.sanitize_names {
        warn!("Clip names are used unsanitized in output file names");
    }

    let transcoder = FfmpegTranscoder::new(options);
    let report = run_batch(&extract, &transcoder)?;

    if args.output_mode.is_structured() {
        emit_json_result(&ClipExtractionPayload {
            result_type: ResultType::ClipExtraction,
            source_dir: extract.source_dir.clone(),
            output_dir: extract.output_dir.clone(),
            report: &report,
        });
        return Ok(());
    }

    if report.manifest.is_empty() && report.files_found > 0 {
        warn!("No clips were extracted");
    }
    info!("Manifest written to {}", report.manifest_path.display());
    if report.clips_failed > 0 || report.files_failed > 0 || report.lines_skipped > 0 {
        warn!(
            "{} clip(s) failed, {} definition file(s) failed, {} line(s) skipped",
            report.clips_failed, report.files_failed, report.lines_skipped
        );
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::config::EncodingMode;
    use clap::Parser;
    use std::path::PathBuf;

    fn args(extra: &[&str]) -> ExtractArgs {
        let mut argv = vec!["vidclip", "--source", "in", "--output", "out"];
        argv.extend_from_slice(extra);
        Cli::try_parse_from(argv).unwrap().extract
    }

    #[test]
    fn test_config_defaults_apply() {
        let mut config = Config::default();
        config.defaults.encoding = EncodingMode::CopyCodecs;
        config.defaults.name_pattern = "{source}-{name}.mov".to_string();

        let (extract, options) = resolve_options(&args(&[]), &config).unwrap();
        assert_eq!(extract.name_pattern.as_str(), "{source}-{name}.mov");
        assert_eq!(options.encoding, EncodingMode::CopyCodecs);
        assert_eq!(options.ffmpeg_path, PathBuf::from("ffmpeg"));
        assert!(extract.sanitize_names);
        assert!(!options.verbose);
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = Config::default();
        let (extract, options) = resolve_options(
            &args(&[
                "--encoding",
                "copy-codecs",
                "--name-pattern",
                "{name}.mkv",
                "--raw-names",
                "--ffmpeg",
                "/opt/ffmpeg/bin/ffmpeg",
                "--definition-extension",
                ".cuts",
                "-v",
            ]),
            &config,
        )
        .unwrap();

        assert_eq!(options.encoding, EncodingMode::CopyCodecs);
        assert_eq!(extract.name_pattern.as_str(), "{name}.mkv");
        assert!(!extract.sanitize_names);
        assert_eq!(options.ffmpeg_path, PathBuf::from("/opt/ffmpeg/bin/ffmpeg"));
        assert_eq!(extract.definition_extension, "cuts");
        assert!(options.verbose);
    }

    #[test]
    fn test_json_mode_hides_progress() {
        let (extract, _) =
            resolve_options(&args(&["--output-mode", "json"]), &Config::default()).unwrap();
        assert!(!extract.show_progress);
    }
}
