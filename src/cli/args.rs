//! CLI argument definitions.

use crate::cli::validators::{parse_extension, parse_name_pattern};
use crate::config::{EncodingMode, OutputMode};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Batch-extract named clips from videos using `.clips` sidecar files.
#[derive(Debug, Parser)]
#[command(name = "vidclip")]
#[command(author, version, about, long_about = None)]
#[command(subcommand_negates_reqs = true)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Options for clip extraction.
    #[command(flatten)]
    pub extract: ExtractArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for clip extraction.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct ExtractArgs {
    /// Source folder to search for `.clips` files (recursively).
    #[arg(short, long, required = true)]
    pub source: Option<PathBuf>,

    /// Output folder to create clips and `manifest.txt` in.
    #[arg(short, long, required = true)]
    pub output: Option<PathBuf>,

    /// Pattern for clip file names. Tokens: {source}, {name}, {start_time}, {end_time}.
    #[arg(short = 'p', long, value_parser = parse_name_pattern, env = "VIDCLIP_NAME_PATTERN")]
    pub name_pattern: Option<String>,

    /// Stream-copy (fast, keyframe-aligned) or re-encode (slow, frame-accurate).
    #[arg(short, long, value_enum, env = "VIDCLIP_ENCODING")]
    pub encoding: Option<EncodingMode>,

    /// Definition file extension (default: clips).
    #[arg(long, value_parser = parse_extension)]
    pub definition_extension: Option<String>,

    /// Path to the ffmpeg executable.
    #[arg(long, env = "VIDCLIP_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,

    /// Use clip names in file names as written, without sanitizing.
    #[arg(long)]
    pub raw_names: bool,

    /// Stop at the first failed line, file or clip.
    #[arg(long)]
    pub fail_fast: bool,

    /// Output mode for results.
    #[arg(long, value_enum, default_value_t = OutputMode::Human)]
    pub output_mode: OutputMode,

    /// Suppress progress output.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Hide progress bars.
    #[arg(long)]
    pub no_progress: bool,

    /// Increase verbosity (-v: debug and ffmpeg output, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_extract_args() {
        let cli = Cli::try_parse_from([
            "vidclip",
            "--source",
            "videos",
            "--output",
            "out",
            "--name-pattern",
            "{source}_{name}.mp4",
            "--encoding",
            "copy-codecs",
            "-v",
        ])
        .unwrap();

        assert!(cli.command.is_none());
        assert_eq!(cli.extract.source, Some(PathBuf::from("videos")));
        assert_eq!(
            cli.extract.name_pattern.as_deref(),
            Some("{source}_{name}.mp4")
        );
        assert_eq!(cli.extract.encoding, Some(EncodingMode::CopyCodecs));
        assert_eq!(cli.extract.verbose, 1);
    }

    #[test]
    fn test_source_and_output_required() {
        assert!(Cli::try_parse_from(["vidclip", "--output", "out"]).is_err());
        assert!(Cli::try_parse_from(["vidclip", "--source", "videos"]).is_err());
    }

    #[test]
    fn test_subcommand_needs_no_source() {
        let cli = Cli::try_parse_from(["vidclip", "config", "path"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config {
                action: ConfigAction::Path
            })
        ));
    }

    #[test]
    fn test_unknown_encoding_rejected() {
        let result = Cli::try_parse_from([
            "vidclip", "-s", "a", "-o", "b", "--encoding", "lossless",
        ]);
        assert!(result.is_err());
    }
}
