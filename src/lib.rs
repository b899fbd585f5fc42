//! vidclip - batch clip extraction CLI tool.
//!
//! Reads `.clips` sidecar files listing named time ranges, cuts each range
//! out of the matching video with ffmpeg and writes a manifest of the
//! extracted clips.

#![warn(missing_docs)]

pub mod cli;
pub mod clipper;
pub mod config;
pub mod constants;
pub mod error;
pub mod output;

use clap::Parser;
use cli::{Cli, Command, ConfigAction};
use config::{Config, config_file_path, load_default_config, save_default_config};
use output::{ErrorPayload, EventType, emit_json};

pub use error::{Error, Result};

/// Main entry point for vidclip CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.extract.verbose, cli.extract.quiet);

    // Handle subcommands
    if let Some(command) = cli.command {
        return handle_command(command);
    }

    let result = load_default_config().and_then(|config| clipper::command::execute(&cli.extract, &config));

    if let Err(e) = &result
        && cli.extract.output_mode.is_structured()
    {
        emit_json(
            EventType::Error,
            &ErrorPayload {
                message: error_chain(e),
            },
        );
    }

    result
}

/// Render an error with its sources, `outer: inner: ...`.
fn error_chain(error: &Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    message
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    // Keep stdout free for JSON results
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_command(command: Command) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action),
    }
}

fn handle_config_command(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let saved_path = save_default_config(&Config::default())?;
                println!("Created configuration file: {}", saved_path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_chain_includes_source() {
        let error = Error::ManifestWrite {
            path: PathBuf::from("out/manifest.txt"),
            source: std::io::Error::other("disk full"),
        };
        assert_eq!(
            error_chain(&error),
            "failed to write manifest 'out/manifest.txt': disk full"
        );
    }
}
