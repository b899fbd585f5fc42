//! Progress bar utilities for clip extraction.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a progress bar for the clips of one definition file.
pub fn create_clip_progress(total_clips: usize, source_name: &str, enabled: bool) -> Option<ProgressBar> {
    if !enabled || total_clips == 0 {
        return None;
    }

    let pb = ProgressBar::new(total_clips as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{{elapsed_precise}}] {{bar:40.cyan/blue}} {{pos}}/{{len}} clips - {source_name}"
            ))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░ "),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

/// Finish a progress bar with a message.
pub fn finish_progress(pb: Option<ProgressBar>, message: &str) {
    if let Some(pb) = pb {
        pb.finish_with_message(message.to_string());
    }
}

/// Increment a progress bar.
pub fn inc_progress(pb: Option<&ProgressBar>) {
    if let Some(pb) = pb {
        pb.inc(1);
    }
}

/// Run `f` with the bar cleared so log lines are not drawn through it.
pub fn suspend<R>(pb: Option<&ProgressBar>, f: impl FnOnce() -> R) -> R {
    match pb {
        Some(pb) => pb.suspend(f),
        None => f(),
    }
}
