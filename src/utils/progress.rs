//! Progress reporting for long per-animal stages
//!
//! Standardized progress bars built on the indicatif crate, switched on by
//! the engine's `show_progress` knob for large herds.

use indicatif::{ProgressBar, ProgressStyle};

/// Default style for a scoring stage progress bar
pub const STAGE_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({per_sec}) {msg}";

/// Create a progress bar for a scoring stage
///
/// # Arguments
/// * `length` - Number of animals the stage will process
/// * `stage` - Stage name shown as the bar's message
#[must_use]
pub fn stage_progress_bar(length: u64, stage: &str) -> ProgressBar {
    let pb = ProgressBar::new(length);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(STAGE_TEMPLATE)
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message(stage.to_string());
    pb
}

/// Finish a progress bar with a completion message
pub fn finish_progress_bar(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(message.to_string());
}
