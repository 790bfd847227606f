use crate::errors::{AppError, AppResult};
use indicatif::{ProgressBar, ProgressStyle};

/// Creates the progress bar used for the per-date download loop.
///
/// Centralizes the styling so the bar looks the same wherever it is used.
/// Returns an error if the style template fails to compile.
pub fn create_progress_bar(total: u64) -> AppResult<ProgressBar> {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} days {msg}")
            .map_err(|e| AppError::InvalidInput(format!("Invalid progress bar template: {e}")))?
            .progress_chars("=>-"),
    );
    Ok(pb)
}
