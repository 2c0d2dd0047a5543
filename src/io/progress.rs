//! Progress display for the label sweep

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static LABEL_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Labels: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Progress bar across the ground-truth label files
pub struct EvalProgress {
    bar: ProgressBar,
}

impl EvalProgress {
    /// Create a bar sized to the number of labels
    pub fn new(label_count: usize) -> Self {
        let bar = ProgressBar::new(label_count as u64);
        bar.set_style(LABEL_STYLE.clone());
        Self { bar }
    }

    /// Show the label currently being evaluated
    pub fn start_label(&self, path: &Path) {
        self.bar.set_message(
            path.file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string(),
        );
    }

    /// Advance past the completed label
    pub fn complete_label(&self) {
        self.bar.inc(1);
    }

    /// Clear the display
    pub fn finish(&self) {
        self.bar.finish_with_message("All labels evaluated");
    }
}
