use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Terminal progress bar fed by the scan's progress callback
pub struct ScanProgress {
    bar: ProgressBar,
}

impl ScanProgress {
    /// A bar drawn to stderr, or a hidden one when `enabled` is false
    pub fn new(enabled: bool) -> Self {
        let bar = if enabled {
            ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr())
        } else {
            ProgressBar::hidden()
        };

        let style = ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█>-");
        bar.set_style(style);
        bar.set_message("hashing");

        Self { bar }
    }

    /// Record that `done` of `total` files have been processed
    pub fn update(&self, done: usize, total: usize) {
        if self.bar.length() != Some(total as u64) {
            self.bar.set_length(total as u64);
        }
        self.bar.set_position(done as u64);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
