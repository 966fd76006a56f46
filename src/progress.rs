use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const MEGABYTE: f64 = (1024 * 1024) as f64;

/// Receives transfer progress. Only called with a known, non-zero total.
pub trait ProgressSink {
    fn update(&mut self, received: u64, total: u64);
    fn finish(&mut self);
}

pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn update(&mut self, _received: u64, _total: u64) {}
    fn finish(&mut self) {}
}

/// Single in-place line on stdout, cleared once the transfer ends.
pub struct TerminalProgress {
    bar: Option<ProgressBar>,
}

impl TerminalProgress {
    pub fn new() -> Self {
        Self { bar: None }
    }
}

impl Default for TerminalProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for TerminalProgress {
    fn update(&mut self, received: u64, total: u64) {
        let bar = self.bar.get_or_insert_with(|| {
            let pb = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stdout());
            pb.set_style(ProgressStyle::with_template("{msg}").unwrap_or_else(|_| ProgressStyle::default_bar()));
            pb
        });
        bar.set_position(received);
        bar.set_message(format_megabytes(received, total));
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

pub fn format_megabytes(received: u64, total: u64) -> String {
    format!(
        "{:.2} / {:.2} Mbytes",
        received as f64 / MEGABYTE,
        total as f64 / MEGABYTE
    )
}
