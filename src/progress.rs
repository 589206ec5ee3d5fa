//! Progress reporting for long record sweeps.
//!
//! Calculators never print. They report to a [`Progress`] observer supplied
//! by the host, so a CLI can draw a bar while a service stays silent.

/// Observer notified while a statistic is computed.
///
/// `advance` may be called from several threads when the `parallel`
/// feature is enabled; `done` is the number of records processed so far.
pub trait Progress: Send + Sync {
    fn start(&self, task: &str, total: usize);

    fn advance(&self, done: usize);

    fn finish(&self, task: &str);
}

/// Reports through the `log` facade.
#[derive(Debug, Clone, Copy)]
pub struct LogProgress {
    /// Emit a debug line every `interval` records.
    pub interval: usize,
}

impl LogProgress {
    pub const DEFAULT_INTERVAL: usize = 10_000;
}

impl Default for LogProgress {
    fn default() -> Self {
        Self {
            interval: Self::DEFAULT_INTERVAL,
        }
    }
}

impl Progress for LogProgress {
    fn start(&self, task: &str, total: usize) {
        log::info!("Calculating {} for {} records", task, total);
    }

    fn advance(&self, done: usize) {
        if self.interval > 0 && done % self.interval == 0 {
            log::debug!("Processed {} records", done);
        }
    }

    fn finish(&self, task: &str) {
        log::info!("Finished {}", task);
    }
}

/// Discards all progress notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn start(&self, _task: &str, _total: usize) {}

    fn advance(&self, _done: usize) {}

    fn finish(&self, _task: &str) {}
}
