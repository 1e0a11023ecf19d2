//! Progress logging at a configurable cadence.

use seed_core::{ProgressEvent, ProgressSink};
use tracing::info;

/// Logs a human-readable progress line every Nth flush (and always on the
/// final one), so a 500-batch phase does not flood the log.
pub struct LogProgress {
    every: u64,
    seen: u64,
}

impl LogProgress {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            seen: 0,
        }
    }
}

impl ProgressSink for LogProgress {
    fn on_flush(&mut self, event: &ProgressEvent) {
        self.seen += 1;
        if self.seen % self.every == 0 || event.completed >= event.total {
            info!(
                "{} phase: {}/{} ({:.1}%) in {:?} ({:.0} rows/sec)",
                event.phase,
                event.completed,
                event.total,
                event.percent(),
                event.elapsed,
                event.rows_per_second()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_cadence_is_clamped() {
        let sink = LogProgress::new(0);
        assert_eq!(sink.every, 1);
    }
}
