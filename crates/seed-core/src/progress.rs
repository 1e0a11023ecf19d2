//! Progress reporting types for batch flushes.

use std::fmt;
use std::time::Duration;

/// The two ordered phases of a seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Users,
    Transactions,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Users => write!(f, "users"),
            Phase::Transactions => write!(f, "transactions"),
        }
    }
}

/// Emitted once per successful batch flush.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub phase: Phase,
    /// Entities persisted so far in this phase, including this flush.
    pub completed: u64,
    /// Total entities this phase will persist.
    pub total: u64,
    /// Elapsed time since the phase started.
    pub elapsed: Duration,
}

impl ProgressEvent {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.completed as f64 * 100.0 / self.total as f64
        }
    }

    pub fn rows_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.completed as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Destination for progress events. Implementations decide whether events
/// go to the console, structured logs, or a metrics emitter.
pub trait ProgressSink {
    fn on_flush(&mut self, event: &ProgressEvent);
}

/// No-op sink for callers that do not care about progress.
impl ProgressSink for () {
    fn on_flush(&mut self, _event: &ProgressEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_handles_zero_total() {
        let event = ProgressEvent {
            phase: Phase::Users,
            completed: 0,
            total: 0,
            elapsed: Duration::ZERO,
        };
        assert_eq!(event.percent(), 100.0);
    }

    #[test]
    fn rows_per_second() {
        let event = ProgressEvent {
            phase: Phase::Transactions,
            completed: 1000,
            total: 2000,
            elapsed: Duration::from_secs(10),
        };
        assert_eq!(event.rows_per_second(), 100.0);
        assert_eq!(event.percent(), 50.0);
    }
}
