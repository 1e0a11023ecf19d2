//! Globally-unique, recency-skewed transaction timestamps.

use chrono::{DateTime, Utc};
use rand::Rng;
use seed_core::SeedError;
use std::collections::HashSet;

/// Transaction timestamps fall in the 90-day window ending at "now".
const WINDOW_DAYS: i64 = 90;

/// Decay rate of the truncated exponential across the window. At 3.0,
/// roughly 57% of timestamps land in the most recent 30 days.
const DECAY_RATE: f64 = 3.0;

/// Fresh draws attempted before falling back to jitter on collision.
const FRESH_ATTEMPTS: u32 = 5;

/// Jittered attempts before the allocator gives up. The jitter range
/// doubles every few attempts, so the search widens well past sub-second
/// offsets before failing.
const JITTER_ATTEMPTS: u32 = 40;

const MICROS_PER_DAY: i64 = 24 * 60 * 60 * 1_000_000;

/// Allocates creation timestamps that are pairwise distinct across the
/// entire run at microsecond resolution.
///
/// Density increases toward "now" via an inverse-CDF draw from a truncated
/// exponential, so a single uniform sample produces the recency skew. The
/// seen-set is the one piece of session-scoped mutable state in the
/// generators and must stay owned by exactly one allocator instance.
pub struct TimestampAllocator {
    now_micros: i64,
    window_micros: i64,
    seen: HashSet<i64>,
}

impl TimestampAllocator {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now_micros: now.timestamp_micros(),
            window_micros: WINDOW_DAYS * MICROS_PER_DAY,
            seen: HashSet::new(),
        }
    }

    /// Draw a unique timestamp.
    ///
    /// On collision, retries with fresh draws up to a small budget, then
    /// perturbs the draw with widening jitter; exhausting both budgets is a
    /// generation error that aborts the phase.
    pub fn allocate<R: Rng>(&mut self, rng: &mut R) -> Result<DateTime<Utc>, SeedError> {
        for _ in 0..FRESH_ATTEMPTS {
            let micros = self.draw(rng);
            if self.seen.insert(micros) {
                return Ok(to_datetime(micros, self.now_micros));
            }
        }

        // Sub-second jitter around one more draw, widening as needed.
        let base = self.draw(rng);
        let mut spread: i64 = 500_000;
        for attempt in 0..JITTER_ATTEMPTS {
            let jittered = (base + rng.random_range(-spread..=spread))
                .clamp(self.now_micros - self.window_micros, self.now_micros);
            if self.seen.insert(jittered) {
                return Ok(to_datetime(jittered, self.now_micros));
            }
            if attempt % 4 == 3 {
                spread = spread.saturating_mul(2);
            }
        }

        Err(SeedError::Generation(format!(
            "could not allocate a unique timestamp after {} attempts ({} already issued)",
            FRESH_ATTEMPTS + JITTER_ATTEMPTS,
            self.seen.len()
        )))
    }

    /// Number of timestamps issued so far.
    pub fn issued(&self) -> usize {
        self.seen.len()
    }

    /// Inverse CDF of an exponential truncated to the window, measured as
    /// age before "now".
    fn draw<R: Rng>(&self, rng: &mut R) -> i64 {
        let u: f64 = rng.random_range(0.0..1.0);
        let cap = 1.0 - (-DECAY_RATE).exp();
        let age_frac = -(1.0 - u * cap).ln() / DECAY_RATE;
        self.now_micros - (age_frac * self.window_micros as f64) as i64
    }
}

fn to_datetime(micros: i64, fallback_micros: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_micros(micros)
        .or_else(|| DateTime::from_timestamp_micros(fallback_micros))
        .unwrap_or_else(Utc::now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn timestamps_fall_inside_the_window() {
        let now = Utc::now();
        let mut allocator = TimestampAllocator::new(now);
        let mut rng = StdRng::seed_from_u64(42);

        let floor = now - Duration::days(WINDOW_DAYS);
        for _ in 0..10_000 {
            let ts = allocator.allocate(&mut rng).unwrap();
            assert!(ts <= now);
            assert!(ts >= floor);
        }
    }

    #[test]
    fn all_issued_timestamps_are_distinct() {
        let mut allocator = TimestampAllocator::new(Utc::now());
        let mut rng = StdRng::seed_from_u64(42);

        let mut seen = HashSet::new();
        for _ in 0..50_000 {
            let ts = allocator.allocate(&mut rng).unwrap();
            assert!(seen.insert(ts.timestamp_micros()), "duplicate {ts}");
        }
        assert_eq!(allocator.issued(), 50_000);
    }

    #[test]
    fn timestamps_skew_recent() {
        let now = Utc::now();
        let mut allocator = TimestampAllocator::new(now);
        let mut rng = StdRng::seed_from_u64(42);

        let cutoff = now - Duration::days(30);
        let n = 20_000;
        let recent = (0..n)
            .filter(|_| allocator.allocate(&mut rng).unwrap() >= cutoff)
            .count();

        // Uniform would give ~33%; the exponential skew should push well past it.
        assert!(
            recent as f64 / n as f64 > 0.5,
            "only {recent}/{n} in the last 30 days"
        );
    }

    #[test]
    fn collisions_are_resolved_by_jitter() {
        let now = Utc::now();
        let mut allocator = TimestampAllocator::new(now);
        let mut rng = StdRng::seed_from_u64(42);

        // Pre-fill a dense region around a known draw so the next draws
        // have a realistic chance of colliding; the allocator must still
        // come back with something unique.
        let base = now.timestamp_micros();
        for off in 0..1000 {
            allocator.seen.insert(base - off);
        }

        for _ in 0..1000 {
            let ts = allocator.allocate(&mut rng).unwrap();
            assert!(ts <= now);
        }
    }
}
