//! Activity-tier assignment for synthetic users.

use crate::sampler::WeightedSampler;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use seed_core::{ActivityTier, SeedError};

/// Tier distribution: HIGH 10%, NORMAL 70%, LOW 15%, NEW 5%.
const TIER_WEIGHTS: [(ActivityTier, f64); 4] = [
    (ActivityTier::High, 10.0),
    (ActivityTier::Normal, 70.0),
    (ActivityTier::Low, 15.0),
    (ActivityTier::New, 5.0),
];

/// NEW users were created within the last 30 days.
const NEW_USER_WINDOW_DAYS: i64 = 30;
/// All other tiers are spread across a 6-month window.
const ESTABLISHED_USER_WINDOW_DAYS: i64 = 180;

/// Buckets each synthetic user into an activity tier and draws a matching
/// creation timestamp.
///
/// Tier affects downstream transaction volume for HIGH/NORMAL/LOW, not the
/// creation-date window; only NEW gets the shorter window.
pub struct ActivityProfileAssigner {
    sampler: WeightedSampler<ActivityTier>,
    now: DateTime<Utc>,
}

impl ActivityProfileAssigner {
    /// `now` is the generation run's reference time; all creation windows
    /// end at it.
    pub fn new(now: DateTime<Utc>) -> Result<Self, SeedError> {
        let sampler = WeightedSampler::new(TIER_WEIGHTS.to_vec())?;
        Ok(Self { sampler, now })
    }

    /// Draw a tier and a creation timestamp uniform within that tier's
    /// window.
    pub fn assign<R: Rng>(&self, rng: &mut R) -> (ActivityTier, DateTime<Utc>) {
        let tier = *self.sampler.sample(rng);
        let window_days = match tier {
            ActivityTier::New => NEW_USER_WINDOW_DAYS,
            _ => ESTABLISHED_USER_WINDOW_DAYS,
        };
        let window_micros = window_days * 24 * 60 * 60 * 1_000_000;
        let age = rng.random_range(0..window_micros);
        (tier, self.now - Duration::microseconds(age))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn new_users_fall_in_the_30_day_window() {
        let now = Utc::now();
        let assigner = ActivityProfileAssigner::new(now).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..10_000 {
            let (tier, created_at) = assigner.assign(&mut rng);
            assert!(created_at <= now);
            let floor = match tier {
                ActivityTier::New => now - Duration::days(NEW_USER_WINDOW_DAYS),
                _ => now - Duration::days(ESTABLISHED_USER_WINDOW_DAYS),
            };
            assert!(created_at >= floor, "{tier:?} user created at {created_at}");
        }
    }

    #[test]
    fn tier_proportions_match_the_distribution() {
        let assigner = ActivityProfileAssigner::new(Utc::now()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let mut counts = std::collections::HashMap::new();
        let n = 20_000;
        for _ in 0..n {
            let (tier, _) = assigner.assign(&mut rng);
            *counts.entry(tier).or_insert(0u32) += 1;
        }

        let pct = |tier: ActivityTier| counts[&tier] as f64 * 100.0 / n as f64;
        assert!((pct(ActivityTier::High) - 10.0).abs() < 2.0);
        assert!((pct(ActivityTier::Normal) - 70.0).abs() < 2.0);
        assert!((pct(ActivityTier::Low) - 15.0).abs() < 2.0);
        assert!((pct(ActivityTier::New) - 5.0).abs() < 2.0);
    }
}
