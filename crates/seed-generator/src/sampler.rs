//! Weighted sampling over labeled outcomes.

use rand::Rng;
use seed_core::SeedError;

/// Draws a labeled outcome from a discrete probability distribution.
///
/// The cumulative-weight table is built once at construction; each draw is
/// a single uniform sample plus a binary search, so per-draw cost stays
/// flat across hundreds of thousands of calls regardless of distribution
/// size.
#[derive(Debug, Clone)]
pub struct WeightedSampler<T> {
    labels: Vec<T>,
    cumulative: Vec<f64>,
    total: f64,
}

impl<T> WeightedSampler<T> {
    /// Build a sampler from ordered (label, weight) pairs.
    ///
    /// Fails with a configuration error if the pairs are empty or any
    /// weight is non-positive or non-finite.
    pub fn new(pairs: Vec<(T, f64)>) -> Result<Self, SeedError> {
        if pairs.is_empty() {
            return Err(SeedError::Config(
                "weighted distribution must not be empty".to_string(),
            ));
        }

        let mut labels = Vec::with_capacity(pairs.len());
        let mut cumulative = Vec::with_capacity(pairs.len());
        let mut total = 0.0;

        for (i, (label, weight)) in pairs.into_iter().enumerate() {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(SeedError::Config(format!(
                    "weight at position {i} must be positive, got {weight}"
                )));
            }
            total += weight;
            labels.push(label);
            cumulative.push(total);
        }

        Ok(Self {
            labels,
            cumulative,
            total,
        })
    }

    /// Draw one label. The caller owns and threads the random source, so
    /// draws are reproducible for a seeded RNG.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> &T {
        let x = rng.random_range(0.0..self.total);
        let idx = self.cumulative.partition_point(|&c| c <= x);
        // partition_point can land one past the end if x rounds up to total
        &self.labels[idx.min(self.labels.len() - 1)]
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn empty_distribution_is_rejected() {
        let result = WeightedSampler::<&str>::new(vec![]);
        assert!(matches!(result, Err(SeedError::Config(_))));
    }

    #[test]
    fn zero_weights_are_rejected_at_construction() {
        let result = WeightedSampler::new(vec![("A", 0.0), ("B", 0.0)]);
        assert!(matches!(result, Err(SeedError::Config(_))));
    }

    #[test]
    fn negative_weight_is_rejected() {
        let result = WeightedSampler::new(vec![("A", 1.0), ("B", -2.0)]);
        assert!(matches!(result, Err(SeedError::Config(_))));
    }

    #[test]
    fn single_label_always_wins() {
        let sampler = WeightedSampler::new(vec![("only", 3.5)]).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(*sampler.sample(&mut rng), "only");
        }
    }

    #[test]
    fn draws_follow_the_configured_weights() {
        let sampler =
            WeightedSampler::new(vec![("a", 10.0), ("b", 70.0), ("c", 15.0), ("d", 5.0)]).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let mut counts = std::collections::HashMap::new();
        let n = 100_000;
        for _ in 0..n {
            *counts.entry(*sampler.sample(&mut rng)).or_insert(0u32) += 1;
        }

        let pct = |label: &str| counts[label] as f64 * 100.0 / n as f64;
        assert!((pct("a") - 10.0).abs() < 1.0);
        assert!((pct("b") - 70.0).abs() < 1.0);
        assert!((pct("c") - 15.0).abs() < 1.0);
        assert!((pct("d") - 5.0).abs() < 1.0);
    }

    #[test]
    fn draws_are_reproducible_for_the_same_seed() {
        let sampler = WeightedSampler::new(vec![("x", 1.0), ("y", 2.0), ("z", 3.0)]).unwrap();

        let mut rng1 = StdRng::seed_from_u64(7);
        let mut rng2 = StdRng::seed_from_u64(7);

        for _ in 0..1000 {
            assert_eq!(sampler.sample(&mut rng1), sampler.sample(&mut rng2));
        }
    }
}
