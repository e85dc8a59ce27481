//! Class balancing with confuser retention.
//!
//! Barrier labeling leaves HOLD heavily dominant. The balancer keeps every
//! BUY and SELL sample, keeps every "confuser" in full (a HOLD sample whose
//! RSI alone reads as a directional signal, i.e. a hard negative), caps the
//! remaining HOLD population at a multiple of the larger signal class, and
//! shuffles the result. BUY and SELL are never rebalanced against each
//! other.

use barrier_core::{config::BalanceConfig, Dataset, Label};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

/// RSI below this reads as oversold.
const RSI_OVERSOLD: f64 = 30.0;
/// RSI above this reads as overbought.
const RSI_OVERBOUGHT: f64 = 70.0;

/// Dataset balancer.
pub struct DatasetBalancer {
    config: BalanceConfig,
}

impl DatasetBalancer {
    /// Create a new balancer.
    pub fn new(config: BalanceConfig) -> Self {
        Self { config }
    }

    /// Whether a HOLD sample is a hard negative worth keeping in full.
    #[inline]
    fn is_confuser(rsi: f64) -> bool {
        rsi < RSI_OVERSOLD || rsi > RSI_OVERBOUGHT
    }

    /// Balance the dataset with the given random source.
    ///
    /// With no BUY and no SELL samples there is nothing to balance against
    /// and the input is returned unchanged.
    pub fn balance_with<R: Rng + ?Sized>(&self, dataset: &Dataset, rng: &mut R) -> Dataset {
        let mut buys = Vec::new();
        let mut sells = Vec::new();
        let mut confusers = Vec::new();
        let mut boring = Vec::new();

        for (i, &label) in dataset.y.iter().enumerate() {
            match label {
                Label::Buy => buys.push(i),
                Label::Sell => sells.push(i),
                Label::Hold => {
                    if Self::is_confuser(dataset.x[i].rsi) {
                        confusers.push(i);
                    } else {
                        boring.push(i);
                    }
                }
            }
        }

        let n_signals = buys.len().max(sells.len());
        if n_signals == 0 {
            return dataset.clone();
        }

        info!(
            buys = buys.len(),
            sells = sells.len(),
            confusers = confusers.len(),
            boring = boring.len(),
            "balancing dataset"
        );

        // Uniform sample without replacement of the boring HOLD population.
        let keep_boring = boring
            .len()
            .min(self.config.boring_cap_multiplier * n_signals);
        boring.shuffle(rng);
        boring.truncate(keep_boring);

        let mut selected = buys;
        selected.extend(sells);
        selected.extend(confusers);
        selected.extend(boring);
        selected.shuffle(rng);

        let mut balanced = Dataset::with_capacity(selected.len());
        for i in selected {
            balanced.x.push(dataset.x[i]);
            balanced.y.push(dataset.y[i]);
        }
        balanced
    }

    /// Balance the dataset with a fresh thread-local random source.
    pub fn balance(&self, dataset: &Dataset) -> Dataset {
        self.balance_with(dataset, &mut rand::thread_rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrier_core::{FeatureVec, LabeledSample};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Build a sample whose `obi` field doubles as a unique marker.
    fn sample(label: Label, rsi: f64, marker: f64) -> LabeledSample {
        LabeledSample {
            features: FeatureVec {
                rsi,
                obi: marker,
                tfi: 0.0,
                volatility: 1.0,
            },
            label,
        }
    }

    fn build_dataset(samples: Vec<LabeledSample>) -> Dataset {
        let mut dataset = Dataset::new();
        dataset.extend(samples);
        dataset
    }

    fn test_mix() -> Dataset {
        let mut samples = Vec::new();
        let mut marker = 0.0;
        for _ in 0..2 {
            marker += 1.0;
            samples.push(sample(Label::Buy, 80.0, marker));
        }
        marker += 1.0;
        samples.push(sample(Label::Sell, 20.0, marker));
        for rsi in [20.0, 75.0, 80.0] {
            marker += 1.0;
            samples.push(sample(Label::Hold, rsi, marker));
        }
        for _ in 0..10 {
            marker += 1.0;
            samples.push(sample(Label::Hold, 50.0, marker));
        }
        build_dataset(samples)
    }

    #[test]
    fn test_signals_and_confusers_retained() {
        let dataset = test_mix();
        let balancer = DatasetBalancer::new(BalanceConfig::default());
        let mut rng = StdRng::seed_from_u64(42);
        let balanced = balancer.balance_with(&dataset, &mut rng);

        // 2 BUY + 1 SELL + 3 confusers + min(10, 2 * 2) boring.
        assert_eq!(balanced.len(), 10);
        assert_eq!(balanced.label_counts(), [7, 2, 1]);

        // Every signal and every confuser appears exactly once.
        for marker in 1..=6 {
            let count = balanced
                .x
                .iter()
                .filter(|f| f.obi == marker as f64)
                .count();
            assert_eq!(count, 1, "marker {marker} retained exactly once");
        }
    }

    #[test]
    fn test_boring_hold_bound() {
        let dataset = test_mix();
        let balancer = DatasetBalancer::new(BalanceConfig::default());
        let mut rng = StdRng::seed_from_u64(7);
        let balanced = balancer.balance_with(&dataset, &mut rng);

        let boring = balanced
            .x
            .iter()
            .zip(&balanced.y)
            .filter(|(f, &y)| y == Label::Hold && (30.0..=70.0).contains(&f.rsi))
            .count();
        assert!(boring <= 4);
    }

    #[test]
    fn test_no_signals_returns_input_unchanged() {
        // All HOLD, every RSI inside [30, 70]: nothing to balance against.
        let dataset = build_dataset(
            (0..8)
                .map(|i| sample(Label::Hold, 50.0, i as f64))
                .collect(),
        );
        let balancer = DatasetBalancer::new(BalanceConfig::default());
        let mut rng = StdRng::seed_from_u64(1);
        let balanced = balancer.balance_with(&dataset, &mut rng);

        assert_eq!(balanced, dataset);
    }

    #[test]
    fn test_small_boring_pool_kept_whole() {
        let mut samples = vec![sample(Label::Buy, 60.0, 1.0)];
        samples.push(sample(Label::Hold, 50.0, 2.0));
        let dataset = build_dataset(samples);

        let balancer = DatasetBalancer::new(BalanceConfig::default());
        let mut rng = StdRng::seed_from_u64(3);
        let balanced = balancer.balance_with(&dataset, &mut rng);

        // Cap is 2 but only one boring sample exists.
        assert_eq!(balanced.len(), 2);
        assert_eq!(balanced.label_counts(), [1, 1, 0]);
    }

    #[test]
    fn test_seeded_runs_agree() {
        let dataset = test_mix();
        let balancer = DatasetBalancer::new(BalanceConfig::default());

        let a = balancer.balance_with(&dataset, &mut StdRng::seed_from_u64(99));
        let b = balancer.balance_with(&dataset, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
