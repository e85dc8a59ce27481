//! Forward-window barrier labeling.
//!
//! Each bar is labeled by which of two volatility-scaled price barriers
//! the market touches first within a fixed horizon: upper first is BUY,
//! lower first is SELL, neither (or both inside a single bar) is HOLD.
//! The last `horizon` rows of a series have insufficient look-ahead and
//! produce no samples.

use barrier_core::{config::BarrierConfig, FeatureRow, Label, LabeledSample};

/// Barrier labeler for one symbol's feature rows.
pub struct BarrierLabeler {
    config: BarrierConfig,
}

impl BarrierLabeler {
    /// Create a new labeler.
    pub fn new(config: BarrierConfig) -> Self {
        Self { config }
    }

    /// Barrier half-width for one row.
    ///
    /// Volatility-scaled, floored at a fraction of the current price so a
    /// near-zero volatility reading cannot produce barriers inside the
    /// micro-noise band.
    #[inline]
    pub fn half_width(&self, close: f64, volatility: f64) -> f64 {
        (volatility * self.config.multiplier).max(close * self.config.min_move_frac)
    }

    /// Label one symbol's rows, in chronological order.
    ///
    /// Output length is exactly `max(0, rows.len() - horizon)`.
    pub fn label(&self, rows: &[FeatureRow]) -> Vec<LabeledSample> {
        let horizon = self.config.horizon;
        if rows.len() <= horizon {
            return Vec::new();
        }

        let mut samples = Vec::with_capacity(rows.len() - horizon);
        for i in 0..rows.len() - horizon {
            let row = &rows[i];
            let width = self.half_width(row.close, row.volatility);
            let upper = row.close + width;
            let lower = row.close - width;

            let mut label = Label::Hold;
            for future in &rows[i + 1..=i + horizon] {
                let touched_upper = future.high >= upper;
                let touched_lower = future.low <= lower;

                if touched_upper && touched_lower {
                    // Whipsaw bar: both barriers inside one bar is no signal.
                    break;
                } else if touched_upper {
                    label = Label::Buy;
                    break;
                } else if touched_lower {
                    label = Label::Sell;
                    break;
                }
            }

            samples.push(LabeledSample {
                features: row.features(),
                label,
            });
        }
        samples
    }
}
