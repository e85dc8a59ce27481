//! Indicator engine.
//!
//! Merges the four per-bar indicators onto one timeline per symbol and
//! emits complete feature rows. A row whose RSI or volatility is still
//! inside the warm-up window is dropped, never imputed; OBI and TFI are
//! total by construction.

use barrier_core::{Bar, Config, FeatureRow, OrderBookSnapshot};
use crate::{obi, rsi::Rsi, volatility::RollingStdDev};

/// Indicator computation engine for one symbol's bar series.
pub struct IndicatorEngine {
    /// Bar width in milliseconds (for the snapshot join).
    interval_ms: i64,
    /// RSI period.
    rsi_period: usize,
    /// Volatility window.
    volatility_window: usize,
}

impl IndicatorEngine {
    /// Create a new indicator engine from configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            interval_ms: config.bars.interval_ms,
            rsi_period: config.indicators.rsi_period,
            volatility_window: config.indicators.volatility_window,
        }
    }

    /// Compute feature rows for one symbol's bars and snapshots.
    pub fn compute_rows(&self, bars: &[Bar], snapshots: &[OrderBookSnapshot]) -> Vec<FeatureRow> {
        let bar_ts: Vec<_> = bars.iter().map(|b| b.ts).collect();
        let points = obi::imbalance_points(snapshots);
        let obi_values = obi::align_to_bars(&points, &bar_ts, self.interval_ms);

        let mut rsi = Rsi::new(self.rsi_period);
        let mut volatility = RollingStdDev::new(self.volatility_window);
        let mut rows = Vec::with_capacity(bars.len());

        for (bar, &obi_value) in bars.iter().zip(&obi_values) {
            let rsi_value = rsi.update(bar.close);
            let vol_value = volatility.update(bar.close);

            if let (Some(rsi_value), Some(vol_value)) = (rsi_value, vol_value) {
                rows.push(FeatureRow {
                    ts: bar.ts,
                    rsi: rsi_value,
                    obi: obi_value,
                    tfi: bar.trade_flow_imbalance(),
                    volatility: vol_value,
                    close: bar.close,
                    high: bar.high,
                    low: bar.low,
                });
            }
        }
        rows
    }
}
