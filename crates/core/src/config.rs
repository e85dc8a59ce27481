//! Configuration structures for the barrier-pipeline system.

use serde::{Deserialize, Serialize};

/// Main configuration for the dataset pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Bar resampling configuration.
    pub bars: BarConfig,
    /// Indicator warm-up windows.
    pub indicators: IndicatorConfig,
    /// Barrier labeling configuration.
    pub barrier: BarrierConfig,
    /// Class balancing configuration.
    pub balance: BalanceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bars: BarConfig::default(),
            indicators: IndicatorConfig::default(),
            barrier: BarrierConfig::default(),
            balance: BalanceConfig::default(),
        }
    }
}

/// Bar resampling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarConfig {
    /// Bar width in milliseconds.
    pub interval_ms: i64,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self { interval_ms: 60_000 }
    }
}

/// Indicator warm-up windows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// RSI period (price changes absorbed before the first value).
    pub rsi_period: usize,
    /// Trailing window for the close-price standard deviation.
    pub volatility_window: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            volatility_window: 20,
        }
    }
}

/// Barrier labeling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarrierConfig {
    /// Forward scan horizon in bars.
    pub horizon: usize,
    /// Barrier half-width as a multiple of current volatility.
    pub multiplier: f64,
    /// Minimum half-width as a fraction of the current price.
    pub min_move_frac: f64,
}

impl Default for BarrierConfig {
    fn default() -> Self {
        Self {
            horizon: 15,
            multiplier: 2.0,
            min_move_frac: 0.002,
        }
    }
}

/// Class balancing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceConfig {
    /// Retained boring-HOLD samples are capped at this multiple of the
    /// larger signal class.
    pub boring_cap_multiplier: usize,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            boring_cap_multiplier: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.bars.interval_ms, 60_000);
        assert_eq!(config.indicators.rsi_period, 14);
        assert_eq!(config.indicators.volatility_window, 20);
        assert_eq!(config.barrier.horizon, 15);
        assert_eq!(config.barrier.multiplier, 2.0);
        assert_eq!(config.barrier.min_move_frac, 0.002);
        assert_eq!(config.balance.boring_cap_multiplier, 2);
    }
}
