//! Indicator computation for the barrier-pipeline system.
//!
//! This crate handles:
//! - Wilder-smoothed RSI over bar closes
//! - Rolling close-price standard deviation
//! - Order-book imbalance alignment onto the bar grid
//! - The indicator engine merging everything into feature rows

pub mod engine;
pub mod obi;
pub mod rsi;
pub mod volatility;

pub use engine::IndicatorEngine;
pub use obi::{align_to_bars, imbalance_points, ObiPoint};
pub use rsi::Rsi;
pub use volatility::RollingStdDev;
