//! Fixed-interval bar building from trade prints.
//!
//! Resamples raw trades into OHLC bars with per-side aggressor volume.
//! An interval with no trades produces no bar, so gaps in trading produce
//! gaps in the bar series.

use barrier_core::{ts_to_bar, AggTrade, Bar, TimestampMs};
use std::collections::BTreeMap;

/// A bar that's currently being built.
#[derive(Debug, Clone)]
struct BarInProgress {
    open: Option<f64>,
    high: f64,
    low: f64,
    close: f64,
    buy_volume: f64,
    sell_volume: f64,
    trade_count: u32,
}

impl BarInProgress {
    fn new() -> Self {
        Self {
            open: None,
            high: f64::NEG_INFINITY,
            low: f64::INFINITY,
            close: 0.0,
            buy_volume: 0.0,
            sell_volume: 0.0,
            trade_count: 0,
        }
    }

    fn add_trade(&mut self, price: f64, quantity: f64, buy_initiated: bool) {
        if self.open.is_none() {
            self.open = Some(price);
        }
        self.high = self.high.max(price);
        self.low = self.low.min(price);
        self.close = price;
        if buy_initiated {
            self.buy_volume += quantity;
        } else {
            self.sell_volume += quantity;
        }
        self.trade_count += 1;
    }

    fn to_bar(&self, ts: TimestampMs) -> Option<Bar> {
        let open = self.open?;

        Some(Bar {
            ts,
            open,
            high: self.high,
            low: self.low,
            close: self.close,
            buy_volume: self.buy_volume,
            sell_volume: self.sell_volume,
            trade_count: self.trade_count,
        })
    }
}

/// Builder for fixed-interval bars from one symbol's trades.
pub struct BarBuilder {
    /// Bar width in milliseconds.
    interval_ms: i64,
    /// Bars being built, keyed by bar boundary timestamp.
    bars: BTreeMap<TimestampMs, BarInProgress>,
}

impl BarBuilder {
    /// Create a new bar builder for the given interval.
    pub fn new(interval_ms: i64) -> Self {
        assert!(interval_ms > 0, "Bar interval must be positive");
        Self {
            interval_ms,
            bars: BTreeMap::new(),
        }
    }

    /// Add a trade.
    pub fn add_trade(&mut self, trade: &AggTrade) {
        let ts = ts_to_bar(trade.ts_ms, self.interval_ms);

        self.bars
            .entry(ts)
            .or_insert_with(BarInProgress::new)
            .add_trade(trade.price, trade.quantity, trade.is_buy_initiated());
    }

    /// Add multiple trades.
    pub fn add_trades(&mut self, trades: &[AggTrade]) {
        for trade in trades {
            self.add_trade(trade);
        }
    }

    /// Get the number of bars currently being built.
    pub fn bar_count(&self) -> usize {
        self.bars.len()
    }

    /// Finalize the builder into bars ordered by timestamp.
    pub fn into_bars(self) -> Vec<Bar> {
        self.bars
            .into_iter()
            .filter_map(|(ts, bar)| bar.to_bar(ts))
            .collect()
    }
}
