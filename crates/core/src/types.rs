//! Core data types for the barrier-pipeline system.

use serde::{Deserialize, Serialize};

/// Timestamp in milliseconds since Unix epoch (UTC).
pub type TimestampMs = i64;

/// Size/quantity type.
pub type Size = f64;

/// Floor a timestamp to its bar boundary for the given interval.
#[inline]
pub fn ts_to_bar(ts_ms: TimestampMs, interval_ms: i64) -> TimestampMs {
    (ts_ms / interval_ms) * interval_ms
}

/// A single aggregated trade print from the exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggTrade {
    /// Timestamp in milliseconds.
    pub ts_ms: TimestampMs,
    /// Instrument identifier.
    pub symbol: String,
    /// Trade price.
    pub price: f64,
    /// Trade size.
    pub quantity: Size,
    /// True when the buyer was the resting (maker) side, i.e. the trade
    /// was initiated by an aggressive seller.
    pub is_buyer_maker: bool,
}

impl AggTrade {
    /// Whether the trade was initiated by an aggressive buyer.
    #[inline]
    pub fn is_buy_initiated(&self) -> bool {
        !self.is_buyer_maker
    }
}

/// A point-in-time depth snapshot with raw binary sides.
///
/// `bids` and `asks` hold interleaved little-endian f32 pairs
/// (price0, volume0, price1, volume1, ...). An empty blob is a valid
/// side reporting no liquidity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    /// Timestamp in milliseconds.
    pub ts_ms: TimestampMs,
    /// Instrument identifier.
    pub symbol: String,
    /// Bid side blob.
    pub bids: Vec<u8>,
    /// Ask side blob.
    pub asks: Vec<u8>,
}

/// Fixed-interval OHLC bar with per-side aggressor volume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    /// Bar boundary timestamp (ms).
    pub ts: TimestampMs,
    /// Open price.
    pub open: f64,
    /// High price.
    pub high: f64,
    /// Low price.
    pub low: f64,
    /// Close price.
    pub close: f64,
    /// Volume initiated by aggressive buyers.
    pub buy_volume: Size,
    /// Volume initiated by aggressive sellers.
    pub sell_volume: Size,
    /// Number of trades in the interval.
    pub trade_count: u32,
}

impl Bar {
    /// Total traded volume.
    #[inline]
    pub fn total_volume(&self) -> Size {
        self.buy_volume + self.sell_volume
    }

    /// Trade-flow imbalance: (buyVol - sellVol) / max(buyVol + sellVol, 1).
    ///
    /// The unit denominator floor makes a zero-volume bar read as 0 rather
    /// than a division fault.
    #[inline]
    pub fn trade_flow_imbalance(&self) -> f64 {
        (self.buy_volume - self.sell_volume) / self.total_volume().max(1.0)
    }
}

/// Class label assigned by the barrier scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Label {
    /// No barrier touched within the horizon, or both touched in one bar.
    Hold = 0,
    /// Upper barrier touched first.
    Buy = 1,
    /// Lower barrier touched first.
    Sell = 2,
}

impl Label {
    /// Class index as handed to the training consumer.
    #[inline]
    pub fn class_index(self) -> u8 {
        self as u8
    }

    /// Parse a class index back into a label.
    pub fn from_class_index(index: u8) -> Option<Label> {
        match index {
            0 => Some(Label::Hold),
            1 => Some(Label::Buy),
            2 => Some(Label::Sell),
            _ => None,
        }
    }
}

/// The four model input features for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVec {
    /// Relative Strength Index, in [0, 100].
    pub rsi: f64,
    /// Order-book imbalance, in [-1, 1].
    pub obi: f64,
    /// Trade-flow imbalance, in [-1, 1].
    pub tfi: f64,
    /// Rolling close-price standard deviation, >= 0.
    pub volatility: f64,
}

impl FeatureVec {
    /// Flatten into the column order the training consumer expects.
    #[inline]
    pub fn to_array(self) -> [f64; 4] {
        [self.rsi, self.obi, self.tfi, self.volatility]
    }
}

/// One bar's complete indicator set plus the transient price fields the
/// labeler scans forward over.
///
/// `close`/`high`/`low` are stripped once the row becomes a final feature
/// vector; they never reach the training consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureRow {
    /// Bar boundary timestamp (ms).
    pub ts: TimestampMs,
    pub rsi: f64,
    pub obi: f64,
    pub tfi: f64,
    pub volatility: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
}

impl FeatureRow {
    /// Strip the transient price fields.
    #[inline]
    pub fn features(&self) -> FeatureVec {
        FeatureVec {
            rsi: self.rsi,
            obi: self.obi,
            tfi: self.tfi,
            volatility: self.volatility,
        }
    }
}

/// One labeled training example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSample {
    /// Final feature vector.
    pub features: FeatureVec,
    /// Assigned class.
    pub label: Label,
}

/// Columnar dataset handed to the training consumer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Feature matrix rows.
    pub x: Vec<FeatureVec>,
    /// Label vector, aligned with `x`.
    pub y: Vec<Label>,
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty dataset with room for `capacity` samples.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.y.len()
    }

    /// Whether the dataset holds no samples.
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Append one sample.
    pub fn push(&mut self, sample: LabeledSample) {
        self.x.push(sample.features);
        self.y.push(sample.label);
    }

    /// Append a run of samples.
    pub fn extend(&mut self, samples: impl IntoIterator<Item = LabeledSample>) {
        for sample in samples {
            self.push(sample);
        }
    }

    /// Per-class sample counts, indexed by class index.
    pub fn label_counts(&self) -> [usize; 3] {
        let mut counts = [0usize; 3];
        for label in &self.y {
            counts[label.class_index() as usize] += 1;
        }
        counts
    }
}
