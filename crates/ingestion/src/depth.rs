//! Order-book depth blob decoding.
//!
//! Snapshots store each side as interleaved little-endian f32 pairs
//! (price0, volume0, price1, volume1, ...). An empty blob is a valid
//! side with no liquidity reported.

use barrier_core::{Error, OrderBookSnapshot, Result};
use serde::{Deserialize, Serialize};

/// Bytes per (price, volume) pair: two little-endian f32 values.
const PAIR_BYTES: usize = 8;

/// One decoded price level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BookLevel {
    /// Level price.
    pub price: f64,
    /// Resting volume at the level.
    pub volume: f64,
}

/// Decode one side of a snapshot into price levels.
///
/// A blob whose length is not a whole number of pairs is malformed.
pub fn decode_levels(blob: &[u8]) -> Result<Vec<BookLevel>> {
    if blob.len() % PAIR_BYTES != 0 {
        return Err(Error::depth(format!(
            "blob length {} is not a whole number of price/volume pairs",
            blob.len()
        )));
    }

    let mut levels = Vec::with_capacity(blob.len() / PAIR_BYTES);
    for pair in blob.chunks_exact(PAIR_BYTES) {
        let price = f32::from_le_bytes([pair[0], pair[1], pair[2], pair[3]]) as f64;
        let volume = f32::from_le_bytes([pair[4], pair[5], pair[6], pair[7]]) as f64;
        levels.push(BookLevel { price, volume });
    }
    Ok(levels)
}

/// Sum the volume components of one side.
pub fn side_volume(levels: &[BookLevel]) -> f64 {
    levels.iter().map(|l| l.volume).sum()
}

/// Order-book imbalance for one snapshot:
/// (bidVol - askVol) / (bidVol + askVol), or 0 when neither side reports
/// any liquidity.
pub fn snapshot_imbalance(snapshot: &OrderBookSnapshot) -> Result<f64> {
    let bids = decode_levels(&snapshot.bids)?;
    let asks = decode_levels(&snapshot.asks)?;

    let bid_vol = side_volume(&bids);
    let ask_vol = side_volume(&asks);
    let total = bid_vol + ask_vol;

    if total > 0.0 {
        Ok((bid_vol - ask_vol) / total)
    } else {
        Ok(0.0)
    }
}
