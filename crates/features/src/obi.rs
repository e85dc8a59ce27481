//! Order-book imbalance alignment.
//!
//! Depth snapshots are sampled on their own clock, so their imbalance
//! series is joined onto the bar timeline as a last-observation-carried-
//! forward series: each bar takes the most recent snapshot observed up to
//! the end of its interval, and bars before the first snapshot fall back
//! to 0.

use barrier_core::{OrderBookSnapshot, TimestampMs};
use barrier_ingestion::snapshot_imbalance;
use tracing::warn;

/// A timestamped imbalance observation.
#[derive(Debug, Clone, Copy)]
pub struct ObiPoint {
    /// Snapshot timestamp (ms).
    pub ts_ms: TimestampMs,
    /// Imbalance in [-1, 1].
    pub value: f64,
}

/// Compute imbalance points from raw snapshots.
///
/// A snapshot with a malformed depth blob is skipped; it never aborts the
/// symbol.
pub fn imbalance_points(snapshots: &[OrderBookSnapshot]) -> Vec<ObiPoint> {
    let mut points = Vec::with_capacity(snapshots.len());
    for snapshot in snapshots {
        match snapshot_imbalance(snapshot) {
            Ok(value) => points.push(ObiPoint {
                ts_ms: snapshot.ts_ms,
                value,
            }),
            Err(err) => warn!(
                symbol = %snapshot.symbol,
                ts_ms = snapshot.ts_ms,
                %err,
                "skipping malformed depth snapshot"
            ),
        }
    }
    points
}

/// Align imbalance points onto a bar grid.
///
/// Each bar takes the last point with `ts_ms < bar_ts + interval_ms`,
/// carried forward across bar gaps; bars before the first point get 0.
/// With no points at all, every bar gets 0.
pub fn align_to_bars(points: &[ObiPoint], bar_ts: &[TimestampMs], interval_ms: i64) -> Vec<f64> {
    let mut values = Vec::with_capacity(bar_ts.len());
    let mut next = 0usize;
    let mut current: Option<f64> = None;

    for &ts in bar_ts {
        let interval_end = ts + interval_ms;
        while next < points.len() && points[next].ts_ms < interval_end {
            current = Some(points[next].value);
            next += 1;
        }
        values.push(current.unwrap_or(0.0));
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(ts_ms: i64, value: f64) -> ObiPoint {
        ObiPoint { ts_ms, value }
    }

    fn blob(pairs: &[(f32, f32)]) -> Vec<u8> {
        let mut bytes = Vec::new();
        for (price, volume) in pairs {
            bytes.extend_from_slice(&price.to_le_bytes());
            bytes.extend_from_slice(&volume.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn test_last_observation_wins_within_bar() {
        let points = [point(60_500, 0.1), point(60_900, 0.3)];
        let values = align_to_bars(&points, &[60_000], 60_000);
        assert_eq!(values, vec![0.3]);
    }

    #[test]
    fn test_forward_fill_across_gaps() {
        // One snapshot in the first bar, none afterwards.
        let points = [point(60_500, 0.2)];
        let values = align_to_bars(&points, &[60_000, 120_000, 240_000], 60_000);
        assert_eq!(values, vec![0.2, 0.2, 0.2]);
    }

    #[test]
    fn test_leading_gap_is_zero() {
        let points = [point(180_500, -0.4)];
        let values = align_to_bars(&points, &[60_000, 120_000, 180_000], 60_000);
        assert_eq!(values, vec![0.0, 0.0, -0.4]);
    }

    #[test]
    fn test_no_snapshots_all_zero() {
        let values = align_to_bars(&[], &[60_000, 120_000], 60_000);
        assert_eq!(values, vec![0.0, 0.0]);
    }

    #[test]
    fn test_malformed_snapshot_skipped() {
        let good = OrderBookSnapshot {
            ts_ms: 60_000,
            symbol: "BTCUSDT".to_string(),
            bids: blob(&[(100.0, 2.0)]),
            asks: blob(&[(101.0, 1.0)]),
        };
        let bad = OrderBookSnapshot {
            ts_ms: 60_500,
            symbol: "BTCUSDT".to_string(),
            bids: vec![0u8; 5],
            asks: Vec::new(),
        };

        let points = imbalance_points(&[good, bad]);
        assert_eq!(points.len(), 1);
        assert!((points[0].value - (1.0 / 3.0)).abs() < 1e-6);
    }
}
