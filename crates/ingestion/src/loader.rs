//! SQLite capture loading.
//!
//! The collector materializes both raw streams in a SQLite database:
//! `agg_trades (time, symbol, price, quantity, is_buyer_maker)` and
//! `order_books (time, symbol, bids, asks)`, both with seconds-resolution
//! REAL timestamps and ordered by time. This module reads them back and
//! groups records by symbol for the per-symbol pipeline.

use barrier_core::{AggTrade, Error, OrderBookSnapshot, Result, TimestampMs};
use chrono::DateTime;
use rusqlite::Connection;
use std::collections::BTreeMap;
use tracing::info;

/// Both raw streams for one symbol, ordered by time.
#[derive(Debug, Clone, Default)]
pub struct SymbolStreams {
    /// Trade prints.
    pub trades: Vec<AggTrade>,
    /// Depth snapshots.
    pub snapshots: Vec<OrderBookSnapshot>,
}

/// Convert a seconds-resolution capture timestamp to milliseconds.
#[inline]
fn secs_to_ms(time_s: f64) -> TimestampMs {
    (time_s * 1000.0) as TimestampMs
}

fn span_label(first: TimestampMs, last: TimestampMs) -> String {
    match (
        DateTime::from_timestamp_millis(first),
        DateTime::from_timestamp_millis(last),
    ) {
        (Some(a), Some(b)) => format!("{a} .. {b}"),
        _ => format!("{first} .. {last}"),
    }
}

/// Loader for the collector's SQLite capture.
pub struct SqliteLoader {
    conn: Connection,
}

impl SqliteLoader {
    /// Open a capture database.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| Error::database(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Wrap an existing connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Load all trade prints ordered by time.
    pub fn load_trades(&self) -> Result<Vec<AggTrade>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT time, symbol, price, quantity, is_buyer_maker \
                 FROM agg_trades ORDER BY time",
            )
            .map_err(|e| Error::database(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(AggTrade {
                    ts_ms: secs_to_ms(row.get(0)?),
                    symbol: row.get(1)?,
                    price: row.get(2)?,
                    quantity: row.get(3)?,
                    is_buyer_maker: row.get(4)?,
                })
            })
            .map_err(|e| Error::database(e.to_string()))?;

        let trades: Vec<AggTrade> = rows
            .collect::<rusqlite::Result<_>>()
            .map_err(|e| Error::database(e.to_string()))?;

        if let (Some(first), Some(last)) = (trades.first(), trades.last()) {
            info!(
                count = trades.len(),
                span = %span_label(first.ts_ms, last.ts_ms),
                "loaded trade prints"
            );
        }
        Ok(trades)
    }

    /// Load all depth snapshots ordered by time.
    pub fn load_snapshots(&self) -> Result<Vec<OrderBookSnapshot>> {
        let mut stmt = self
            .conn
            .prepare("SELECT time, symbol, bids, asks FROM order_books ORDER BY time")
            .map_err(|e| Error::database(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(OrderBookSnapshot {
                    ts_ms: secs_to_ms(row.get(0)?),
                    symbol: row.get(1)?,
                    bids: row.get(2)?,
                    asks: row.get(3)?,
                })
            })
            .map_err(|e| Error::database(e.to_string()))?;

        let snapshots: Vec<OrderBookSnapshot> = rows
            .collect::<rusqlite::Result<_>>()
            .map_err(|e| Error::database(e.to_string()))?;

        if let (Some(first), Some(last)) = (snapshots.first(), snapshots.last()) {
            info!(
                count = snapshots.len(),
                span = %span_label(first.ts_ms, last.ts_ms),
                "loaded depth snapshots"
            );
        }
        Ok(snapshots)
    }
}

/// Group both streams by symbol, preserving time order within each symbol.
pub fn group_by_symbol(
    trades: Vec<AggTrade>,
    snapshots: Vec<OrderBookSnapshot>,
) -> BTreeMap<String, SymbolStreams> {
    let mut streams: BTreeMap<String, SymbolStreams> = BTreeMap::new();

    for trade in trades {
        streams
            .entry(trade.symbol.clone())
            .or_default()
            .trades
            .push(trade);
    }
    for snapshot in snapshots {
        streams
            .entry(snapshot.symbol.clone())
            .or_default()
            .snapshots
            .push(snapshot);
    }
    streams
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE agg_trades (
                 time REAL, symbol TEXT, price REAL, quantity REAL, is_buyer_maker INTEGER
             );
             CREATE TABLE order_books (
                 time REAL, symbol TEXT, bids BLOB, asks BLOB
             );",
        )
        .unwrap();
        conn
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
    fn test_load_trades() {
        let conn = capture_db();
        conn.execute(
            "INSERT INTO agg_trades VALUES (1704067200.5, 'BTCUSDT', 50000.0, 0.1, 0),
                                           (1704067201.0, 'ETHUSDT', 3000.0, 1.0, 1)",
            [],
        )
        .unwrap();

        let loader = SqliteLoader::from_connection(conn);
        let trades = loader.load_trades().unwrap();

        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].ts_ms, 1704067200500);
        assert_eq!(trades[0].symbol, "BTCUSDT");
        assert!(trades[0].is_buy_initiated());
        assert!(!trades[1].is_buy_initiated());
    }

    #[test]
    fn test_load_snapshots() {
        let conn = capture_db();
        conn.execute(
            "INSERT INTO order_books VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                1704067200.0f64,
                "BTCUSDT",
                blob(&[(50000.0, 1.0)]),
                blob(&[(50001.0, 2.0)])
            ],
        )
        .unwrap();

        let loader = SqliteLoader::from_connection(conn);
        let snapshots = loader.load_snapshots().unwrap();

        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].ts_ms, 1704067200000);
        assert_eq!(snapshots[0].bids.len(), 8);
        assert_eq!(snapshots[0].asks.len(), 8);
    }

    #[test]
    fn test_group_by_symbol() {
        let conn = capture_db();
        conn.execute(
            "INSERT INTO agg_trades VALUES (1.0, 'BTCUSDT', 50000.0, 0.1, 0),
                                           (2.0, 'ETHUSDT', 3000.0, 1.0, 0),
                                           (3.0, 'BTCUSDT', 50001.0, 0.2, 1)",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO order_books VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![2.5f64, "BTCUSDT", blob(&[]), blob(&[])],
        )
        .unwrap();

        let loader = SqliteLoader::from_connection(conn);
        let streams = group_by_symbol(
            loader.load_trades().unwrap(),
            loader.load_snapshots().unwrap(),
        );

        assert_eq!(streams.len(), 2);
        let btc = &streams["BTCUSDT"];
        assert_eq!(btc.trades.len(), 2);
        assert_eq!(btc.snapshots.len(), 1);
        // Time order preserved within the symbol.
        assert!(btc.trades[0].ts_ms < btc.trades[1].ts_ms);
        assert!(streams["ETHUSDT"].snapshots.is_empty());
    }
}
