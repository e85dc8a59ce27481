//! Data ingestion and normalization for the barrier-pipeline system.
//!
//! This crate handles:
//! - Order-book depth blob decoding
//! - Per-snapshot order-book imbalance
//! - Fixed-interval bar building from trade prints
//! - SQLite capture loading and per-symbol grouping

pub mod bar_builder;
pub mod depth;
pub mod loader;

pub use bar_builder::BarBuilder;
pub use depth::{decode_levels, snapshot_imbalance, BookLevel};
pub use loader::{group_by_symbol, SqliteLoader, SymbolStreams};
