//! Core types and configuration for the barrier-pipeline system.
//!
//! This crate provides shared types used across all other crates:
//! - Raw market data types (trades, order-book snapshots)
//! - Derived types (bars, feature rows, labeled samples, datasets)
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
