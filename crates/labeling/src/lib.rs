//! Barrier labeling and dataset assembly for the barrier-pipeline system.
//!
//! This crate provides:
//! - Forward-window barrier labeling with volatility-adaptive thresholds
//! - Class balancing with confuser retention
//! - The per-symbol fan-out pipeline producing the final dataset

pub mod balancer;
pub mod labeler;
pub mod pipeline;

pub use balancer::DatasetBalancer;
pub use labeler::BarrierLabeler;
pub use pipeline::{build_dataset, labeled_dataset, process_symbol};
