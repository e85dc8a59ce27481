//! End-to-end dataset assembly.
//!
//! Per-symbol derivation (bars, indicators, labels) is a pure function of
//! that symbol's streams, so symbols fan out across a thread pool and the
//! results are concatenated. Balancing runs as a single final pass since
//! it has to see the global label distribution.

use barrier_core::{Config, Dataset, LabeledSample};
use barrier_features::IndicatorEngine;
use barrier_ingestion::{BarBuilder, SymbolStreams};
use crate::{balancer::DatasetBalancer, labeler::BarrierLabeler};
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Derive labeled samples for one symbol.
///
/// A symbol with no bars, too few warm rows, or any other empty stage
/// contributes zero samples; it never aborts the run.
pub fn process_symbol(symbol: &str, streams: &SymbolStreams, config: &Config) -> Vec<LabeledSample> {
    let mut builder = BarBuilder::new(config.bars.interval_ms);
    builder.add_trades(&streams.trades);
    let bars = builder.into_bars();
    if bars.is_empty() {
        debug!(symbol, "no bars; skipping symbol");
        return Vec::new();
    }

    let engine = IndicatorEngine::new(config);
    let rows = engine.compute_rows(&bars, &streams.snapshots);

    let labeler = BarrierLabeler::new(config.barrier.clone());
    let samples = labeler.label(&rows);

    debug!(
        symbol,
        bars = bars.len(),
        rows = rows.len(),
        samples = samples.len(),
        "symbol processed"
    );
    samples
}

/// Build the raw labeled dataset: per-symbol fan-out and concatenation,
/// without the balancing pass.
pub fn labeled_dataset(streams: &BTreeMap<String, SymbolStreams>, config: &Config) -> Dataset {
    let per_symbol: Vec<Vec<LabeledSample>> = streams
        .par_iter()
        .map(|(symbol, s)| process_symbol(symbol, s, config))
        .collect();

    let mut dataset = Dataset::with_capacity(per_symbol.iter().map(Vec::len).sum());
    for samples in per_symbol {
        dataset.extend(samples);
    }

    let [holds, buys, sells] = dataset.label_counts();
    info!(symbols = streams.len(), holds, buys, sells, "labeled dataset assembled");
    dataset
}

/// Build the final dataset: label all symbols, then balance.
pub fn build_dataset(streams: &BTreeMap<String, SymbolStreams>, config: &Config) -> Dataset {
    let dataset = labeled_dataset(streams, config);
    let balanced = DatasetBalancer::new(config.balance.clone()).balance(&dataset);

    let [holds, buys, sells] = balanced.label_counts();
    info!(holds, buys, sells, "balanced dataset ready");
    balanced
}
