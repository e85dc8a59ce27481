//! PyO3 bindings for the barrier-pipeline dataset builder.
//!
//! Exposes the Rust pipeline to the Python training side: load a SQLite
//! capture, derive features and barrier labels per symbol, balance the
//! classes, and hand back plain `(features, labels)` lists ready for
//! tensor construction.

use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;

use barrier_core::{Config, Error};
use barrier_ingestion::{group_by_symbol, SqliteLoader};
use barrier_labeling::pipeline;

fn runtime_err(err: Error) -> PyErr {
    PyRuntimeError::new_err(err.to_string())
}

/// Build the labeled dataset from a capture database.
///
/// Returns `(features, labels)`: rows of `[rsi, obi, tfi, volatility]`
/// and class indices (0 = HOLD, 1 = BUY, 2 = SELL). Every configuration
/// default can be overridden by keyword; `balance=False` skips the final
/// balancing pass and returns the raw label distribution.
#[pyfunction]
#[pyo3(signature = (
    db_path,
    bar_interval_ms = None,
    rsi_period = None,
    volatility_window = None,
    horizon = None,
    multiplier = None,
    min_move_frac = None,
    boring_cap_multiplier = None,
    balance = true,
))]
#[allow(clippy::too_many_arguments)]
fn build_dataset(
    db_path: &str,
    bar_interval_ms: Option<i64>,
    rsi_period: Option<usize>,
    volatility_window: Option<usize>,
    horizon: Option<usize>,
    multiplier: Option<f64>,
    min_move_frac: Option<f64>,
    boring_cap_multiplier: Option<usize>,
    balance: bool,
) -> PyResult<(Vec<[f64; 4]>, Vec<u8>)> {
    let mut config = Config::default();
    if let Some(v) = bar_interval_ms {
        config.bars.interval_ms = v;
    }
    if let Some(v) = rsi_period {
        config.indicators.rsi_period = v;
    }
    if let Some(v) = volatility_window {
        config.indicators.volatility_window = v;
    }
    if let Some(v) = horizon {
        config.barrier.horizon = v;
    }
    if let Some(v) = multiplier {
        config.barrier.multiplier = v;
    }
    if let Some(v) = min_move_frac {
        config.barrier.min_move_frac = v;
    }
    if let Some(v) = boring_cap_multiplier {
        config.balance.boring_cap_multiplier = v;
    }

    let loader = SqliteLoader::open(db_path).map_err(runtime_err)?;
    let trades = loader.load_trades().map_err(runtime_err)?;
    let snapshots = loader.load_snapshots().map_err(runtime_err)?;
    let streams = group_by_symbol(trades, snapshots);

    let dataset = if balance {
        pipeline::build_dataset(&streams, &config)
    } else {
        pipeline::labeled_dataset(&streams, &config)
    };

    Ok((
        dataset.x.iter().map(|f| f.to_array()).collect(),
        dataset.y.iter().map(|l| l.class_index()).collect(),
    ))
}

/// Install a tracing subscriber for the pipeline's structured logs.
///
/// `filter` takes an env-filter directive (e.g. `"info"` or
/// `"barrier_labeling=debug"`). Calling this twice is an error because
/// the global subscriber can only be set once.
#[pyfunction]
#[pyo3(signature = (filter = None))]
fn init_logging(filter: Option<&str>) -> PyResult<()> {
    let filter = tracing_subscriber::EnvFilter::try_new(filter.unwrap_or("info"))
        .map_err(|e| PyRuntimeError::new_err(e.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| PyRuntimeError::new_err(e.to_string()))
}

/// Barrier Pipeline - labeled dataset construction for Python training.
#[pymodule]
fn barrier_pipeline(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(build_dataset, m)?)?;
    m.add_function(wrap_pyfunction!(init_logging, m)?)?;

    // Class indices as the training side sees them.
    m.add("HOLD", 0u8)?;
    m.add("BUY", 1u8)?;
    m.add("SELL", 2u8)?;

    Ok(())
}
