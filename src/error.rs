//! Error types for the statistics engine.
//!
//! Failures split into two classes with very different handling:
//! configuration mistakes (unknown method or metric names, a missing group
//! source) abort the run immediately, while data-sparsity conditions never
//! surface here at all -- they become diagnostics plus NaN/omitted fields in
//! the output (see `pipeline::Diagnostic`).

use std::path::PathBuf;
use thiserror::Error;

/// All terminating failures the engine can produce.
#[derive(Error, Debug)]
pub enum StatsError {
    #[error(
        "estimation method '{0}' is not supported. Use one of \"dailyavg\", \"hourlyavg\", or \"deltaT\"."
    )]
    UnknownMethod(String),

    #[error(
        "error metric '{0}' is not supported. Use one of \"MSE\", \"RMSE\", \"CVRMSE\", \"MAE\", or \"MAPE\"."
    )]
    UnknownErrorMetric(String),

    #[error(
        "no group source supplied. Provide a group-table CSV, an in-memory mapping, or a GroupSpec."
    )]
    MissingGroupSource,

    #[error("the required column '{0}' was not found in the input file. Please check spelling and case.")]
    ColumnNotFound(String),

    #[error("failed to read weights file '{path}': {source}")]
    WeightsUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid weights JSON: {0}")]
    WeightsJson(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
