//! Error types raised while configuring a pruner.
//!
//! Pruning itself is infallible; the only failure surface is turning
//! request options into a configured strategy.

use thiserror::Error;

/// Configuration errors reported by the pruner selector.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The "datapoint" strategy was selected without a usable budget.
    #[error("datapoint budget must be greater than zero, got {value}")]
    InvalidDatapointBudget { value: i64 },
}
