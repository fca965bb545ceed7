//! Strategy selection: turns request-level options into a configured
//! pruner.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants::{defaults, strategies};
use crate::core::{ConfigError, CountNode};

use super::{BudgetPruner, Pruner, RelevancePruner};

/// Pruning options as handed over by the surrounding request parser. All
/// fields are optional; missing values fall back to crate defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PruningOptions {
    /// Strategy name: `"simple"`, `"datapoint"`, or blank/unrecognised
    /// for no pruning.
    pub strategy: Option<String>,
    /// Minimum number of direct children with hits for a hitless parent
    /// to be kept (`"simple"` strategy).
    pub min_relevant_children: Option<u32>,
    /// Maximum number of individually displayed nodes (`"datapoint"`
    /// strategy). Must be positive when that strategy is selected.
    pub datapoints: Option<i64>,
    /// Label for the synthetic rollup node (`"datapoint"` strategy).
    pub other_label: Option<String>,
}

/// Pass-through pruner used when no strategy is requested.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityPruner;

impl Pruner for IdentityPruner {
    fn name(&self) -> &'static str {
        strategies::NONE
    }

    fn prune(&self, forest: Vec<CountNode>) -> Vec<CountNode> {
        forest
    }
}

/// Build the pruner described by `options`.
///
/// A blank strategy name selects no pruning, and so does an unrecognised
/// one; neither is an error. The only rejected configuration is the
/// `"datapoint"` strategy without a positive budget.
pub fn select_pruner(options: &PruningOptions) -> Result<Box<dyn Pruner>, ConfigError> {
    let strategy = options.strategy.as_deref().map(str::trim).unwrap_or("");

    match strategy {
        strategies::SIMPLE => {
            let min_children = options
                .min_relevant_children
                .unwrap_or(defaults::MIN_RELEVANT_CHILDREN);
            debug!(strategy, min_children, "selected relevance pruning");
            Ok(Box::new(RelevancePruner::new(min_children)))
        }
        strategies::DATAPOINT => {
            let datapoints = options.datapoints.unwrap_or(0);
            if datapoints <= 0 {
                return Err(ConfigError::InvalidDatapointBudget { value: datapoints });
            }
            let other_label = options
                .other_label
                .clone()
                .unwrap_or_else(|| defaults::OTHER_LABEL.to_string());
            debug!(strategy, datapoints, "selected budget pruning");
            Ok(Box::new(BudgetPruner::new(datapoints as usize, other_label)))
        }
        _ => {
            debug!(strategy, "no pruning strategy selected");
            Ok(Box::new(IdentityPruner))
        }
    }
}
