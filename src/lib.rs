//! # facettree
//!
//! Hierarchical facet count trees for faceted search responses, and the
//! pruning strategies that cut them down to a display-ready size.
//!
//! A search engine produces flat hit counts per facet value; an external
//! tree builder assembles those counts into a forest of [`CountNode`]
//! trees following a category or ontology hierarchy. Real hierarchies are
//! far too deep and wide to render, so this crate decides which nodes are
//! interesting enough to show on their own and collapses the rest.
//!
//! ## Pruning strategies
//!
//! - [`RelevancePruner`] strips the least significant parent layers,
//!   keeping nodes with direct hits or with enough direct children that
//!   have hits, then de-duplicates the surviving trees.
//! - [`BudgetPruner`] selects at most K nodes from anywhere in the
//!   forest, ranked by significance, and folds everything else into one
//!   synthetic rollup node.
//! - [`IdentityPruner`] passes the forest through untouched.
//!
//! [`select_pruner`] picks and configures a strategy from request-level
//! options.
//!
//! ## Quick Start
//!
//! ```rust
//! use facet_tree::{select_pruner, CountNode, Pruner, PruningOptions};
//!
//! let forest = vec![
//!     CountNode::new(None, "heart", 12, 0, Default::default()),
//!     CountNode::new(None, "aorta", 3, 0, Default::default()),
//! ];
//!
//! let options = PruningOptions {
//!     strategy: Some("simple".to_string()),
//!     ..Default::default()
//! };
//! let pruner = select_pruner(&options)?;
//! let pruned = pruner.prune(forest);
//! assert_eq!(pruned.len(), 2);
//! # Ok::<(), facet_tree::ConfigError>(())
//! ```
//!
//! Pruning is synchronous and performs no I/O. Every call operates on an
//! independently owned forest and returns a new one, so concurrent prunes
//! from multiple worker threads need no coordination.

/// Core node type, shared constants and error types
pub mod core;
/// Pruning strategies and strategy selection
pub mod pruning;

pub use crate::core::{ConfigError, CountNode};
pub use crate::pruning::{
    select_pruner, BudgetPruner, IdentityPruner, Pruner, PruningOptions, RelevancePruner,
};

#[cfg(test)]
mod proptests;
