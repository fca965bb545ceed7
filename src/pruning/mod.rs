//! Pruning strategies for facet count forests.
//!
//! A pruner takes an owned forest of [`CountNode`] trees and returns a
//! smaller, display-ready forest. Strategies never share state between
//! calls and never mutate their input in place; where an algorithm needs
//! a scratch copy it clones up front and works on the clone.

pub mod budget;
pub mod relevance;
pub mod selector;

use crate::core::CountNode;

pub use budget::BudgetPruner;
pub use relevance::RelevancePruner;
pub use selector::{select_pruner, IdentityPruner, PruningOptions};

/// A pruning strategy over a facet count forest.
///
/// Implementations assume the input is a well-formed forest: every node
/// owns its children exclusively and child counts satisfy
/// `total() == count + child_count` throughout. The tree builder upstream
/// guarantees both.
pub trait Pruner: std::fmt::Debug + Send + Sync {
    /// Short strategy identifier, used for logging and selection checks.
    fn name(&self) -> &'static str;

    /// Prune an owned forest down to its display-ready form.
    fn prune(&self, forest: Vec<CountNode>) -> Vec<CountNode>;
}
