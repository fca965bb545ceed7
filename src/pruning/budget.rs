//! Budget-bounded top-K pruning.

use std::cmp;
use std::collections::BTreeSet;

use tracing::trace;

use crate::core::constants::{defaults, strategies};
use crate::core::CountNode;

use super::{Pruner, RelevancePruner};

/// Selects at most `datapoints` nodes, drawn from any depth of the
/// forest and ranked by significance, and folds everything left over
/// into a single synthetic rollup node.
///
/// Candidates are gathered in rounds: each round computes a hit-count
/// threshold, harvests every node that clears it, then lowers the bar
/// for the next round until the budget is filled or the threshold
/// bottoms out.
#[derive(Debug, Clone)]
pub struct BudgetPruner {
    datapoints: usize,
    other_label: String,
}

impl BudgetPruner {
    /// `datapoints` must be at least 1; the selector rejects anything
    /// smaller before a pruner is built.
    pub fn new(datapoints: usize, other_label: impl Into<String>) -> Self {
        assert!(datapoints >= 1, "datapoint budget must be at least 1");
        Self {
            datapoints,
            other_label: other_label.into(),
        }
    }

    /// Threshold for one harvesting round. Starts at the mean total per
    /// budgeted node and decays with each round, always staying strictly
    /// below the previous round's value. The first round is floored at 1
    /// so small totals still yield candidates; `None` means the rounds
    /// are exhausted.
    fn threshold(&self, iteration: u64, previous: u64, total: u64) -> Option<u64> {
        let mut min = cmp::min(total / self.datapoints as u64 / iteration, previous - 1);

        if min == 0 && iteration == 1 {
            min = 1;
        }

        (min > 0).then_some(min)
    }

    /// Roll the leftover forest into one labelled node. The leftovers are
    /// themselves relevance-pruned first, so the rollup holds a readable
    /// summary instead of a flat dump of everything that missed the
    /// budget.
    fn build_other_node(&self, leftover: Vec<CountNode>) -> CountNode {
        let summarized = RelevancePruner::new(defaults::MIN_RELEVANT_CHILDREN).prune(leftover);

        let mut other = CountNode::new(
            Some(self.other_label.clone()),
            "",
            0,
            0,
            summarized.into_iter().collect::<BTreeSet<_>>(),
        );
        other.recalculate_child_count();
        other
    }
}

impl Pruner for BudgetPruner {
    fn name(&self) -> &'static str {
        strategies::DATAPOINT
    }

    fn prune(&self, forest: Vec<CountNode>) -> Vec<CountNode> {
        let total: u64 = forest.iter().map(CountNode::total).sum();

        // The working copy is consumed destructively; the input forest
        // stays untouched so the leftover set can be rebuilt from it.
        let mut working = forest.clone();
        let mut selected: Vec<CountNode> = Vec::new();
        let mut iteration: u64 = 1;
        let mut previous = u64::MAX;

        while selected.len() < self.datapoints && !working.is_empty() {
            let Some(threshold) = self.threshold(iteration, previous, total) else {
                break;
            };

            extract_nodes(&mut working, threshold, &mut selected);
            trace!(
                iteration,
                threshold,
                selected = selected.len(),
                "harvested nodes over threshold"
            );

            iteration += 1;
            previous = threshold;
        }

        // Highest-ranked first. A round can overshoot the budget; the
        // overflow is discarded outright rather than folded into the
        // rollup node.
        selected.sort_unstable();
        selected.truncate(self.datapoints);

        let mut leftover = forest;
        trim_selected(&mut leftover, &selected, 0);

        let mut pruned = selected;
        let other = self.build_other_node(leftover);
        if other.total() > 0 {
            pruned.push(other);
        }

        pruned
    }
}

/// Move every node whose total clears the threshold out of `nodes` and
/// into `out`. Qualifying descendants are harvested before their parent
/// is considered, and a parent whose subtree shrank has its child count
/// restored before its own hits are examined.
fn extract_nodes(nodes: &mut Vec<CountNode>, threshold: u64, out: &mut Vec<CountNode>) {
    let mut idx = 0;

    while idx < nodes.len() {
        let node = &mut nodes[idx];
        if node.total() >= threshold {
            if node.child_count() >= threshold {
                let mut children: Vec<CountNode> = node.take_children().into_iter().collect();
                extract_nodes(&mut children, threshold, out);
                node.set_children(children.into_iter().collect());
                node.recalculate_child_count();
            }

            if node.count() >= threshold {
                out.push(nodes.remove(idx));
                continue;
            }
        }
        idx += 1;
    }
}

/// Remove from `nodes`, recursively, everything the selection already
/// shows: nodes equal to a selected node or to a node still nested in a
/// selected node's subtree. Surviving top-level nodes get their child
/// counts recalculated once their subtree has been trimmed.
fn trim_selected(nodes: &mut Vec<CountNode>, selected: &[CountNode], level: u32) {
    let mut idx = 0;

    while idx < nodes.len() {
        if selected.iter().any(|tree| node_in_tree(&nodes[idx], tree)) {
            nodes.remove(idx);
            continue;
        }

        let node = &mut nodes[idx];
        if node.has_children() {
            let mut children: Vec<CountNode> = node.take_children().into_iter().collect();
            trim_selected(&mut children, selected, level + 1);
            node.set_children(children.into_iter().collect());
        }
        if level == 0 {
            node.recalculate_child_count();
        }

        idx += 1;
    }
}

/// Whether `node` equals `tree` or any node within its subtree.
fn node_in_tree(node: &CountNode, tree: &CountNode) -> bool {
    tree == node
        || tree
            .children()
            .iter()
            .any(|child| node_in_tree(node, child))
}
