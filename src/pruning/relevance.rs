//! Conservative relevance-based pruning.

use std::collections::BTreeSet;

use crate::core::constants::strategies;
use crate::core::CountNode;

use super::Pruner;

/// Strips the least significant parent nodes off a forest, keeping nodes
/// which either have hits themselves or have enough direct children with
/// hits. Stripping an irrelevant parent promotes its children to the
/// level being examined, so several hitless top layers can disappear in
/// one pass.
#[derive(Debug, Clone)]
pub struct RelevancePruner {
    min_relevant_children: u32,
}

impl RelevancePruner {
    pub fn new(min_relevant_children: u32) -> Self {
        Self {
            min_relevant_children,
        }
    }

    /// A node is relevant when it has direct hits, or when enough of its
    /// direct children do.
    fn is_relevant(&self, node: &CountNode) -> bool {
        node.count() > 0 || self.relevant_children(node) >= self.min_relevant_children as usize
    }

    fn relevant_children(&self, node: &CountNode) -> usize {
        node.children()
            .iter()
            .filter(|child| child.count() > 0)
            .count()
    }

    /// Keep relevant nodes with their subtrees intact; discard irrelevant
    /// ones and re-examine their children at this level. The result set
    /// comes out most-significant-first.
    fn strip<I>(&self, forest: I) -> BTreeSet<CountNode>
    where
        I: IntoIterator<Item = CountNode>,
    {
        let mut pruned = BTreeSet::new();

        for mut node in forest {
            if self.is_relevant(&node) {
                pruned.insert(node);
            } else if node.has_children() {
                pruned.extend(self.strip(node.take_children()));
            }
        }

        pruned
    }

    /// Promotion can surface a node at the top level while an equal node
    /// stays nested inside another survivor. Drop any top-level node that
    /// also occurs below the top level of the surviving trees. A node is
    /// only ever compared against others at depth one or more, never
    /// against itself at the top.
    fn deduplicate(&self, trees: BTreeSet<CountNode>) -> Vec<CountNode> {
        let trees: Vec<CountNode> = trees.into_iter().collect();
        let duplicated: Vec<bool> = trees
            .iter()
            .map(|tree| is_node_in_children(tree, 0, &trees))
            .collect();

        trees
            .into_iter()
            .zip(duplicated)
            .filter_map(|(tree, dup)| (!dup).then_some(tree))
            .collect()
    }
}

/// Whether `node` occurs at depth `>= 1` anywhere within `trees`.
fn is_node_in_children<'a, I>(node: &CountNode, level: u32, trees: I) -> bool
where
    I: IntoIterator<Item = &'a CountNode>,
{
    trees.into_iter().any(|tree| {
        (level != 0 && tree == node) || is_node_in_children(node, level + 1, tree.children())
    })
}

impl Pruner for RelevancePruner {
    fn name(&self) -> &'static str {
        strategies::SIMPLE
    }

    fn prune(&self, forest: Vec<CountNode>) -> Vec<CountNode> {
        self.deduplicate(self.strip(forest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(value: &str, count: u64, children: Vec<CountNode>) -> CountNode {
        let mut node = CountNode::new(None, value, count, 0, children.into_iter().collect());
        node.recalculate_child_count();
        node
    }

    #[test]
    fn keeps_parent_with_enough_relevant_children() {
        let forest = vec![node(
            "a",
            0,
            vec![
                node("a1", 5, vec![]),
                node("a2", 0, vec![node("a21", 3, vec![])]),
            ],
        )];

        let pruned = RelevancePruner::new(1).prune(forest);

        // One direct child with hits satisfies the threshold; the whole
        // subtree survives unchanged.
        assert_eq!(pruned.len(), 1);
        assert_eq!(pruned[0].value(), "a");
        assert_eq!(pruned[0].total(), 8);
        assert_eq!(pruned[0].children().len(), 2);
    }

    #[test]
    fn promotes_children_of_irrelevant_parent() {
        let forest = vec![node(
            "p",
            0,
            vec![node("c1", 0, vec![]), node("c2", 4, vec![])],
        )];

        let pruned = RelevancePruner::new(2).prune(forest);

        // Only one of the parent's children has hits, so the parent goes;
        // the hitless leaf contributes nothing either.
        assert_eq!(pruned.len(), 1);
        assert_eq!(pruned[0].value(), "c2");
        assert_eq!(pruned[0].total(), 4);
    }

    #[test]
    fn drops_hitless_leaves() {
        let forest = vec![node("empty", 0, vec![]), node("hit", 1, vec![])];

        let pruned = RelevancePruner::new(3).prune(forest);

        assert_eq!(pruned.len(), 1);
        assert_eq!(pruned[0].value(), "hit");
    }

    #[test]
    fn removes_promoted_duplicates_of_nested_nodes() {
        // "b" survives nested under "a"; the equal node promoted out of
        // the irrelevant parent "p" must not appear a second time.
        let forest = vec![
            node("a", 5, vec![node("b", 3, vec![])]),
            node("p", 0, vec![node("b", 3, vec![])]),
        ];

        let pruned = RelevancePruner::new(2).prune(forest);

        assert_eq!(pruned.len(), 1);
        assert_eq!(pruned[0].value(), "a");
        assert_eq!(pruned[0].children().len(), 1);
    }

    #[test]
    fn sole_survivor_is_not_compared_against_itself() {
        let forest = vec![node("only", 2, vec![])];

        let pruned = RelevancePruner::new(3).prune(forest);

        assert_eq!(pruned.len(), 1);
        assert_eq!(pruned[0].value(), "only");
    }

    #[test]
    fn output_is_ordered_by_descending_total() {
        let forest = vec![
            node("small", 1, vec![]),
            node("large", 9, vec![]),
            node("medium", 4, vec![]),
        ];

        let pruned = RelevancePruner::new(3).prune(forest);

        let values: Vec<&str> = pruned.iter().map(CountNode::value).collect();
        assert_eq!(values, vec!["large", "medium", "small"]);
    }

    #[test]
    fn zero_threshold_keeps_every_node() {
        let forest = vec![node("p", 0, vec![node("c", 0, vec![])])];

        let pruned = RelevancePruner::new(0).prune(forest);

        // With a zero threshold even hitless parents count as relevant.
        assert_eq!(pruned.len(), 1);
        assert_eq!(pruned[0].value(), "p");
        assert!(pruned[0].has_children());
    }
}
