use proptest::collection::vec;
use proptest::prelude::*;

use crate::core::CountNode;
use crate::pruning::{BudgetPruner, Pruner, RelevancePruner};

/// Every node in a pruned forest must have a child count equal to the
/// sum of its children's totals, all the way down.
fn validate_counts(node: &CountNode) {
    let expected: u64 = node.children().iter().map(CountNode::total).sum();
    assert_eq!(
        node.child_count(),
        expected,
        "stale child count on {node}"
    );
    for child in node.children() {
        validate_counts(child);
    }
}

fn in_hierarchy(node: &CountNode, tree: &CountNode) -> bool {
    tree.children()
        .iter()
        .any(|child| child == node || in_hierarchy(node, child))
}

fn arb_node() -> impl Strategy<Value = CountNode> {
    let leaf = ("[a-z]{1,8}", 0u64..50).prop_map(|(value, count)| {
        CountNode::new(None, value, count, 0, Default::default())
    });

    leaf.prop_recursive(3, 24, 4, |inner| {
        ("[a-z]{1,8}", 0u64..50, vec(inner, 0..4)).prop_map(|(value, count, children)| {
            let mut node = CountNode::new(None, value, count, 0, children.into_iter().collect());
            node.recalculate_child_count();
            node
        })
    })
}

fn arb_forest() -> impl Strategy<Value = Vec<CountNode>> {
    vec(arb_node(), 0..6)
}

proptest! {
    #[test]
    fn relevance_pruning_keeps_counts_consistent(forest in arb_forest(), min in 0u32..4) {
        let pruned = RelevancePruner::new(min).prune(forest);
        for node in &pruned {
            validate_counts(node);
        }
    }

    #[test]
    fn relevance_pruning_leaves_no_duplicates(forest in arb_forest()) {
        let pruned = RelevancePruner::new(1).prune(forest);
        for (i, tree) in pruned.iter().enumerate() {
            for (j, other) in pruned.iter().enumerate() {
                if i != j {
                    prop_assert!(
                        !in_hierarchy(tree, other),
                        "{tree} appears inside {other}"
                    );
                }
            }
        }
    }

    #[test]
    fn relevance_pruning_keeps_only_relevant_roots(forest in arb_forest(), min in 1u32..4) {
        let pruned = RelevancePruner::new(min).prune(forest);
        for node in &pruned {
            let hits = node.children().iter().filter(|c| c.count() > 0).count();
            prop_assert!(
                node.count() > 0 || hits >= min as usize,
                "irrelevant root survived: {node}"
            );
        }
    }

    #[test]
    fn budget_pruning_respects_the_budget(forest in arb_forest(), k in 1usize..6) {
        let pruned = BudgetPruner::new(k, "Others").prune(forest);
        prop_assert!(pruned.len() <= k + 1);
        for node in &pruned {
            validate_counts(node);
        }
    }

    #[test]
    fn clone_preserves_equality_and_structure(node in arb_node()) {
        let cloned = node.clone();
        prop_assert_eq!(&cloned, &node);
        prop_assert_eq!(cloned.children().len(), node.children().len());
    }
}
