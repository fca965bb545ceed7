use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use super::constants::wire;

/// One entry in a hierarchical facet count tree.
///
/// A node carries the hits attributed directly to its own facet value
/// (`count`) and the aggregated hits of all its descendants
/// (`child_count`). Children are owned outright, so a node is always the
/// root of a strict tree: no sharing, no back references, and cloning a
/// node clones its entire subtree.
///
/// Nodes are ordered most-significant-first: by [`total`](Self::total)
/// descending, then `count` descending, then `value` ascending, then
/// `label` ascending. Two nodes are equal when `count`, `child_count`,
/// `value` and `label` all match; children are deliberately ignored, so a
/// sorted set holds at most one node per equality class. The pruners rely
/// on that for de-duplication by plain set insertion.
#[derive(Debug, Clone)]
pub struct CountNode {
    label: Option<String>,
    value: String,
    count: u64,
    child_count: u64,
    children: BTreeSet<CountNode>,
}

impl CountNode {
    /// Construct a new node.
    ///
    /// `child_count` is expected to equal the sum of `total()` over
    /// `children`; the tree builder supplies consistent values, and
    /// [`recalculate_child_count`](Self::recalculate_child_count) restores
    /// the invariant after any structural change.
    pub fn new(
        label: Option<String>,
        value: impl Into<String>,
        count: u64,
        child_count: u64,
        children: BTreeSet<CountNode>,
    ) -> Self {
        Self {
            label,
            value: value.into(),
            count,
            child_count,
            children,
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The facet value; a stable identity key within a sibling set.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Hits attributed to this exact node.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Aggregated hits across all descendants of this node.
    pub fn child_count(&self) -> u64 {
        self.child_count
    }

    /// Direct plus descendant hits.
    pub fn total(&self) -> u64 {
        self.count + self.child_count
    }

    pub fn children(&self) -> &BTreeSet<CountNode> {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Move the children out of this node, leaving it a leaf.
    ///
    /// `child_count` is left untouched and therefore stale; callers must
    /// follow up with [`recalculate_child_count`](Self::recalculate_child_count)
    /// once the subtree has been rebuilt.
    pub fn take_children(&mut self) -> BTreeSet<CountNode> {
        std::mem::take(&mut self.children)
    }

    /// Replace this node's children. Does not touch `child_count`.
    pub fn set_children(&mut self, children: BTreeSet<CountNode>) {
        self.children = children;
    }

    /// Insert a single child, returning whether it was actually added. A
    /// child equal to an existing one is dropped by set semantics.
    pub fn insert_child(&mut self, child: CountNode) -> bool {
        self.children.insert(child)
    }

    /// Recursively recompute `child_count` from the live subtree, bottom
    /// up, and return this node's corrected total.
    ///
    /// This is not automatic: it must be invoked on every ancestor whose
    /// descendant set changed.
    pub fn recalculate_child_count(&mut self) -> u64 {
        self.child_count = 0;

        if self.has_children() {
            // Children are re-keyed by the recalculation, so rebuild the
            // set rather than mutating entries in place.
            let children = std::mem::take(&mut self.children);
            for mut child in children {
                self.child_count += child.recalculate_child_count();
                self.children.insert(child);
            }
        }

        self.total()
    }

    /// Convert this node into the ordered map consumed by the response
    /// serializer: `label` (when present), `value`, `count`, `total`, and
    /// `hierarchy` (recursively converted children, omitted when empty).
    pub fn to_wire_map(&self) -> Map<String, Value> {
        let mut map = Map::new();

        if let Some(label) = &self.label {
            map.insert(wire::LABEL.to_string(), Value::from(label.clone()));
        }
        map.insert(wire::VALUE.to_string(), Value::from(self.value.clone()));
        map.insert(wire::COUNT.to_string(), Value::from(self.count));
        map.insert(wire::TOTAL.to_string(), Value::from(self.total()));
        if self.has_children() {
            let hierarchy: Vec<Value> = self
                .children
                .iter()
                .map(|child| Value::Object(child.to_wire_map()))
                .collect();
            map.insert(wire::HIERARCHY.to_string(), Value::Array(hierarchy));
        }

        map
    }
}

impl PartialEq for CountNode {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count
            && self.child_count == other.child_count
            && self.value == other.value
            && self.label == other.label
    }
}

impl Eq for CountNode {}

impl Ord for CountNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .total()
            .cmp(&self.total())
            .then_with(|| other.count.cmp(&self.count))
            .then_with(|| self.value.cmp(&other.value))
            .then_with(|| self.label.cmp(&other.label))
    }
}

impl PartialOrd for CountNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for CountNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut len = 3;
        if self.label.is_some() {
            len += 1;
        }
        if self.has_children() {
            len += 1;
        }

        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(label) = &self.label {
            map.serialize_entry(wire::LABEL, label)?;
        }
        map.serialize_entry(wire::VALUE, &self.value)?;
        map.serialize_entry(wire::COUNT, &self.count)?;
        map.serialize_entry(wire::TOTAL, &self.total())?;
        if self.has_children() {
            map.serialize_entry(wire::HIERARCHY, &self.children)?;
        }
        map.end()
    }
}

impl fmt::Display for CountNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)?;
        if let Some(label) = self.label.as_deref().filter(|l| !l.trim().is_empty()) {
            write!(f, " [{label}]")?;
        }
        write!(f, " {}/{}", self.count, self.total())
    }
}
