//! Shared constant values used across the facet tree core.

/// Default values applied when an option is not supplied by the caller.
pub mod defaults {
    /// Number of direct children with hits required for a hitless parent
    /// node to still count as relevant.
    pub const MIN_RELEVANT_CHILDREN: u32 = 3;
    /// Label given to the synthetic rollup node that gathers everything
    /// which missed the datapoint budget.
    pub const OTHER_LABEL: &str = "Others";
}

/// Strategy names recognised by the pruner selector.
pub mod strategies {
    pub const SIMPLE: &str = "simple";
    pub const DATAPOINT: &str = "datapoint";
    pub const NONE: &str = "none";
}

/// Keys used in the wire-facing map representation of a node.
pub mod wire {
    pub const LABEL: &str = "label";
    pub const VALUE: &str = "value";
    pub const COUNT: &str = "count";
    pub const TOTAL: &str = "total";
    pub const HIERARCHY: &str = "hierarchy";
}
