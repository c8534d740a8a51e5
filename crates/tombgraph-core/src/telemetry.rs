//! Metric names and recording helpers
//!
//! Recorded through the `metrics` facade; no-ops until a recorder is installed.

pub(crate) const NODES_CREATED: &str = "tombgraph_nodes_created_total";
pub(crate) const NODES_REMOVED: &str = "tombgraph_nodes_removed_total";
pub(crate) const LAZY_CLEARS: &str = "tombgraph_lazy_clears_total";
pub(crate) const COMPACTIONS: &str = "tombgraph_compactions_total";
pub(crate) const COMPACTED_SLOTS: &str = "tombgraph_compacted_slots_total";

pub(crate) fn node_created() {
    metrics::counter!(NODES_CREATED).increment(1);
}

pub(crate) fn node_removed() {
    metrics::counter!(NODES_REMOVED).increment(1);
}

pub(crate) fn lazy_clear() {
    metrics::counter!(LAZY_CLEARS).increment(1);
}

pub(crate) fn compaction(removed: usize) {
    metrics::counter!(COMPACTIONS).increment(1);
    metrics::counter!(COMPACTED_SLOTS).increment(u64::try_from(removed).unwrap_or(u64::MAX));
}
