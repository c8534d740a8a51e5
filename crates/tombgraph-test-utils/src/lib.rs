//! Testing utilities for tombgraph workspace
//!
//! Shared fixtures and assertions.

#![allow(missing_docs)]

use tombgraph_core::{GraphConfig, NodeView, Registry};

/// Child name used by the star fixtures: `B1`, `B2`, ...
pub fn child_name(index: usize) -> String {
    format!("B{index}")
}

/// Registry whose compaction fires on every multiple of `frequency`
pub fn registry_with_frequency(frequency: u64) -> Registry {
    Registry::with_config(GraphConfig::default().with_compaction_frequency(frequency))
}

/// Create `parent` plus `count` children `B1..=Bcount`, each linked under it.
/// Returns the child names in creation order.
pub fn build_star(registry: &Registry, parent: &str, count: usize) -> Vec<String> {
    registry.create(parent, "Parent Node").unwrap();
    (1..=count)
        .map(|i| {
            let name = child_name(i);
            registry.create(&name, &format!("Child Node {i}")).unwrap();
            registry.connect(parent, &name).unwrap();
            name
        })
        .collect()
}

/// Remove every name in `names`
pub fn remove_all(registry: &Registry, names: &[String]) {
    for name in names {
        registry.remove(name).unwrap();
    }
}

/// Sorted copy of `names`, for comparing with a [`NodeView`] listing
pub fn sorted(names: &[String]) -> Vec<String> {
    let mut names = names.to_vec();
    names.sort_unstable();
    names
}

/// Assert a view is present and lists exactly `expected` (any order)
pub fn assert_children(view: &NodeView, expected: &[String]) {
    assert!(!view.is_missing(), "expected a present node, got {view}");
    assert_eq!(view.children(), sorted(expected).as_slice());
}

/// Assert a listing is well formed: no duplicates and every name in `pool`
pub fn assert_well_formed(view: &NodeView, pool: &[String]) {
    assert!(
        view.is_well_formed(pool),
        "malformed listing: {:?}",
        view.children()
    );
}
