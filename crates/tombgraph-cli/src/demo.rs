//! Removal demonstration
//!
//! Builds a parent `A` with children `B1..B200`, removes every child, and
//! shows `A` again. The second `show` clears all 200 stale cells and the
//! resulting compaction shrinks `A`'s child map.

use std::io::{self, Write};
use tombgraph_core::{GraphConfig, GraphError, Registry};

/// Children created by the demonstration
pub const DEMO_CHILDREN: usize = 200;

/// Child-map sizes observed by the demonstration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoSummary {
    /// Slots in `A` after all children were removed, before the second show
    pub slots_before: usize,
    /// Slots in `A` after the second show
    pub slots_after: usize,
}

/// Run the demonstration, writing both renderings to `output`
///
/// # Errors
/// Returns I/O errors from `output`; registry errors are reported as
/// [`io::ErrorKind::Other`]
pub fn run_demo<W: Write>(mut output: W, config: GraphConfig) -> io::Result<DemoSummary> {
    let registry = Registry::with_config(config);
    let children = populate(&registry).map_err(io::Error::other)?;

    writeln!(output, "Before deletion, A's children:")?;
    writeln!(output, "{}", registry.show("A"))?;

    for child in &children {
        registry.remove(child).map_err(io::Error::other)?;
    }

    let parent = registry
        .get("A")
        .ok_or_else(|| io::Error::other(GraphError::not_found("A")))?;
    let slots_before = parent.slot_count();

    writeln!(output)?;
    writeln!(output, "After removal of children, A's children (cleanup should trigger):")?;
    writeln!(output, "{}", registry.show("A"))?;

    let summary = DemoSummary {
        slots_before,
        slots_after: parent.slot_count(),
    };
    tracing::info!(
        slots_before = summary.slots_before,
        slots_after = summary.slots_after,
        "demo finished"
    );
    Ok(summary)
}

fn populate(registry: &Registry) -> Result<Vec<String>, GraphError> {
    registry.create("A", "Parent Node")?;
    (1..=DEMO_CHILDREN)
        .map(|i| {
            let name = format!("B{i}");
            registry.create(&name, &format!("Child Node {i}"))?;
            registry.connect("A", &name)?;
            Ok(name)
        })
        .collect()
}
