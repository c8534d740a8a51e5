//! Reference cells
//!
//! A [`ChildRef`] is the value side of a node's child map: one slot holding
//! either a node or nothing. Clearing a slot whose node has died is a
//! compare-and-swap on the slot itself, so it needs no lock on the map.

use crate::node::Node;
use arc_swap::ArcSwapOption;
use std::fmt;
use std::sync::Arc;

/// Single-slot reference to a child node
///
/// Transitions one way only: live -> cleared. Re-linking the same name
/// installs a fresh cell rather than reviving a cleared one.
pub struct ChildRef {
    slot: ArcSwapOption<Node>,
}

/// What a resolver found in a cell
#[derive(Debug)]
pub(crate) enum Resolution {
    /// Cell holds a node whose tombstone is not set
    Live(Arc<Node>),

    /// Cell was already cleared
    Empty,

    /// Cell held a dead node and this caller won the swap that cleared it
    Reclaimed,
}

impl ChildRef {
    /// Cell pointing at `node`
    #[inline]
    #[must_use]
    pub fn new(node: Arc<Node>) -> Self {
        Self {
            slot: ArcSwapOption::new(Some(node)),
        }
    }

    /// Already-cleared cell
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self {
            slot: ArcSwapOption::empty(),
        }
    }

    /// Whether the cell has been cleared
    #[inline]
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.slot.load().is_none()
    }

    /// Lazy dead-reference detection
    ///
    /// Only one of several concurrent resolvers racing on the same dead node
    /// gets [`Resolution::Reclaimed`]; the rest see [`Resolution::Empty`].
    pub(crate) fn resolve(&self) -> Resolution {
        let current = self.slot.load();
        let Some(node) = &*current else {
            return Resolution::Empty;
        };

        if !node.is_dead() {
            return Resolution::Live(Arc::clone(node));
        }

        let previous = self.slot.compare_and_swap(&current, None::<Arc<Node>>);
        match &*previous {
            Some(prev) if Arc::ptr_eq(prev, node) => Resolution::Reclaimed,
            _ => Resolution::Empty,
        }
    }
}

impl fmt::Debug for ChildRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.slot.load() {
            Some(node) => f
                .debug_struct("ChildRef")
                .field("target", &node.name())
                .field("dead", &node.is_dead())
                .finish(),
            None => f.write_str("ChildRef(cleared)"),
        }
    }
}
