//! Graph nodes
//!
//! A [`Node`] owns its child map. Structural changes to the map (insert,
//! sweep) take the write lock; lookups and traversal take the read lock and
//! may clear dead cells in place, since clearing is a swap on the cell.
//!
//! Compaction needs the write lock, so it must never start while the same
//! node's read lock is held. [`Node::read_then_compact`] enforces that: the
//! read guard lives inside it and is dropped before any sweep runs.

use crate::cell::{ChildRef, Resolution};
use crate::compaction::{sweep_cleared, CompactionOutcome, CompactionPolicy};
use crate::telemetry;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

type ChildMap = HashMap<String, ChildRef>;

/// Named graph entity
pub struct Node {
    name: String,
    text: String,

    /// Tombstone. Set once by `remove`, never cleared.
    dead: AtomicBool,

    children: RwLock<ChildMap>,

    /// Lazy clears since the last sweep, plus the carried remainder
    cleanup_counter: AtomicU64,

    /// Cleared cells currently sitting in `children`
    cleared_slots: AtomicUsize,

    policy: CompactionPolicy,
}

impl Node {
    /// Create a live node with no children
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>, policy: CompactionPolicy) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            dead: AtomicBool::new(false),
            children: RwLock::new(HashMap::new()),
            cleanup_counter: AtomicU64::new(0),
            cleared_slots: AtomicUsize::new(0),
            policy,
        }
    }

    /// Unique name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text payload
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the node has been removed from its registry
    #[inline]
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.dead.load(Ordering::Acquire)
    }

    /// Set the tombstone. Returns `true` for the call that flipped it.
    pub(crate) fn mark_dead(&self) -> bool {
        !self.dead.swap(true, Ordering::AcqRel)
    }

    /// Link `child` under its name, replacing any previous cell for that name
    ///
    /// A node that is already dead accepts no new links, since its map has
    /// been or is about to be released.
    pub fn add_child(&self, child: Arc<Node>) {
        let key = child.name().to_owned();
        let mut children = self.children.write();
        if self.is_dead() {
            tracing::trace!(parent = %self.name, child = %key, "link to removed node dropped");
            return;
        }
        if let Some(previous) = children.insert(key, ChildRef::new(child)) {
            if previous.is_cleared() {
                self.cleared_slots.fetch_sub(1, Ordering::AcqRel);
            }
        }
    }

    /// Point lookup of a live child
    #[must_use]
    pub fn child(&self, name: &str) -> Option<Arc<Node>> {
        self.read_then_compact(|children| match children.get(name) {
            Some(cell) => self.resolve(cell, children.len()),
            None => (None, false),
        })
    }

    /// All children whose target is still live
    ///
    /// Dead targets found along the way are cleared; if that pushes the
    /// counter over the trigger, the map is swept after the traversal.
    #[must_use]
    pub fn valid_children(&self) -> Vec<Arc<Node>> {
        self.read_then_compact(|children| {
            let mut compaction_due = false;
            let mut live = Vec::with_capacity(children.len());
            for cell in children.values() {
                let (node, due) = self.resolve(cell, children.len());
                compaction_due |= due;
                live.extend(node);
            }
            (live, compaction_due)
        })
    }

    /// Sweep cleared slots if the trigger still holds
    ///
    /// Takes the write lock. Returns `None` when the re-check finds nothing
    /// due, e.g. because a concurrent caller already swept.
    pub fn compact(&self) -> Option<CompactionOutcome> {
        let mut children = self.children.write();

        let counter_before = self.cleanup_counter.load(Ordering::Acquire);
        let cleared = self.cleared_slots.load(Ordering::Acquire);
        let live = children.len().saturating_sub(cleared);
        if !self.policy.still_due(counter_before, live) {
            return None;
        }

        let removed = sweep_cleared(&mut children);
        self.cleared_slots
            .store(cleared.saturating_sub(removed), Ordering::Release);

        let settled = self.policy.settled(counter_before);
        let counter_after = self.cleanup_counter.fetch_sub(settled, Ordering::AcqRel) - settled;

        let outcome = CompactionOutcome {
            removed,
            remaining: children.len(),
            counter_before,
            counter_after,
        };
        drop(children);

        telemetry::compaction(removed);
        tracing::debug!(
            node = %self.name,
            removed = outcome.removed,
            remaining = outcome.remaining,
            counter = outcome.counter_after,
            "compacted child map"
        );
        Some(outcome)
    }

    /// Slots in the child map, cleared or not
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.children.read().len()
    }

    /// Slots whose cell has not been cleared yet. Dead targets not yet
    /// traversed still count.
    #[must_use]
    pub fn live_slot_count(&self) -> usize {
        let children = self.children.read();
        children
            .len()
            .saturating_sub(self.cleared_slots.load(Ordering::Acquire))
    }

    /// Current cleanup counter
    #[inline]
    #[must_use]
    pub fn cleanup_counter(&self) -> u64 {
        self.cleanup_counter.load(Ordering::Acquire)
    }

    /// Drop every outgoing reference. Used on removal so that reference
    /// cycles between dead nodes do not keep each other alive.
    pub(crate) fn release_children(&self) {
        let released = {
            let mut children = self.children.write();
            self.cleared_slots.store(0, Ordering::Release);
            std::mem::take(&mut *children)
        };
        drop(released);
    }

    /// Run `read` under the shared lock, then compact if it asked for it
    fn read_then_compact<R>(&self, read: impl FnOnce(&ChildMap) -> (R, bool)) -> R {
        let (result, compaction_due) = {
            let children = self.children.read();
            read(&children)
        };
        if compaction_due {
            self.compact();
        }
        result
    }

    /// Apply lazy detection to one cell. Caller holds the read lock and passes
    /// the map length it sees.
    fn resolve(&self, cell: &ChildRef, slots: usize) -> (Option<Arc<Node>>, bool) {
        match cell.resolve() {
            Resolution::Live(node) => (Some(node), false),
            Resolution::Empty => (None, false),
            Resolution::Reclaimed => {
                let counter = self.cleanup_counter.fetch_add(1, Ordering::AcqRel) + 1;
                let cleared = self.cleared_slots.fetch_add(1, Ordering::AcqRel) + 1;
                telemetry::lazy_clear();
                tracing::trace!(node = %self.name, counter, "cleared dead child reference");

                let live = slots.saturating_sub(cleared);
                (None, self.policy.should_compact(counter, live))
            }
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("text", &self.text)
            .field("dead", &self.is_dead())
            .field("cleanup_counter", &self.cleanup_counter())
            .finish_non_exhaustive()
    }
}
