//! Amortized compaction of child maps
//!
//! Lazy clears leave cleared slots behind in a node's child map. The
//! [`CompactionPolicy`] decides when enough of them have piled up to pay for a
//! full sweep, and [`sweep_cleared`] performs the sweep itself. The sweep runs
//! under the node's exclusive lock; see [`Node::compact`](crate::Node::compact).

use crate::cell::ChildRef;
use std::collections::HashMap;

/// When to sweep a child map
///
/// After every successful lazy clear the host node evaluates
/// `counter % frequency == 0 && counter > stale_ratio * live_slots`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactionPolicy {
    frequency: u64,
    stale_ratio: u64,
}

impl CompactionPolicy {
    /// Create a policy. Zero values are raised to one.
    #[inline]
    #[must_use]
    pub fn new(frequency: u64, stale_ratio: u64) -> Self {
        Self {
            frequency: frequency.max(1),
            stale_ratio: stale_ratio.max(1),
        }
    }

    /// Counter modulus
    #[inline]
    #[must_use]
    pub fn frequency(&self) -> u64 {
        self.frequency
    }

    /// Live-slot multiplier
    #[inline]
    #[must_use]
    pub fn stale_ratio(&self) -> u64 {
        self.stale_ratio
    }

    /// Trigger checked right after a lazy clear bumped the counter
    #[inline]
    #[must_use]
    pub fn should_compact(&self, counter: u64, live_slots: usize) -> bool {
        counter % self.frequency == 0 && self.mostly_stale(counter, live_slots)
    }

    /// Re-check performed once exclusive access is held
    ///
    /// A sweep that already ran leaves `counter < frequency`, so a second
    /// triggered caller finds nothing to do.
    #[inline]
    #[must_use]
    pub fn still_due(&self, counter: u64, live_slots: usize) -> bool {
        counter >= self.frequency && self.mostly_stale(counter, live_slots)
    }

    /// Amount to subtract from the counter after a sweep
    ///
    /// The largest multiple of `frequency` not exceeding `counter`; the
    /// remainder carries over toward the next trigger.
    #[inline]
    #[must_use]
    pub fn settled(&self, counter: u64) -> u64 {
        counter - counter % self.frequency
    }

    fn mostly_stale(&self, counter: u64, live_slots: usize) -> bool {
        let live = u64::try_from(live_slots).unwrap_or(u64::MAX);
        counter > self.stale_ratio.saturating_mul(live)
    }
}

impl Default for CompactionPolicy {
    fn default() -> Self {
        Self::new(
            crate::config::DEFAULT_COMPACTION_FREQUENCY,
            crate::config::DEFAULT_STALE_RATIO,
        )
    }
}

/// Result of a sweep that actually ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactionOutcome {
    /// Cleared slots deleted from the map
    pub removed: usize,

    /// Slots left in the map
    pub remaining: usize,

    /// Cleanup counter observed under the lock
    pub counter_before: u64,

    /// Cleanup counter after settling
    pub counter_after: u64,
}

/// Delete every slot whose cell is cleared. Live cells are never touched,
/// including cells whose target is dead but not yet cleared.
///
/// Returns the number of slots removed.
pub(crate) fn sweep_cleared(children: &mut HashMap<String, ChildRef>) -> usize {
    let before = children.len();
    children.retain(|_, cell| !cell.is_cleared());
    before - children.len()
}
