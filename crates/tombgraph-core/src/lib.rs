//! tombgraph Core
//!
//! Concurrent, in-memory directed graph of named nodes where removal is O(1).
//!
//! # Overview
//!
//! - **Registry**: authoritative `name -> Node` map with atomic create-if-absent
//!   and take-and-remove
//! - **Node**: named entity holding a child map of reference cells, a one-way
//!   `dead` tombstone, and a cleanup counter
//! - **ChildRef**: single-slot reference cell cleared by compare-and-swap once
//!   the referenced node is found dead
//! - **CompactionPolicy**: amortized trigger that sweeps cleared slots out of a
//!   child map under exclusive access
//!
//! Removing a node never walks its parents. Stale references are discovered by
//! whoever next traverses them and reclaimed in bulk by compaction.
//!
//! # Example
//!
//! ```rust
//! use tombgraph_core::Registry;
//!
//! let registry = Registry::new();
//! registry.create("a", "Parent").unwrap();
//! registry.create("b", "Child").unwrap();
//! registry.connect("a", "b").unwrap();
//!
//! registry.remove("b").unwrap();
//! assert_eq!(registry.show("a").to_string(), "Node: \"Parent\"\nChildren: None");
//! ```

#![warn(missing_docs)]

pub mod cell;
pub mod compaction;
pub mod config;
pub mod error;
pub mod node;
pub mod registry;
pub mod render;
mod telemetry;

// Re-exports
pub use cell::ChildRef;
pub use compaction::{CompactionOutcome, CompactionPolicy};
pub use config::{ConfigError, GraphConfig, DEFAULT_COMPACTION_FREQUENCY, DEFAULT_STALE_RATIO};
pub use error::{GraphError, Result};
pub use node::Node;
pub use registry::Registry;
pub use render::NodeView;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for registry operations
    pub use crate::{GraphConfig, GraphError, Node, NodeView, Registry};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
