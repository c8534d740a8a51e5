//! Node registry
//!
//! Provides [`Registry`], the authoritative map from name to live node.
//!
//! A name is present in the registry exactly while its node is live: `remove`
//! takes the entry out first and only then sets the tombstone. Parents are
//! not visited on removal; their stale cells are cleared by later traversals.

use crate::config::GraphConfig;
use crate::error::{GraphError, Result};
use crate::node::Node;
use crate::render::NodeView;
use crate::telemetry;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// Concurrent name -> node map
///
/// Internally synchronized; every operation runs to completion on the calling
/// thread.
#[derive(Debug)]
pub struct Registry {
    nodes: DashMap<String, Arc<Node>>,
    config: GraphConfig,
}

impl Registry {
    /// Create an empty registry with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// Create an empty registry with custom configuration
    #[must_use]
    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            nodes: DashMap::new(),
            config,
        }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Register a new node
    ///
    /// # Errors
    /// Returns [`GraphError::AlreadyExists`] if `name` is taken
    pub fn create(&self, name: &str, text: &str) -> Result<Arc<Node>> {
        match self.nodes.entry(name.to_owned()) {
            Entry::Occupied(_) => Err(GraphError::already_exists(name)),
            Entry::Vacant(slot) => {
                let node = Arc::new(Node::new(name, text, self.config.policy()));
                slot.insert(Arc::clone(&node));
                telemetry::node_created();
                tracing::debug!(node = name, "created node");
                Ok(node)
            }
        }
    }

    /// Detach and tombstone a node
    ///
    /// The node's own outgoing references are released. Cells in other nodes
    /// that point at it stay until a traversal clears them.
    ///
    /// # Errors
    /// Returns [`GraphError::NotFound`] if `name` is not registered
    pub fn remove(&self, name: &str) -> Result<Arc<Node>> {
        let (_, node) = self
            .nodes
            .remove(name)
            .ok_or_else(|| GraphError::not_found(name))?;

        node.mark_dead();
        node.release_children();
        telemetry::node_removed();
        tracing::debug!(node = name, "removed node");
        Ok(node)
    }

    /// Look up a live node
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<Node>> {
        self.nodes.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Whether `name` is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Link `child` under `parent`, replacing any earlier link to that name
    ///
    /// # Errors
    /// Returns [`GraphError::NotFound`] naming the parent if it is missing,
    /// otherwise naming the child. Nothing is linked on failure.
    pub fn connect(&self, parent: &str, child: &str) -> Result<()> {
        let parent_node = self.get(parent).ok_or_else(|| GraphError::not_found(parent))?;
        let child_node = self.get(child).ok_or_else(|| GraphError::not_found(child))?;

        parent_node.add_child(child_node);
        tracing::debug!(parent, child, "connected nodes");
        Ok(())
    }

    /// Render a node and its live children
    ///
    /// An absent name yields [`NodeView::Missing`] rather than an error.
    #[must_use]
    pub fn show(&self, name: &str) -> NodeView {
        match self.get(name) {
            Some(node) => NodeView::of(&node),
            None => NodeView::missing(name),
        }
    }

    /// Registered names, unordered
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.nodes.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Number of live nodes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no node is registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
