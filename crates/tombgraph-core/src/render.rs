//! Rendering of `show` results

use crate::node::Node;
use std::fmt::{self, Display, Formatter};

/// Snapshot of a node and its live children, as returned by `show`
///
/// Displays as
///
/// ```text
/// Node: "<text>"
/// Children:
///  - <child>
/// ```
///
/// with `Children: None` when nothing is live, or `<name> is empty` when the
/// node does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeView {
    /// No live node under that name
    Missing {
        /// Requested name
        name: String,
    },

    /// Live node
    Present {
        /// Node name
        name: String,
        /// Node text
        text: String,
        /// Names of live children, sorted
        children: Vec<String>,
    },
}

impl NodeView {
    /// Placeholder for an absent name
    #[must_use]
    pub fn missing(name: impl Into<String>) -> Self {
        Self::Missing { name: name.into() }
    }

    /// Traverse `node` and capture its live children
    #[must_use]
    pub fn of(node: &Node) -> Self {
        let mut children: Vec<String> = node
            .valid_children()
            .iter()
            .map(|child| child.name().to_owned())
            .collect();
        children.sort_unstable();

        Self::Present {
            name: node.name().to_owned(),
            text: node.text().to_owned(),
            children,
        }
    }

    /// Whether this is the placeholder
    #[inline]
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }

    /// Live child names; empty for the placeholder
    #[must_use]
    pub fn children(&self) -> &[String] {
        match self {
            Self::Missing { .. } => &[],
            Self::Present { children, .. } => children,
        }
    }

    /// Listing is strictly sorted and every child comes from `pool`
    #[must_use]
    pub fn is_well_formed(&self, pool: &[String]) -> bool {
        let children = self.children();
        children.windows(2).all(|pair| pair[0] < pair[1])
            && children.iter().all(|child| pool.contains(child))
    }
}

impl Display for NodeView {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { name } => write!(f, "{name} is empty"),
            Self::Present { text, children, .. } => {
                write!(f, "Node: \"{text}\"\nChildren:")?;
                if children.is_empty() {
                    return f.write_str(" None");
                }
                for child in children {
                    write!(f, "\n - {child}")?;
                }
                Ok(())
            }
        }
    }
}
