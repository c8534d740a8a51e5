//! Registry error taxonomy
//!
//! Both variants are reported before any mutation takes place.

/// Result alias for registry operations
pub type Result<T, E = GraphError> = std::result::Result<T, E>;

/// Errors returned by [`Registry`](crate::Registry) operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// `create` on a name that is already registered
    #[error("node already exists: {name}")]
    AlreadyExists {
        /// The contested name
        name: String,
    },

    /// `connect` or `remove` on a name that is not registered
    #[error("node does not exist: {name}")]
    NotFound {
        /// The missing name
        name: String,
    },
}

impl GraphError {
    /// Build an [`GraphError::AlreadyExists`]
    #[inline]
    pub fn already_exists(name: impl Into<String>) -> Self {
        Self::AlreadyExists { name: name.into() }
    }

    /// Build a [`GraphError::NotFound`]
    #[inline]
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Name the failed operation was about
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::AlreadyExists { name } | Self::NotFound { name } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_node() {
        assert_eq!(
            GraphError::already_exists("a").to_string(),
            "node already exists: a"
        );
        assert_eq!(GraphError::not_found("b").to_string(), "node does not exist: b");
    }

    #[test]
    fn error_name_accessor() {
        assert_eq!(GraphError::not_found("x").name(), "x");
        assert_eq!(GraphError::already_exists("y").name(), "y");
    }
}
