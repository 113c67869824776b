use std::fmt::Display;

use thiserror::Error;

/// Result type for graph store and search operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Failures raised by the graph store, the search engine and the query layer.
///
/// Each condition is its own variant so callers can tell "doesn't exist"
/// apart from "unreachable".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A node label is not present in the graph.
    #[error("node '{0}' not found")]
    NodeNotFound(String),

    /// Both endpoints exist but no edge connects them in this direction.
    #[error("no edge from '{from}' to '{to}'")]
    EdgeNotFound { from: String, to: String },

    /// Both endpoints exist but no directed route connects them.
    #[error("no path from '{from}' to '{to}'")]
    PathNotFound { from: String, to: String },
}

impl GraphError {
    pub(crate) fn node_not_found(label: &impl Display) -> Self {
        GraphError::NodeNotFound(label.to_string())
    }

    pub(crate) fn edge_not_found(from: &impl Display, to: &impl Display) -> Self {
        GraphError::EdgeNotFound {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub(crate) fn path_not_found(from: &impl Display, to: &impl Display) -> Self {
        GraphError::PathNotFound {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

/// Errors raised while reading an edge list into a graph.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input source is missing or has no content.
    #[error("data source '{0}' does not exist or is empty")]
    EmptySource(String),

    /// A line carried a weight that is not a finite, non-negative number.
    #[error("invalid input on line {line}: {reason}")]
    InvalidInput { line: usize, reason: String },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
