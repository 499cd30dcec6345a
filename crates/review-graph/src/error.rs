//! Error types for the review-graph crate.

use thiserror::Error;

/// Errors that can occur while building or querying a review graph.
///
/// Lookup failures are always surfaced to the caller; the graph never
/// auto-creates a missing vertex.
#[derive(Error, Debug)]
pub enum GraphError {
    /// An operation referenced an item with no vertex in the graph
    #[error("no vertex found for item: {item}")]
    VertexNotFound { item: String },

    /// Tried to connect a vertex to itself
    #[error("self-loop edge rejected for item: {item}")]
    SelfLoop { item: String },

    /// Averaging edge weights over a vertex with no edges
    #[error("vertex {item} has no edges to average over")]
    NoEdges { item: String },

    /// A vertex kind string was neither "user" nor "book"
    #[error("unknown vertex kind: {name}")]
    UnknownVertexKind { name: String },

    /// A similarity score type string was not recognized
    #[error("unknown similarity score type: {name} (expected \"unweighted\" or \"strict\")")]
    UnknownScoreType { name: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, GraphError>;
