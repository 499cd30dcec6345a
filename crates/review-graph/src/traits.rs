//! The shared capability interface of the two graph types.
//!
//! `Graph` and `WeightedGraph` do not share storage (weighted adjacency is
//! a map, unweighted a set), so instead of an inheritance-style chain they
//! both implement this trait for the operations whose signatures agree.
//! Weight-aware operations (`add_edge` with a weight, `get_weight`,
//! `average_weight`, the score-type similarity family) are inherent
//! methods on `WeightedGraph` only.

use crate::error::Result;
use crate::vertex::VertexKind;
use std::collections::HashSet;

/// Common vertex/adjacency operations over a review network.
pub trait Network {
    /// Add a vertex with the given item and kind.
    ///
    /// Does nothing if the item is already present; the existing vertex
    /// (and its kind) is left untouched.
    fn add_vertex(&mut self, item: &str, kind: VertexKind);

    /// Whether the two items are adjacent vertices.
    ///
    /// Returns false if either item does not appear in the graph. This is
    /// intentionally lenient, unlike the lookup-erroring operations.
    fn adjacent(&self, item1: &str, item2: &str) -> bool;

    /// The neighbour keys of the given item.
    ///
    /// Fails with a lookup error if the item is absent.
    fn get_neighbours(&self, item: &str) -> Result<HashSet<String>>;

    /// All vertex keys, or only those of the given kind.
    fn get_all_vertices(&self, kind: Option<VertexKind>) -> HashSet<String>;
}
