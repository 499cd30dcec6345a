//! The unweighted review graph.
//!
//! Vertices represent users and books; an edge records that a user
//! reviewed a book, without keeping the score. Built once by bulk
//! insertion, then queried for the rest of the run; there are no
//! deletion operations.

use crate::error::{GraphError, Result};
use crate::traits::Network;
use crate::vertex::{Vertex, VertexKind};
use std::collections::HashSet;
use tracing::debug;

/// An unweighted bipartite review network.
///
/// Vertices are stored in a key-addressed arena; adjacency is symmetric
/// key sets on both endpoints.
#[derive(Debug, Default)]
pub struct Graph {
    vertices: std::collections::HashMap<String, Vertex>,
}

impl Graph {
    /// Create an empty graph with no vertices or edges.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices in the graph.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Add a symmetric edge between two existing vertices.
    ///
    /// Fails with a lookup error if either endpoint is absent; re-adding
    /// an existing edge is a no-op. Self-loops are rejected.
    pub fn add_edge(&mut self, item1: &str, item2: &str) -> Result<()> {
        if item1 == item2 {
            return Err(GraphError::SelfLoop {
                item: item1.to_string(),
            });
        }
        if !self.vertices.contains_key(item1) {
            return Err(GraphError::VertexNotFound {
                item: item1.to_string(),
            });
        }
        if !self.vertices.contains_key(item2) {
            return Err(GraphError::VertexNotFound {
                item: item2.to_string(),
            });
        }

        if let Some(v1) = self.vertices.get_mut(item1) {
            v1.neighbours.insert(item2.to_string());
        }
        if let Some(v2) = self.vertices.get_mut(item2) {
            v2.neighbours.insert(item1.to_string());
        }
        Ok(())
    }

    fn get_vertex(&self, item: &str) -> Result<&Vertex> {
        self.vertices
            .get(item)
            .ok_or_else(|| GraphError::VertexNotFound {
                item: item.to_string(),
            })
    }

    /// Jaccard similarity between the two given items.
    ///
    /// Fails with a lookup error if either item is absent. A vertex of
    /// degree 0 scores 0 against everything.
    pub fn get_similarity_score(&self, item1: &str, item2: &str) -> Result<f64> {
        let v1 = self.get_vertex(item1)?;
        let v2 = self.get_vertex(item2)?;
        Ok(v1.similarity_score(v2))
    }

    /// Up to `limit` book vertices ranked by descending similarity to
    /// `book`.
    ///
    /// Books with equal scores come out in the arbitrary iteration order
    /// of the vertex set; the ranking itself is what the contract
    /// promises. Each book appears at most once.
    pub fn recommend_books(&self, book: &str, limit: usize) -> Result<Vec<String>> {
        self.get_vertex(book)?;

        let mut scored: Vec<(String, f64)> = Vec::new();
        for other in self.get_all_vertices(Some(VertexKind::Book)) {
            if other != book {
                let score = self.get_similarity_score(book, &other)?;
                scored.push((other, score));
            }
        }
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());
        debug!("ranked {} candidate books for {}", scored.len(), book);

        Ok(scored.into_iter().take(limit).map(|(item, _)| item).collect())
    }
}

impl Network for Graph {
    fn add_vertex(&mut self, item: &str, kind: VertexKind) {
        if !self.vertices.contains_key(item) {
            self.vertices
                .insert(item.to_string(), Vertex::new(item, kind));
        }
    }

    fn adjacent(&self, item1: &str, item2: &str) -> bool {
        match self.vertices.get(item1) {
            Some(v1) => v1.neighbours.contains(item2),
            None => false,
        }
    }

    fn get_neighbours(&self, item: &str) -> Result<HashSet<String>> {
        Ok(self.get_vertex(item)?.neighbours.clone())
    }

    fn get_all_vertices(&self, kind: Option<VertexKind>) -> HashSet<String> {
        match kind {
            Some(kind) => self
                .vertices
                .values()
                .filter(|v| v.kind == kind)
                .map(|v| v.item.clone())
                .collect(),
            None => self.vertices.keys().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_graph() -> Graph {
        let mut graph = Graph::new();
        for i in 0..6 {
            graph.add_vertex(&i.to_string(), VertexKind::User);
        }
        graph.add_edge("0", "2").unwrap();
        graph.add_edge("0", "3").unwrap();
        graph.add_edge("0", "4").unwrap();
        graph.add_edge("1", "3").unwrap();
        graph.add_edge("1", "4").unwrap();
        graph.add_edge("1", "5").unwrap();
        graph
    }

    #[test]
    fn test_add_vertex_is_idempotent() {
        let mut graph = Graph::new();
        graph.add_vertex("a", VertexKind::User);
        graph.add_vertex("a", VertexKind::Book);

        assert_eq!(graph.vertex_count(), 1);
        // First kind wins; the second insert was a no-op
        assert_eq!(graph.get_all_vertices(Some(VertexKind::User)).len(), 1);
        assert!(graph.get_all_vertices(Some(VertexKind::Book)).is_empty());
    }

    #[test]
    fn test_add_edge_requires_both_vertices() {
        let mut graph = Graph::new();
        graph.add_vertex("a", VertexKind::User);

        let err = graph.add_edge("a", "missing").unwrap_err();
        assert!(matches!(err, GraphError::VertexNotFound { .. }));
    }

    #[test]
    fn test_add_edge_rejects_self_loop() {
        let mut graph = Graph::new();
        graph.add_vertex("a", VertexKind::User);

        let err = graph.add_edge("a", "a").unwrap_err();
        assert!(matches!(err, GraphError::SelfLoop { .. }));
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let graph = create_test_graph();

        assert!(graph.adjacent("0", "2"));
        assert!(graph.adjacent("2", "0"));
        assert!(!graph.adjacent("0", "5"));
        // Lenient: absent items are simply not adjacent
        assert!(!graph.adjacent("0", "missing"));
        assert!(!graph.adjacent("missing", "0"));
    }

    #[test]
    fn test_get_neighbours_errors_on_missing_item() {
        let graph = create_test_graph();

        let neighbours = graph.get_neighbours("0").unwrap();
        assert_eq!(neighbours.len(), 3);
        assert!(neighbours.contains("3"));

        assert!(graph.get_neighbours("missing").is_err());
    }

    #[test]
    fn test_similarity_score_worked_example() {
        // intersection {3, 4}, union {2, 3, 4, 5}
        let graph = create_test_graph();
        assert_eq!(graph.get_similarity_score("0", "1").unwrap(), 0.5);
    }

    #[test]
    fn test_similarity_score_is_symmetric() {
        let graph = create_test_graph();
        assert_eq!(
            graph.get_similarity_score("0", "1").unwrap(),
            graph.get_similarity_score("1", "0").unwrap()
        );
    }

    #[test]
    fn test_recommend_books_ranks_by_similarity() {
        let mut graph = Graph::new();
        graph.add_vertex("u1", VertexKind::User);
        graph.add_vertex("u2", VertexKind::User);
        graph.add_vertex("a", VertexKind::Book);
        graph.add_vertex("b", VertexKind::Book);
        graph.add_vertex("c", VertexKind::Book);

        // "b" shares both reviewers with "a", "c" shares one
        graph.add_edge("u1", "a").unwrap();
        graph.add_edge("u2", "a").unwrap();
        graph.add_edge("u1", "b").unwrap();
        graph.add_edge("u2", "b").unwrap();
        graph.add_edge("u1", "c").unwrap();

        let recs = graph.recommend_books("a", 5).unwrap();
        assert_eq!(recs, vec!["b".to_string(), "c".to_string()]);

        // The limit truncates, and no book ever appears twice
        let recs = graph.recommend_books("a", 1).unwrap();
        assert_eq!(recs, vec!["b".to_string()]);
    }

    #[test]
    fn test_recommend_books_errors_on_missing_book() {
        let graph = create_test_graph();
        assert!(graph.recommend_books("missing", 3).is_err());
    }
}
