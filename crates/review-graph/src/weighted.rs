//! The weighted review graph.
//!
//! Same vertex/edge surface as [`Graph`](crate::Graph), with every edge
//! carrying the review score as its weight. Weights are stored
//! symmetrically: the weight recorded for (a, b) always equals the one
//! for (b, a), and re-adding an edge overwrites both directions.

use crate::error::{GraphError, Result};
use crate::traits::Network;
use crate::vertex::{VertexKind, WeightedVertex};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use tracing::debug;

/// Which similarity variant to use on a weighted graph.
///
/// Parsing an unknown name is an error rather than a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreType {
    /// Jaccard over neighbour keys, ignoring weights
    Unweighted,
    /// Jaccard counting only neighbours with equal weights on both sides
    Strict,
}

impl Default for ScoreType {
    fn default() -> Self {
        ScoreType::Unweighted
    }
}

impl FromStr for ScoreType {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "unweighted" => Ok(ScoreType::Unweighted),
            "strict" => Ok(ScoreType::Strict),
            _ => Err(GraphError::UnknownScoreType {
                name: s.to_string(),
            }),
        }
    }
}

/// A bipartite review network whose edges carry review scores.
#[derive(Debug, Default)]
pub struct WeightedGraph {
    vertices: std::collections::HashMap<String, WeightedVertex>,
}

impl WeightedGraph {
    /// Create an empty graph with no vertices or edges.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices in the graph.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Add an edge with the given weight between two existing vertices.
    ///
    /// Fails with a lookup error if either endpoint is absent. Any
    /// pre-existing weight for the pair is overwritten on both sides.
    pub fn add_edge(&mut self, item1: &str, item2: &str, weight: f64) -> Result<()> {
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
            v1.neighbours.insert(item2.to_string(), weight);
        }
        if let Some(v2) = self.vertices.get_mut(item2) {
            v2.neighbours.insert(item1.to_string(), weight);
        }
        Ok(())
    }

    fn get_vertex(&self, item: &str) -> Result<&WeightedVertex> {
        self.vertices
            .get(item)
            .ok_or_else(|| GraphError::VertexNotFound {
                item: item.to_string(),
            })
    }

    /// Weight of the edge between the two items, or 0 if the vertices
    /// exist but are not connected.
    ///
    /// Fails with a lookup error if either item is absent.
    pub fn get_weight(&self, item1: &str, item2: &str) -> Result<f64> {
        let v1 = self.get_vertex(item1)?;
        self.get_vertex(item2)?;
        Ok(v1.neighbours.get(item2).copied().unwrap_or(0.0))
    }

    /// Mean weight of all edges incident to the given item.
    ///
    /// Fails with a lookup error if the item is absent, and with
    /// [`GraphError::NoEdges`] if it has degree 0: averaging over
    /// nothing is an error here, never a NaN.
    pub fn average_weight(&self, item: &str) -> Result<f64> {
        let v = self.get_vertex(item)?;
        if v.degree() == 0 {
            return Err(GraphError::NoEdges {
                item: item.to_string(),
            });
        }
        let total: f64 = v.neighbours.values().sum();
        Ok(total / v.degree() as f64)
    }

    /// Similarity between the two items under the selected score type.
    ///
    /// Fails with a lookup error if either item is absent.
    pub fn get_similarity_score(
        &self,
        item1: &str,
        item2: &str,
        score_type: ScoreType,
    ) -> Result<f64> {
        let v1 = self.get_vertex(item1)?;
        let v2 = self.get_vertex(item2)?;
        match score_type {
            ScoreType::Unweighted => Ok(v1.similarity_score_unweighted(v2)),
            ScoreType::Strict => Ok(v1.similarity_score_strict(v2)),
        }
    }

    /// Up to `limit` book vertices ranked by descending similarity to
    /// `book` under the selected score type.
    ///
    /// Same ranking contract as [`Graph::recommend_books`](crate::Graph::recommend_books):
    /// ties come out in vertex-set iteration order, each book at most once.
    pub fn recommend_books(
        &self,
        book: &str,
        limit: usize,
        score_type: ScoreType,
    ) -> Result<Vec<String>> {
        self.get_vertex(book)?;

        let mut scored: Vec<(String, f64)> = Vec::new();
        for other in self.get_all_vertices(Some(VertexKind::Book)) {
            if other != book {
                let score = self.get_similarity_score(book, &other, score_type)?;
                scored.push((other, score));
            }
        }
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());
        debug!("ranked {} candidate books for {}", scored.len(), book);

        Ok(scored.into_iter().take(limit).map(|(item, _)| item).collect())
    }
}

impl Network for WeightedGraph {
    fn add_vertex(&mut self, item: &str, kind: VertexKind) {
        if !self.vertices.contains_key(item) {
            self.vertices
                .insert(item.to_string(), WeightedVertex::new(item, kind));
        }
    }

    fn adjacent(&self, item1: &str, item2: &str) -> bool {
        match self.vertices.get(item1) {
            Some(v1) => v1.neighbours.contains_key(item2),
            None => false,
        }
    }

    fn get_neighbours(&self, item: &str) -> Result<HashSet<String>> {
        Ok(self.get_vertex(item)?.neighbours.keys().cloned().collect())
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
