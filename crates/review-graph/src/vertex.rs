//! Vertex records for the review network.
//!
//! Vertices live in a key-addressed arena owned by the graph; adjacency is
//! stored as sets/maps of neighbour keys rather than references, so there
//! are no ownership cycles to manage.

use crate::error::GraphError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Tag distinguishing the two entity kinds sharing one graph.
///
/// A vertex's kind never changes after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VertexKind {
    User,
    Book,
}

impl FromStr for VertexKind {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(VertexKind::User),
            "book" => Ok(VertexKind::Book),
            _ => Err(GraphError::UnknownVertexKind {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for VertexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VertexKind::User => write!(f, "user"),
            VertexKind::Book => write!(f, "book"),
        }
    }
}

/// A vertex in an unweighted review graph: a user id or a book title,
/// plus the keys of its neighbours.
#[derive(Debug, Clone)]
pub struct Vertex {
    pub item: String,
    pub kind: VertexKind,
    pub(crate) neighbours: HashSet<String>,
}

impl Vertex {
    pub(crate) fn new(item: &str, kind: VertexKind) -> Self {
        Self {
            item: item.to_string(),
            kind,
            neighbours: HashSet::new(),
        }
    }

    /// Number of edges incident to this vertex.
    pub fn degree(&self) -> usize {
        self.neighbours.len()
    }

    /// Jaccard coefficient of the two vertices' neighbour sets:
    /// |intersection| / |union|.
    ///
    /// Defined as 0 when either vertex has degree 0. That is a policy
    /// choice to avoid dividing by zero, not a mathematical identity.
    pub fn similarity_score(&self, other: &Vertex) -> f64 {
        if self.degree() == 0 || other.degree() == 0 {
            return 0.0;
        }
        let shared = self.neighbours.intersection(&other.neighbours).count();
        let union = self.neighbours.union(&other.neighbours).count();
        shared as f64 / union as f64
    }
}

/// A vertex in a weighted review graph. Each neighbour key maps to the
/// weight of the connecting edge (the review score).
#[derive(Debug, Clone)]
pub struct WeightedVertex {
    pub item: String,
    pub kind: VertexKind,
    pub(crate) neighbours: HashMap<String, f64>,
}

impl WeightedVertex {
    pub(crate) fn new(item: &str, kind: VertexKind) -> Self {
        Self {
            item: item.to_string(),
            kind,
            neighbours: HashMap::new(),
        }
    }

    /// Number of edges incident to this vertex.
    pub fn degree(&self) -> usize {
        self.neighbours.len()
    }

    /// Jaccard coefficient over neighbour keys, ignoring edge weights.
    ///
    /// Same formula as [`Vertex::similarity_score`], 0 when either vertex
    /// has degree 0.
    pub fn similarity_score_unweighted(&self, other: &WeightedVertex) -> f64 {
        if self.degree() == 0 || other.degree() == 0 {
            return 0.0;
        }
        let shared = self
            .neighbours
            .keys()
            .filter(|k| other.neighbours.contains_key(*k))
            .count();
        let union = self.degree() + other.degree() - shared;
        shared as f64 / union as f64
    }

    /// Strict Jaccard: the intersection only counts neighbours reachable
    /// from both vertices with an equal edge weight on each side. The
    /// denominator is still the full union of neighbour keys, so the
    /// strict score is always <= the unweighted score for the same pair.
    pub fn similarity_score_strict(&self, other: &WeightedVertex) -> f64 {
        if self.degree() == 0 || other.degree() == 0 {
            return 0.0;
        }
        let mut shared = 0usize;
        let mut matched = 0usize;
        for (key, weight) in &self.neighbours {
            if let Some(other_weight) = other.neighbours.get(key) {
                shared += 1;
                if other_weight == weight {
                    matched += 1;
                }
            }
        }
        let union = self.degree() + other.degree() - shared;
        matched as f64 / union as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_kind_from_str() {
        assert_eq!("user".parse::<VertexKind>().unwrap(), VertexKind::User);
        assert_eq!("book".parse::<VertexKind>().unwrap(), VertexKind::Book);
        assert!("author".parse::<VertexKind>().is_err());
    }

    #[test]
    fn test_zero_degree_similarity_is_zero() {
        let a = Vertex::new("a", VertexKind::Book);
        let mut b = Vertex::new("b", VertexKind::Book);
        b.neighbours.insert("c".to_string());

        assert_eq!(a.similarity_score(&b), 0.0);
        assert_eq!(b.similarity_score(&a), 0.0);
    }

    #[test]
    fn test_strict_score_never_exceeds_unweighted() {
        let mut a = WeightedVertex::new("a", VertexKind::User);
        let mut b = WeightedVertex::new("b", VertexKind::User);

        a.neighbours.insert("x".to_string(), 5.0);
        a.neighbours.insert("y".to_string(), 3.0);
        b.neighbours.insert("x".to_string(), 5.0);
        b.neighbours.insert("y".to_string(), 2.0);

        let strict = a.similarity_score_strict(&b);
        let unweighted = a.similarity_score_unweighted(&b);
        assert!(strict <= unweighted);
        // "x" matches on weight, "y" does not
        assert_eq!(strict, 0.5);
        assert_eq!(unweighted, 1.0);
    }
}
