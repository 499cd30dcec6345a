//! The optimist's baseline: everything unread is a five-star book.

use crate::traits::ScorePredictor;
use anyhow::Result;
use review_graph::{Network, WeightedGraph};
use std::sync::Arc;

/// Predicts the maximum score for every unreviewed (user, book) pair,
/// ignoring the graph entirely. Useful as the floor other predictors
/// are measured against.
pub struct FiveStarPredictor {
    graph: Arc<WeightedGraph>,
}

impl FiveStarPredictor {
    /// Create a new FiveStarPredictor over the given review graph.
    pub fn new(graph: Arc<WeightedGraph>) -> Self {
        Self { graph }
    }
}

impl ScorePredictor for FiveStarPredictor {
    fn name(&self) -> &str {
        "FiveStarPredictor"
    }

    fn predict_review_score(&self, user: &str, book: &str) -> Result<u8> {
        if self.graph.adjacent(user, book) {
            Ok(self.graph.get_weight(user, book)?.round() as u8)
        } else {
            Ok(5)
        }
    }
}
