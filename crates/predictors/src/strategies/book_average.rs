//! Predict from the book's average score, ignoring the user.

use crate::traits::ScorePredictor;
use anyhow::Result;
use review_graph::{Network, WeightedGraph};
use std::sync::Arc;

/// Predicts the rounded mean of all scores the book has received,
/// whoever is asking. Fails if the book has no reviews at all: there
/// is nothing to average and the predictor refuses to invent a score.
pub struct BookAverageScorePredictor {
    graph: Arc<WeightedGraph>,
}

impl BookAverageScorePredictor {
    /// Create a new BookAverageScorePredictor over the given review graph.
    pub fn new(graph: Arc<WeightedGraph>) -> Self {
        Self { graph }
    }
}

impl ScorePredictor for BookAverageScorePredictor {
    fn name(&self) -> &str {
        "BookAverageScorePredictor"
    }

    fn predict_review_score(&self, user: &str, book: &str) -> Result<u8> {
        if self.graph.adjacent(user, book) {
            Ok(self.graph.get_weight(user, book)?.round() as u8)
        } else {
            Ok(self.graph.average_weight(book)?.round() as u8)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use review_graph::VertexKind;

    fn create_test_graph() -> WeightedGraph {
        let mut graph = WeightedGraph::new();
        for user in ["u1", "u2", "u3"] {
            graph.add_vertex(user, VertexKind::User);
        }
        graph.add_vertex("Dune", VertexKind::Book);
        graph.add_edge("u1", "Dune", 5.0).unwrap();
        graph
    }

    #[test]
    fn test_single_review_book() {
        let predictor = BookAverageScorePredictor::new(Arc::new(create_test_graph()));

        // u1 already reviewed it: stored edge returned verbatim
        assert_eq!(predictor.predict_review_score("u1", "Dune").unwrap(), 5);
        // u2 has no edge: prediction is the book's (rounded) average
        assert_eq!(predictor.predict_review_score("u2", "Dune").unwrap(), 5);
    }

    #[test]
    fn test_average_rounds() {
        let mut graph = create_test_graph();
        graph.add_edge("u2", "Dune", 2.0).unwrap();

        let predictor = BookAverageScorePredictor::new(Arc::new(graph));
        // mean of 5 and 2 is 3.5, rounded away from zero
        assert_eq!(predictor.predict_review_score("u3", "Dune").unwrap(), 4);
    }

    #[test]
    fn test_unreviewed_book_fails() {
        let mut graph = create_test_graph();
        graph.add_vertex("Nobody Read It", VertexKind::Book);

        let predictor = BookAverageScorePredictor::new(Arc::new(graph));
        assert!(
            predictor
                .predict_review_score("u2", "Nobody Read It")
                .is_err()
        );
    }
}
