//! Predict from how similar users rated the book.

use crate::traits::ScorePredictor;
use anyhow::Result;
use review_graph::{Network, ScoreType, VertexKind, WeightedGraph};
use std::sync::Arc;
use tracing::debug;

/// Weights every other reviewer's score by their similarity to the query
/// user, then averages.
///
/// For each user with an edge to the book, the predictor computes the
/// similarity between that user and the query user, then returns
/// `round(sum(similarity * score) / sum(similarity))`. When no reviewer
/// has any similarity to the query user, the prediction falls back to
/// the book's rounded average score.
pub struct SimilarUserPredictor {
    graph: Arc<WeightedGraph>,

    /// Similarity variant used to compare users
    score_type: ScoreType,
}

impl SimilarUserPredictor {
    /// Create a new SimilarUserPredictor using strict similarity.
    pub fn new(graph: Arc<WeightedGraph>) -> Self {
        Self {
            graph,
            score_type: ScoreType::Strict,
        }
    }

    /// Configure the similarity variant (default: strict)
    pub fn with_score_type(mut self, score_type: ScoreType) -> Self {
        self.score_type = score_type;
        self
    }
}

impl ScorePredictor for SimilarUserPredictor {
    fn name(&self) -> &str {
        "SimilarUserPredictor"
    }

    fn predict_review_score(&self, user: &str, book: &str) -> Result<u8> {
        if self.graph.adjacent(user, book) {
            return Ok(self.graph.get_weight(user, book)?.round() as u8);
        }

        let mut weighted_total = 0.0;
        let mut similarity_total = 0.0;
        for other_user in self.graph.get_all_vertices(Some(VertexKind::User)) {
            let review_score = self.graph.get_weight(&other_user, book)?;
            if review_score > 0.0 {
                let similarity =
                    self.graph
                        .get_similarity_score(user, &other_user, self.score_type)?;
                weighted_total += similarity * review_score;
                similarity_total += similarity;
            }
        }

        if similarity_total == 0.0 {
            // No similar reviewers found; fall back to the book average
            debug!("no similar reviewers for ({user}, {book}), using book average");
            Ok(self.graph.average_weight(book)?.round() as u8)
        } else {
            Ok((weighted_total / similarity_total).round() as u8)
        }
    }
}
