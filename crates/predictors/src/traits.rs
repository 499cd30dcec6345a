//! Core trait for rating prediction.
//!
//! This module defines the ScorePredictor trait the interchangeable
//! prediction strategies implement.

use anyhow::Result;

/// Core trait for predicting review scores.
///
/// A predictor estimates the score a user would give a book they have
/// not reviewed. When the graph already holds an edge for the pair,
/// every implementation returns that stored score as ground truth.
///
/// ## Design Note
/// - `Send + Sync` allows predictors to be shared across threads
/// - Predictors hold a shared reference to the graph and no other
///   mutable state, so one instance can serve many queries
pub trait ScorePredictor: Send + Sync {
    /// Returns the name of this predictor (for logging/reporting)
    fn name(&self) -> &str;

    /// Predict the score (1-5) the given user would give the given book.
    ///
    /// # Arguments
    /// * `user` - User key; must be a vertex for strategies that consult
    ///   the graph beyond the adjacency check
    /// * `book` - Book key, same caveat
    ///
    /// # Returns
    /// * `Ok(score)` - The stored or predicted score
    /// * `Err` - If a lookup the strategy relies on fails
    fn predict_review_score(&self, user: &str, book: &str) -> Result<u8>;
}
