//! Evaluate a predictor against held-out review records.

use crate::traits::ScorePredictor;
use anyhow::{Result, anyhow};
use data_loader::{BookNames, Review};
use serde::Serialize;
use tracing::info;

/// Accuracy summary for one predictor over one test set.
#[derive(Debug, Clone, Serialize)]
pub struct PredictorEvaluation {
    pub num_reviews: usize,
    pub num_correct: usize,
    /// Mean absolute error between predicted and actual scores
    pub average_error: f64,
}

/// Run the predictor over every test review and aggregate exact-match
/// count and mean absolute error.
///
/// Test records carry internal book ids; `book_names` resolves them to
/// the titles the graph uses as vertex keys.
pub fn evaluate_predictor(
    predictor: &dyn ScorePredictor,
    test_reviews: &[Review],
    book_names: &BookNames,
) -> Result<PredictorEvaluation> {
    let mut num_correct = 0usize;
    let mut total_error = 0u64;

    for review in test_reviews {
        let title = book_names
            .get(&review.book_id)
            .ok_or_else(|| anyhow!("no book name for id {}", review.book_id))?;
        let predicted = predictor.predict_review_score(&review.user_id, title)?;

        if predicted == review.score {
            num_correct += 1;
        }
        total_error += u64::from(predicted.abs_diff(review.score));
    }

    let num_reviews = test_reviews.len();
    let average_error = if num_reviews > 0 {
        total_error as f64 / num_reviews as f64
    } else {
        0.0
    };

    info!(
        "{}: {}/{} exact, mean absolute error {:.3}",
        predictor.name(),
        num_correct,
        num_reviews,
        average_error
    );
    Ok(PredictorEvaluation {
        num_reviews,
        num_correct,
        average_error,
    })
}
