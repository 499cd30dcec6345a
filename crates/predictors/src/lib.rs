//! # Predictors Crate
//!
//! Interchangeable strategies for predicting the score a user would give
//! a book they have not reviewed, plus the evaluation harness that
//! measures them against held-out reviews.
//!
//! ## Strategies
//!
//! - **FiveStarPredictor**: always predicts 5, the optimist baseline
//! - **BookAverageScorePredictor**: the book's rounded average score
//! - **SimilarUserPredictor**: similarity-weighted average of other
//!   reviewers' scores, falling back to the book average
//!
//! Every strategy returns the stored edge weight verbatim when the pair
//! is already connected.
//!
//! ## Example Usage
//!
//! ```ignore
//! use predictors::{ScorePredictor, SimilarUserPredictor};
//! use std::sync::Arc;
//!
//! let predictor = SimilarUserPredictor::new(Arc::clone(&graph));
//! let score = predictor.predict_review_score("alice", "Dune")?;
//! ```

// Public modules
pub mod evaluate;
pub mod strategies;
pub mod traits;

// Re-export commonly used types
pub use evaluate::{PredictorEvaluation, evaluate_predictor};
pub use strategies::{BookAverageScorePredictor, FiveStarPredictor, SimilarUserPredictor};
pub use traits::ScorePredictor;
