//! The built-in prediction strategies.

pub mod book_average;
pub mod five_star;
pub mod similar_user;

pub use book_average::BookAverageScorePredictor;
pub use five_star::FiveStarPredictor;
pub use similar_user::SimilarUserPredictor;
