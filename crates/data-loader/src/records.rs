//! Record types parsed out of the review datasets.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single review: a user gave a book a score.
///
/// Both ids are opaque strings; the book id is an internal dataset
/// identifier that resolves to a display title through the names file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub user_id: String,
    pub book_id: String,
    /// Review score from 1 to 5
    pub score: u8,
}

/// Mapping from internal book identifier to display title.
pub type BookNames = HashMap<String, String>;
