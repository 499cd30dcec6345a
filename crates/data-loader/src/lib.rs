//! # Data Loader Crate
//!
//! Loads the review datasets and assembles the review graphs the rest of
//! the system works on.
//!
//! ## Main Components
//!
//! - **records**: Parsed record types (`Review`, the book name directory)
//! - **parser**: Parse the CSV files into records
//! - **loader**: Build `Graph`/`WeightedGraph` from records or files
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::load_weighted_review_graph;
//! use std::path::Path;
//!
//! let graph = load_weighted_review_graph(
//!     Path::new("data/reviews.csv"),
//!     Path::new("data/book_names.csv"),
//! )?;
//! ```

// Public modules
pub mod error;
pub mod loader;
pub mod parser;
pub mod records;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use loader::{
    build_review_graph, build_weighted_review_graph, load_review_graph,
    load_weighted_review_graph,
};
pub use records::{BookNames, Review};
