//! # Clustering Crate
//!
//! Groups books into clusters by aggregate inter-cluster affinity.
//!
//! ## Components
//!
//! ### BookGraphBuilder
//! Turns the user/book review graph into a book-to-book graph whose edge
//! weights are pairwise similarity scores, dropping pairs at or below a
//! threshold.
//!
//! ### ClusterEngine
//! Merges singleton clusters round by round, driven by cross-cluster
//! weight, with two interchangeable strategies:
//! - **Greedy**: scans every cluster pair each round, O(k^2) per round
//! - **Randomized**: anchors on one random cluster, O(k) per round,
//!   seedable for reproducible runs
//!
//! ## Example Usage
//!
//! ```ignore
//! use clustering::{BookGraphBuilder, ClusterEngine, MergeStrategy};
//! use std::sync::Arc;
//!
//! let book_graph = Arc::new(BookGraphBuilder::new(review_graph).build()?);
//! let clusters = ClusterEngine::new(book_graph)
//!     .with_seed(42)
//!     .find_clusters(8, MergeStrategy::Randomized)?;
//! ```

// Public modules
pub mod book_graph;
pub mod engine;

// Re-export commonly used types
pub use book_graph::BookGraphBuilder;
pub use engine::{ClusterEngine, MergeStrategy, cross_cluster_weight};
