//! Build the book-to-book similarity graph the cluster engine runs on.
//!
//! Every pair of books in the review graph is scored with the selected
//! similarity variant; pairs at or below the threshold get no edge at
//! all, so the resulting graph is typically sparse. Scoring only reads
//! the review graph, so the pairwise sweep runs in parallel.

use rayon::prelude::*;
use review_graph::{Network, Result, ScoreType, VertexKind, WeightedGraph};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Builds a book graph from a weighted review graph.
///
/// ## Usage
/// ```ignore
/// let book_graph = BookGraphBuilder::new(Arc::clone(&review_graph))
///     .with_threshold(0.1)
///     .with_score_type(ScoreType::Strict)
///     .build()?;
/// ```
pub struct BookGraphBuilder {
    /// Shared reference to the review graph (read-only during the sweep)
    review_graph: Arc<WeightedGraph>,

    /// Similarity scores must exceed this for an edge to exist
    threshold: f64,

    /// Which similarity variant scores book pairs
    score_type: ScoreType,
}

impl BookGraphBuilder {
    /// Create a builder with the default threshold (0.05) and the
    /// unweighted score type.
    pub fn new(review_graph: Arc<WeightedGraph>) -> Self {
        Self {
            review_graph,
            threshold: 0.05,
            score_type: ScoreType::Unweighted,
        }
    }

    /// Configure the similarity threshold (default: 0.05)
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Configure the similarity variant (default: unweighted)
    pub fn with_score_type(mut self, score_type: ScoreType) -> Self {
        self.score_type = score_type;
        self
    }

    /// Score every book pair and connect the ones above the threshold.
    #[instrument(skip(self), fields(threshold = self.threshold))]
    pub fn build(&self) -> Result<WeightedGraph> {
        let mut books: Vec<String> = self
            .review_graph
            .get_all_vertices(Some(VertexKind::Book))
            .into_iter()
            .collect();
        books.sort();

        // Each book scores itself against every later book, in parallel
        let scored: Vec<Vec<(usize, usize, f64)>> = (0..books.len())
            .into_par_iter()
            .map(|i| {
                let mut edges = Vec::new();
                for j in (i + 1)..books.len() {
                    let score =
                        self.review_graph
                            .get_similarity_score(&books[i], &books[j], self.score_type)?;
                    if score > self.threshold {
                        edges.push((i, j, score));
                    }
                }
                Ok(edges)
            })
            .collect::<Result<_>>()?;

        let mut graph = WeightedGraph::new();
        for book in &books {
            graph.add_vertex(book, VertexKind::Book);
        }
        let mut edge_count = 0usize;
        for (i, j, score) in scored.into_iter().flatten() {
            graph.add_edge(&books[i], &books[j], score)?;
            edge_count += 1;
        }

        debug!(
            "book graph built: {} books, {} edges above threshold",
            books.len(),
            edge_count
        );
        Ok(graph)
    }
}
