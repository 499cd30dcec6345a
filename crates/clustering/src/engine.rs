//! Cluster books by merging on cross-cluster weight.
//!
//! Both strategies start from the trivial partition (every book its own
//! singleton cluster) and merge one pair per round until the requested
//! cluster count remains. Greedy scans every unordered pair per round,
//! O(k^2) evaluations; randomized anchors on one random cluster and only
//! scans its k-1 partners. Greedy buys quality with that extra cost.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use review_graph::{Network, Result, VertexKind, WeightedGraph};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

/// How the engine picks the pair of clusters to merge each round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Merge the globally best pair; deterministic
    Greedy,
    /// Anchor on a random cluster, merge it into its best partner
    Randomized,
}

/// Mean pairwise edge weight between two disjoint clusters: the sum of
/// `get_weight(u, v)` over the cross product, divided by `|a| * |b|`.
/// Pairs with no edge contribute 0. Both clusters must be non-empty.
pub fn cross_cluster_weight(
    graph: &WeightedGraph,
    cluster1: &HashSet<String>,
    cluster2: &HashSet<String>,
) -> Result<f64> {
    let mut total = 0.0;
    for u in cluster1 {
        for v in cluster2 {
            total += graph.get_weight(u, v)?;
        }
    }
    Ok(total / (cluster1.len() * cluster2.len()) as f64)
}

/// Merges book clusters over a similarity-weighted book graph.
///
/// ## Usage
/// ```ignore
/// let clusters = ClusterEngine::new(Arc::clone(&book_graph))
///     .with_seed(42)
///     .find_clusters(8, MergeStrategy::Randomized)?;
/// ```
pub struct ClusterEngine {
    /// Shared reference to the book graph (read-only)
    book_graph: Arc<WeightedGraph>,

    /// Seed for the randomized strategy; unseeded when None
    seed: Option<u64>,
}

impl ClusterEngine {
    /// Create a new engine over the given book graph.
    pub fn new(book_graph: Arc<WeightedGraph>) -> Self {
        Self {
            book_graph,
            seed: None,
        }
    }

    /// Fix the random seed so randomized runs are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Partition the graph's books into `num_clusters` clusters.
    ///
    /// Runs exactly `initial - num_clusters` merge rounds. If
    /// `num_clusters` is at least the book count, the trivial singleton
    /// partition comes back unchanged; a target of 0 is treated as 1,
    /// since a partition has at least one cluster. The result always
    /// partitions the full book vertex set: every book in exactly one
    /// cluster.
    #[instrument(skip(self))]
    pub fn find_clusters(
        &self,
        num_clusters: usize,
        strategy: MergeStrategy,
    ) -> Result<Vec<HashSet<String>>> {
        let clusters = self.initial_clusters();
        match strategy {
            MergeStrategy::Greedy => self.merge_greedy(clusters, num_clusters),
            MergeStrategy::Randomized => self.merge_randomized(clusters, num_clusters),
        }
    }

    /// One singleton cluster per book, in sorted key order so repeated
    /// runs see the same cluster list.
    fn initial_clusters(&self) -> Vec<HashSet<String>> {
        let mut books: Vec<String> = self
            .book_graph
            .get_all_vertices(Some(VertexKind::Book))
            .into_iter()
            .collect();
        books.sort();
        books
            .into_iter()
            .map(|book| HashSet::from([book]))
            .collect()
    }

    fn merge_greedy(
        &self,
        mut clusters: Vec<HashSet<String>>,
        num_clusters: usize,
    ) -> Result<Vec<HashSet<String>>> {
        let rounds = clusters.len().saturating_sub(num_clusters.max(1));
        for _ in 0..rounds {
            debug!("{} clusters", clusters.len());

            // Scan every unordered pair; first pair found wins ties
            let mut best = -1.0_f64;
            let mut best_pair: Option<(usize, usize)> = None;
            for i1 in 0..clusters.len() {
                for i2 in (i1 + 1)..clusters.len() {
                    let score =
                        cross_cluster_weight(&self.book_graph, &clusters[i1], &clusters[i2])?;
                    if score > best {
                        best = score;
                        best_pair = Some((i1, i2));
                    }
                }
            }

            let Some((i1, i2)) = best_pair else { break };
            let merged = clusters.remove(i1);
            // i2 shifted down by one when i1 < i2 was removed
            clusters[i2 - 1].extend(merged);
        }
        Ok(clusters)
    }

    fn merge_randomized(
        &self,
        mut clusters: Vec<HashSet<String>>,
        num_clusters: usize,
    ) -> Result<Vec<HashSet<String>>> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let rounds = clusters.len().saturating_sub(num_clusters.max(1));
        for _ in 0..rounds {
            debug!("{} clusters", clusters.len());

            let anchor = rng.random_range(0..clusters.len());
            let mut best = -1.0_f64;
            let mut best_partner: Option<usize> = None;
            for (idx, cluster) in clusters.iter().enumerate() {
                if idx != anchor {
                    let score = cross_cluster_weight(&self.book_graph, &clusters[anchor], cluster)?;
                    if score > best {
                        best = score;
                        best_partner = Some(idx);
                    }
                }
            }

            let Some(partner) = best_partner else { break };
            let merged = clusters.remove(anchor);
            let partner = if partner > anchor { partner - 1 } else { partner };
            clusters[partner].extend(merged);
        }
        Ok(clusters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two obvious communities: {a, b} tightly linked, {c, d} tightly
    /// linked, one weak link across.
    fn create_book_graph() -> Arc<WeightedGraph> {
        let mut graph = WeightedGraph::new();
        for book in ["a", "b", "c", "d"] {
            graph.add_vertex(book, VertexKind::Book);
        }
        graph.add_edge("a", "b", 0.9).unwrap();
        graph.add_edge("c", "d", 0.8).unwrap();
        graph.add_edge("b", "c", 0.1).unwrap();
        Arc::new(graph)
    }

    fn assert_partitions(clusters: &[HashSet<String>], graph: &WeightedGraph) {
        let mut seen: HashSet<String> = HashSet::new();
        for cluster in clusters {
            for book in cluster {
                // Disjoint: no book in two clusters
                assert!(seen.insert(book.clone()), "{book} appears twice");
            }
        }
        // Union is exactly the book vertex set
        assert_eq!(seen, graph.get_all_vertices(Some(VertexKind::Book)));
    }

    #[test]
    fn test_cross_cluster_weight_singletons() {
        let graph = create_book_graph();
        let a = HashSet::from(["a".to_string()]);
        let b = HashSet::from(["b".to_string()]);
        let d = HashSet::from(["d".to_string()]);

        // With a stored weight the mean over 1x1 pairs is that weight
        assert_eq!(cross_cluster_weight(&graph, &a, &b).unwrap(), 0.9);
        // No edge at all contributes 0
        assert_eq!(cross_cluster_weight(&graph, &a, &d).unwrap(), 0.0);
    }

    #[test]
    fn test_cross_cluster_weight_averages_over_pairs() {
        let graph = create_book_graph();
        let ab = HashSet::from(["a".to_string(), "b".to_string()]);
        let cd = HashSet::from(["c".to_string(), "d".to_string()]);

        // Only b-c carries weight across: 0.1 / (2 * 2)
        let score = cross_cluster_weight(&graph, &ab, &cd).unwrap();
        assert!((score - 0.025).abs() < 1e-12);
    }

    #[test]
    fn test_greedy_finds_communities() {
        let graph = create_book_graph();
        let engine = ClusterEngine::new(Arc::clone(&graph));

        let clusters = engine.find_clusters(2, MergeStrategy::Greedy).unwrap();
        assert_eq!(clusters.len(), 2);
        assert_partitions(&clusters, &graph);

        let ab = HashSet::from(["a".to_string(), "b".to_string()]);
        let cd = HashSet::from(["c".to_string(), "d".to_string()]);
        assert!(clusters.contains(&ab));
        assert!(clusters.contains(&cd));
    }

    #[test]
    fn test_greedy_is_deterministic() {
        let graph = create_book_graph();
        let engine = ClusterEngine::new(Arc::clone(&graph));

        let first = engine.find_clusters(2, MergeStrategy::Greedy).unwrap();
        let second = engine.find_clusters(2, MergeStrategy::Greedy).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_randomized_with_seed_is_deterministic() {
        let graph = create_book_graph();

        let first = ClusterEngine::new(Arc::clone(&graph))
            .with_seed(7)
            .find_clusters(2, MergeStrategy::Randomized)
            .unwrap();
        let second = ClusterEngine::new(Arc::clone(&graph))
            .with_seed(7)
            .find_clusters(2, MergeStrategy::Randomized)
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_partitions(&first, &graph);
    }

    #[test]
    fn test_everything_merges_down_to_one_cluster() {
        let graph = create_book_graph();
        let engine = ClusterEngine::new(Arc::clone(&graph));

        let clusters = engine.find_clusters(1, MergeStrategy::Greedy).unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 4);
    }

    #[test]
    fn test_degenerate_target_returns_singletons() {
        let graph = create_book_graph();
        let engine = ClusterEngine::new(Arc::clone(&graph));

        for num_clusters in [4, 10] {
            let clusters = engine
                .find_clusters(num_clusters, MergeStrategy::Greedy)
                .unwrap();
            assert_eq!(clusters.len(), 4);
            assert!(clusters.iter().all(|c| c.len() == 1));
            assert_partitions(&clusters, &graph);
        }
    }

    #[test]
    fn test_empty_graph_yields_no_clusters() {
        let engine = ClusterEngine::new(Arc::new(WeightedGraph::new()));
        let clusters = engine.find_clusters(3, MergeStrategy::Greedy).unwrap();
        assert!(clusters.is_empty());
    }
}
