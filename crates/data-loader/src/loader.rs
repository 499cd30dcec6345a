//! Assemble review graphs from parsed datasets.
//!
//! Construction runs in three phases, in this order:
//! 1. insert a user vertex per review and collect the distinct book ids
//!    the reviews reference;
//! 2. insert book vertices only for referenced ids, under their resolved
//!    display titles;
//! 3. insert one edge per review, user to title, carrying the score as
//!    the weight in the weighted variant.
//!
//! A review whose book id has no entry in the names directory is an
//! error; the loader never invents vertices.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::records::{BookNames, Review};
use review_graph::{Graph, Network, VertexKind, WeightedGraph};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

fn referenced_books(reviews: &[Review]) -> HashSet<&str> {
    reviews.iter().map(|r| r.book_id.as_str()).collect()
}

fn resolve<'a>(names: &'a BookNames, book_id: &str) -> Result<&'a str> {
    names
        .get(book_id)
        .map(String::as_str)
        .ok_or_else(|| DataLoadError::UnknownBook {
            id: book_id.to_string(),
        })
}

/// Build an unweighted review graph from parsed records.
pub fn build_review_graph(reviews: &[Review], names: &BookNames) -> Result<Graph> {
    let mut graph = Graph::new();

    let referenced = referenced_books(reviews);
    for review in reviews {
        graph.add_vertex(&review.user_id, VertexKind::User);
    }
    for (id, title) in names {
        if referenced.contains(id.as_str()) {
            graph.add_vertex(title, VertexKind::Book);
        }
    }
    for review in reviews {
        graph.add_edge(&review.user_id, resolve(names, &review.book_id)?)?;
    }

    Ok(graph)
}

/// Build a weighted review graph from parsed records; edge weights are
/// the review scores.
pub fn build_weighted_review_graph(reviews: &[Review], names: &BookNames) -> Result<WeightedGraph> {
    let mut graph = WeightedGraph::new();

    let referenced = referenced_books(reviews);
    for review in reviews {
        graph.add_vertex(&review.user_id, VertexKind::User);
    }
    for (id, title) in names {
        if referenced.contains(id.as_str()) {
            graph.add_vertex(title, VertexKind::Book);
        }
    }
    for review in reviews {
        let title = resolve(names, &review.book_id)?;
        graph.add_edge(&review.user_id, title, f64::from(review.score))?;
    }

    Ok(graph)
}

/// Load an unweighted review graph from the two dataset files.
pub fn load_review_graph(reviews_file: &Path, book_names_file: &Path) -> Result<Graph> {
    let (reviews, names) = parse_both(reviews_file, book_names_file)?;
    let graph = build_review_graph(&reviews, &names)?;
    info!(
        "loaded review graph: {} vertices from {} reviews",
        graph.vertex_count(),
        reviews.len()
    );
    Ok(graph)
}

/// Load a weighted review graph from the two dataset files.
pub fn load_weighted_review_graph(
    reviews_file: &Path,
    book_names_file: &Path,
) -> Result<WeightedGraph> {
    let (reviews, names) = parse_both(reviews_file, book_names_file)?;
    let graph = build_weighted_review_graph(&reviews, &names)?;
    info!(
        "loaded weighted review graph: {} vertices from {} reviews",
        graph.vertex_count(),
        reviews.len()
    );
    Ok(graph)
}

/// Parse the two input files in parallel.
fn parse_both(reviews_file: &Path, book_names_file: &Path) -> Result<(Vec<Review>, BookNames)> {
    let (reviews, names) = rayon::join(
        || parser::parse_reviews(reviews_file),
        || parser::parse_book_names(book_names_file),
    );
    Ok((reviews?, names?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use review_graph::ScoreType;

    fn create_test_records() -> (Vec<Review>, BookNames) {
        let reviews = vec![
            Review {
                user_id: "u1".to_string(),
                book_id: "b1".to_string(),
                score: 5,
            },
            Review {
                user_id: "u1".to_string(),
                book_id: "b2".to_string(),
                score: 3,
            },
            Review {
                user_id: "u2".to_string(),
                book_id: "b1".to_string(),
                score: 4,
            },
        ];
        let mut names = BookNames::new();
        names.insert("b1".to_string(), "Dune".to_string());
        names.insert("b2".to_string(), "Emma".to_string());
        // A book nobody reviewed must not become a vertex
        names.insert("b3".to_string(), "Unreviewed".to_string());
        (reviews, names)
    }

    #[test]
    fn test_build_review_graph() {
        let (reviews, names) = create_test_records();
        let graph = build_review_graph(&reviews, &names).unwrap();

        assert_eq!(graph.get_all_vertices(Some(VertexKind::User)).len(), 2);
        let books = graph.get_all_vertices(Some(VertexKind::Book));
        assert_eq!(books.len(), 2);
        assert!(books.contains("Dune"));
        assert!(!books.contains("Unreviewed"));

        assert!(graph.adjacent("u1", "Dune"));
        assert!(graph.adjacent("u2", "Dune"));
        assert!(!graph.adjacent("u2", "Emma"));
    }

    #[test]
    fn test_build_weighted_review_graph_carries_scores() {
        let (reviews, names) = create_test_records();
        let graph = build_weighted_review_graph(&reviews, &names).unwrap();

        assert_eq!(graph.get_weight("u1", "Dune").unwrap(), 5.0);
        assert_eq!(graph.get_weight("u2", "Dune").unwrap(), 4.0);
        assert_eq!(graph.get_weight("u1", "Emma").unwrap(), 3.0);
        assert_eq!(
            graph
                .get_similarity_score("u1", "u2", ScoreType::Unweighted)
                .unwrap(),
            0.5
        );
    }

    #[test]
    fn test_unknown_book_id_is_an_error() {
        let (mut reviews, names) = create_test_records();
        reviews.push(Review {
            user_id: "u2".to_string(),
            book_id: "nope".to_string(),
            score: 2,
        });

        let err = build_weighted_review_graph(&reviews, &names).unwrap_err();
        assert!(matches!(err, DataLoadError::UnknownBook { .. }));
    }
}
