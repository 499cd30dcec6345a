//! Parsers for the review datasets.
//!
//! Two flat CSV files feed the system:
//! - reviews file: `user_id,book_id,score`, one review per line
//! - book names file: `book_id,title`, resolving internal ids to titles
//!
//! Titles may themselves contain commas, so the names file is split on
//! the first comma only, and a surrounding pair of double quotes is
//! stripped.

use crate::error::{DataLoadError, Result};
use crate::records::{BookNames, Review};
use std::fs;
use std::path::Path;
use tracing::debug;

fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content.lines().map(|s| s.to_string()).collect())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Strip one surrounding pair of double quotes, if present.
fn strip_quotes(s: &str) -> &str {
    let s = s.trim();
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

/// Parse one `user_id,book_id,score` line.
pub fn parse_review_line(line: &str, file: &str, line_no: usize) -> Result<Review> {
    let mut parts = line.split(',');

    let user_id = parts.next().ok_or_else(|| DataLoadError::ParseError {
        file: file.to_string(),
        line: line_no,
        reason: "Missing user id".to_string(),
    })?;
    let book_id = parts.next().ok_or_else(|| DataLoadError::ParseError {
        file: file.to_string(),
        line: line_no,
        reason: "Missing book id".to_string(),
    })?;
    let score_str = parts.next().ok_or_else(|| DataLoadError::ParseError {
        file: file.to_string(),
        line: line_no,
        reason: "Missing score".to_string(),
    })?;

    let score: u8 = score_str
        .trim()
        .parse()
        .map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: format!("Invalid score: {}", e),
        })?;
    if !(1..=5).contains(&score) {
        return Err(DataLoadError::InvalidValue {
            field: "score".to_string(),
            value: score.to_string(),
        });
    }

    Ok(Review {
        user_id: user_id.trim().to_string(),
        book_id: book_id.trim().to_string(),
        score,
    })
}

/// Parse one `book_id,title` line. The title keeps any commas it contains.
pub fn parse_book_name_line(line: &str, file: &str, line_no: usize) -> Result<(String, String)> {
    let (id, title) = line.split_once(',').ok_or_else(|| DataLoadError::ParseError {
        file: file.to_string(),
        line: line_no,
        reason: "Missing title".to_string(),
    })?;
    Ok((id.trim().to_string(), strip_quotes(title).to_string()))
}

/// Parse the reviews file into review records.
pub fn parse_reviews(path: &Path) -> Result<Vec<Review>> {
    let file = file_name(path);
    let lines = read_lines(path)?;
    let mut reviews = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue; // Skip empty lines
        }
        reviews.push(parse_review_line(trimmed, &file, line_no)?);
    }

    debug!("parsed {} reviews from {}", reviews.len(), file);
    Ok(reviews)
}

/// Parse the book names file into an id -> title directory.
pub fn parse_book_names(path: &Path) -> Result<BookNames> {
    let file = file_name(path);
    let lines = read_lines(path)?;
    let mut names = BookNames::new();

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue; // Skip empty lines
        }
        let (id, title) = parse_book_name_line(trimmed, &file, line_no)?;
        names.insert(id, title);
    }

    debug!("parsed {} book names from {}", names.len(), file);
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_review_line() {
        let review = parse_review_line("alice,b42,5", "reviews.csv", 1).unwrap();
        assert_eq!(review.user_id, "alice");
        assert_eq!(review.book_id, "b42");
        assert_eq!(review.score, 5);
    }

    #[test]
    fn test_parse_review_line_rejects_bad_score() {
        assert!(parse_review_line("alice,b42,ten", "reviews.csv", 1).is_err());

        let err = parse_review_line("alice,b42,9", "reviews.csv", 1).unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidValue { .. }));
    }

    #[test]
    fn test_parse_review_line_reports_missing_fields() {
        let err = parse_review_line("alice", "reviews.csv", 3).unwrap_err();
        match err {
            DataLoadError::ParseError { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_book_name_line_keeps_commas_in_title() {
        let (id, title) =
            parse_book_name_line("b1,The Lion, the Witch and the Wardrobe", "names.csv", 1)
                .unwrap();
        assert_eq!(id, "b1");
        assert_eq!(title, "The Lion, the Witch and the Wardrobe");
    }

    #[test]
    fn test_parse_book_name_line_strips_quotes() {
        let (_, title) = parse_book_name_line("b2,\"Crime and Punishment\"", "names.csv", 1).unwrap();
        assert_eq!(title, "Crime and Punishment");
    }
}
