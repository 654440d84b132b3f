//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use validator::Validate;

/// Full book row from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub isbn: String,
    pub publication_year: Option<i64>,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Book joined with its author's name, as shown in the listing
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BookWithAuthor {
    pub id: i64,
    pub title: String,
    pub isbn: String,
    pub publication_year: Option<i64>,
    pub author_id: i64,
    pub author_name: String,
}

impl fmt::Display for BookWithAuthor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.publication_year {
            Some(year) => write!(
                f,
                "'{}' by {} (Published: {})",
                self.title, self.author_name, year
            ),
            None => write!(f, "'{}' by {} (Published: n/a)", self.title, self.author_name),
        }
    }
}

/// Create book request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title is required."))]
    pub title: String,
    #[validate(length(min = 1, message = "ISBN is required."))]
    pub isbn: String,
    #[validate(range(min = 0, max = 3000, message = "Publication year must be between 0 and 3000."))]
    pub publication_year: Option<i64>,
    pub author_id: i64,
}

/// Outcome of a book deletion, including any orphan-author cleanup
#[derive(Debug, Clone)]
pub struct BookDeletion {
    pub title: String,
    pub removed_author: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listed_book(publication_year: Option<i64>) -> BookWithAuthor {
        BookWithAuthor {
            id: 1,
            title: "To Kill a Mockingbird".to_string(),
            isbn: "9780061120084".to_string(),
            publication_year,
            author_id: 1,
            author_name: "Harper Lee".to_string(),
        }
    }

    #[test]
    fn display_includes_author_and_year() {
        assert_eq!(
            listed_book(Some(1960)).to_string(),
            "'To Kill a Mockingbird' by Harper Lee (Published: 1960)"
        );
    }

    #[test]
    fn display_marks_missing_year() {
        assert_eq!(
            listed_book(None).to_string(),
            "'To Kill a Mockingbird' by Harper Lee (Published: n/a)"
        );
    }
}
