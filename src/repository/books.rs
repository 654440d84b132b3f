//! Books repository for database operations

use chrono::Utc;
use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookDeletion, BookWithAuthor, CreateBook},
};

const BOOK_COLUMNS: &str = "id, title, isbn, publication_year, author_id, created_at";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get book by id
    pub async fn get(&self, id: i64) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!("SELECT {} FROM books WHERE id = ?", BOOK_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Find a book by exact ISBN
    pub async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE isbn = ?",
            BOOK_COLUMNS
        ))
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    /// List books joined with their author, optionally filtered by a
    /// case-insensitive title substring, ordered by title.
    pub async fn search_by_title(&self, title: Option<&str>) -> AppResult<Vec<BookWithAuthor>> {
        let select = r#"
            SELECT b.id, b.title, b.isbn, b.publication_year, b.author_id, a.name AS author_name
            FROM books b
            JOIN authors a ON a.id = b.author_id
        "#;

        let books = match title.filter(|t| !t.is_empty()) {
            Some(term) => {
                let pattern = format!("%{}%", term.to_lowercase());
                sqlx::query_as::<_, BookWithAuthor>(&format!(
                    "{} WHERE LOWER(b.title) LIKE ? ORDER BY b.title ASC",
                    select
                ))
                .bind(pattern)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, BookWithAuthor>(&format!("{} ORDER BY b.title ASC", select))
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(books)
    }

    /// Insert a new book and return the stored row
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO books (title, isbn, publication_year, author_id, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&book.title)
        .bind(&book.isbn)
        .bind(book.publication_year)
        .bind(book.author_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        self.get(id).await
    }

    /// Delete a book. Within the same transaction, the author is deleted
    /// as well when no books remain for them.
    pub async fn delete_with_author_cleanup(&self, id: i64) -> AppResult<BookDeletion> {
        let book = self.get(id).await?;

        let author_name: String = sqlx::query_scalar("SELECT name FROM authors WHERE id = ?")
            .bind(book.author_id)
            .fetch_one(&self.pool)
            .await?;

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(book.id)
            .execute(&mut *tx)
            .await?;

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE author_id = ?")
            .bind(book.author_id)
            .fetch_one(&mut *tx)
            .await?;

        let removed_author = if remaining == 0 {
            sqlx::query("DELETE FROM authors WHERE id = ?")
                .bind(book.author_id)
                .execute(&mut *tx)
                .await?;
            Some(author_name)
        } else {
            None
        };

        tx.commit().await?;

        Ok(BookDeletion {
            title: book.title,
            removed_author,
        })
    }
}
