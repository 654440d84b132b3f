//! Authors repository for database operations

use chrono::Utc;
use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, CreateAuthor},
};

const AUTHOR_COLUMNS: &str = "id, name, birth_date, date_of_death, created_at";

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Sqlite>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get author by id
    pub async fn get(&self, id: i64) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(&format!(
            "SELECT {} FROM authors WHERE id = ?",
            AUTHOR_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    /// Find an author by exact name
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(&format!(
            "SELECT {} FROM authors WHERE name = ?",
            AUTHOR_COLUMNS
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(author)
    }

    /// List all authors ordered by name
    pub async fn list_by_name(&self) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(&format!(
            "SELECT {} FROM authors ORDER BY name ASC",
            AUTHOR_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(authors)
    }

    /// Insert a new author and return the stored row
    pub async fn create(&self, author: &CreateAuthor) -> AppResult<Author> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO authors (name, birth_date, date_of_death, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&author.name)
        .bind(author.birth_date)
        .bind(author.date_of_death)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        self.get(id).await
    }
}
