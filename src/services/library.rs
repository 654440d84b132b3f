//! Library catalog service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, CreateAuthor},
        book::{Book, BookDeletion, BookWithAuthor, CreateBook},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct LibraryService {
    repository: Repository,
}

impl LibraryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List books, optionally filtered by a case-insensitive title substring
    pub async fn search_books(&self, title: Option<&str>) -> AppResult<Vec<BookWithAuthor>> {
        self.repository.books.search_by_title(title).await
    }

    /// List all authors ordered by name, for the add-book picklist
    pub async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list_by_name().await
    }

    /// Create a new author. Names are unique across the library.
    pub async fn create_author(&self, author: CreateAuthor) -> AppResult<Author> {
        author
            .validate()
            .map_err(|e| AppError::Validation(first_message(&e)))?;

        if self
            .repository
            .authors
            .find_by_name(&author.name)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "An author named \"{}\" already exists.",
                author.name
            )));
        }

        let created = self.repository.authors.create(&author).await?;
        tracing::info!("Created author id={} name={:?}", created.id, created.name);
        Ok(created)
    }

    /// Create a new book. The referenced author must exist and the ISBN
    /// must not already be catalogued.
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()
            .map_err(|e| AppError::Validation(first_message(&e)))?;

        let author = match self.repository.authors.get(book.author_id).await {
            Ok(author) => author,
            Err(AppError::NotFound(_)) => {
                return Err(AppError::Validation(
                    "The selected author does not exist.".to_string(),
                ))
            }
            Err(e) => return Err(e),
        };

        if self
            .repository
            .books
            .find_by_isbn(&book.isbn)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "A book with ISBN {} is already in the library.",
                book.isbn
            )));
        }

        let created = self.repository.books.create(&book).await?;
        tracing::info!(
            "Created book id={} title={:?} author={:?}",
            created.id,
            created.title,
            author.name
        );
        Ok(created)
    }

    /// Delete a book by id. When this was the author's last book, the
    /// author row is removed as well.
    pub async fn delete_book(&self, id: i64) -> AppResult<BookDeletion> {
        let deletion = self.repository.books.delete_with_author_cleanup(id).await?;

        match &deletion.removed_author {
            Some(author) => tracing::info!(
                "Deleted book {:?} and orphaned author {:?}",
                deletion.title,
                author
            ),
            None => tracing::info!("Deleted book {:?}", deletion.title),
        }

        Ok(deletion)
    }
}

/// First human-readable message out of a validation report
fn first_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid input.".to_string())
}
