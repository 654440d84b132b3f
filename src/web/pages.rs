//! Page handlers for the library UI

use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{author::CreateAuthor, book::CreateBook},
    web::views,
    AppState,
};

/// Query parameters for the home page
#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    pub q: Option<String>,
    pub notice: Option<String>,
}

/// GET / - list books with optional title search
pub async fn home(
    State(state): State<AppState>,
    Query(query): Query<HomeQuery>,
) -> AppResult<Html<String>> {
    let q = query.q.as_deref().map(str::trim).unwrap_or("");

    let books = state
        .services
        .library
        .search_books(if q.is_empty() { None } else { Some(q) })
        .await?;

    let no_results = !q.is_empty() && books.is_empty();

    Ok(Html(views::home_page(
        &books,
        q,
        no_results,
        query.notice.as_deref(),
    )))
}

/// Add-author form fields, as submitted by the browser
#[derive(Debug, Deserialize)]
pub struct AuthorForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub birth_date: String,
    #[serde(default)]
    pub date_of_death: String,
}

/// GET /add_author - render the empty form
pub async fn add_author_form() -> Html<String> {
    Html(views::add_author_page(None))
}

/// POST /add_author - process the form and re-render with a message
pub async fn add_author_submit(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Html<String>> {
    let name = form.name.trim().to_string();

    if name.is_empty() {
        return Ok(Html(views::add_author_page(Some("Name is required."))));
    }

    let birth_date = match parse_optional_date(&form.birth_date) {
        Ok(date) => date,
        Err(message) => return Ok(Html(views::add_author_page(Some(message)))),
    };

    let date_of_death = match parse_optional_date(&form.date_of_death) {
        Ok(date) => date,
        Err(message) => return Ok(Html(views::add_author_page(Some(message)))),
    };

    let request = CreateAuthor {
        name,
        birth_date,
        date_of_death,
    };

    let message = match state.services.library.create_author(request).await {
        Ok(author) => format!("Author \"{}\" added.", author.name),
        Err(AppError::Validation(msg)) | Err(AppError::Conflict(msg)) => msg,
        Err(e) => return Err(e),
    };

    Ok(Html(views::add_author_page(Some(&message))))
}

/// Add-book form fields, as submitted by the browser
#[derive(Debug, Deserialize)]
pub struct BookForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub publication_year: String,
    #[serde(default)]
    pub author_id: String,
}

/// GET /add_book - render the form with the author picklist
pub async fn add_book_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    let authors = state.services.library.list_authors().await?;
    Ok(Html(views::add_book_page(&authors, None)))
}

/// POST /add_book - process the form and re-render with a message
pub async fn add_book_submit(
    State(state): State<AppState>,
    Form(form): Form<BookForm>,
) -> AppResult<Html<String>> {
    let authors = state.services.library.list_authors().await?;

    let title = form.title.trim();
    let isbn = form.isbn.trim();
    let author_id = form.author_id.trim().parse::<i64>();

    let (title, isbn, author_id) = match (title.is_empty(), isbn.is_empty(), author_id) {
        (false, false, Ok(id)) => (title.to_string(), isbn.to_string(), id),
        _ => {
            return Ok(Html(views::add_book_page(
                &authors,
                Some("Title, ISBN, and author are required."),
            )))
        }
    };

    // Non-numeric years are treated as absent
    let publication_year = {
        let raw = form.publication_year.trim();
        if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
            raw.parse::<i64>().ok()
        } else {
            None
        }
    };

    let request = CreateBook {
        title,
        isbn,
        publication_year,
        author_id,
    };

    let message = match state.services.library.create_book(request).await {
        Ok(book) => format!("Book \"{}\" added.", book.title),
        Err(AppError::Validation(msg)) | Err(AppError::Conflict(msg)) => msg,
        Err(e) => return Err(e),
    };

    Ok(Html(views::add_book_page(&authors, Some(&message))))
}

/// POST /book/{id}/delete - delete a book, cleaning up an orphaned author,
/// then redirect home with a notice
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Redirect> {
    let deletion = state.services.library.delete_book(id).await?;

    let notice = match &deletion.removed_author {
        Some(author) => format!(
            "Deleted \"{}\" and removed author \"{}\" (no remaining books).",
            deletion.title, author
        ),
        None => format!("Deleted \"{}\".", deletion.title),
    };

    Ok(Redirect::to(&format!(
        "/?notice={}",
        urlencoding::encode(&notice)
    )))
}

/// Fallback handler for unknown routes
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(views::not_found_page()))
}

fn parse_optional_date(raw: &str) -> Result<Option<NaiveDate>, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| "Dates must use the YYYY-MM-DD format.")
}
