//! Web layer: routes, page handlers and HTML views

pub mod health;
pub mod pages;
pub mod views;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route(
            "/add_author",
            get(pages::add_author_form).post(pages::add_author_submit),
        )
        .route(
            "/add_book",
            get(pages::add_book_form).post(pages::add_book_submit),
        )
        .route("/book/:id/delete", post(pages::delete_book))
        .route("/health", get(health::health_check))
        .fallback(pages::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
