//! Router-level tests driving the full application over in-process HTTP

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tower::ServiceExt;

use folio_server::{config::AppConfig, repository::Repository, services::Services, web, AppState};

async fn test_app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let state = AppState {
        config: Arc::new(AppConfig::default()),
        services: Arc::new(Services::new(Repository::new(pool))),
    };

    web::router(state)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn post_form(app: &Router, uri: &str, form: &str) -> (StatusCode, String, Option<String>) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap(), location)
}

#[tokio::test]
async fn home_page_renders_empty_library() {
    let app = test_app().await;

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("The library is empty."));
}

#[tokio::test]
async fn added_author_and_book_show_up_in_listing() {
    let app = test_app().await;

    let (status, body, _) = post_form(
        &app,
        "/add_author",
        "name=Jane+Austen&birth_date=1775-12-16&date_of_death=1817-07-18",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Author &quot;Jane Austen&quot; added."));

    let (status, body, _) = post_form(
        &app,
        "/add_book",
        "title=Persuasion&isbn=9780141439686&publication_year=1817&author_id=1",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Book &quot;Persuasion&quot; added."));

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Persuasion"));
    assert!(body.contains("Jane Austen"));
}

#[tokio::test]
async fn search_filters_listing_case_insensitively() {
    let app = test_app().await;

    post_form(&app, "/add_author", "name=Jane+Austen").await;
    post_form(
        &app,
        "/add_book",
        "title=Persuasion&isbn=9780141439686&author_id=1",
    )
    .await;
    post_form(
        &app,
        "/add_book",
        "title=Emma&isbn=9780141439587&author_id=1",
    )
    .await;

    let (status, body) = get(&app, "/?q=PERSUA").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Persuasion"));
    assert!(!body.contains("Emma"));

    let (status, body) = get(&app, "/?q=dune").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No books found matching \"dune\"."));
}

#[tokio::test]
async fn missing_author_name_re_renders_form_with_message() {
    let app = test_app().await;

    let (status, body, _) = post_form(&app, "/add_author", "name=&birth_date=").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Name is required."));
}

#[tokio::test]
async fn missing_book_fields_re_render_form_with_message() {
    let app = test_app().await;

    let (status, body, _) = post_form(&app, "/add_book", "title=Persuasion&isbn=&author_id=").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Title, ISBN, and author are required."));
}

#[tokio::test]
async fn deleting_last_book_removes_book_and_author() {
    let app = test_app().await;

    post_form(&app, "/add_author", "name=Jane+Austen").await;
    post_form(
        &app,
        "/add_book",
        "title=Persuasion&isbn=9780141439686&author_id=1",
    )
    .await;

    let (status, _, location) = post_form(&app, "/book/1/delete", "").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let location = location.expect("delete should redirect");
    assert!(location.starts_with("/?notice="));
    assert!(location.contains("no%20remaining%20books"));

    let (_, body) = get(&app, "/").await;
    assert!(!body.contains("Persuasion"));

    // The picklist no longer offers the removed author
    let (_, body) = get(&app, "/add_book").await;
    assert!(!body.contains("Jane Austen"));
}

#[tokio::test]
async fn deleting_book_keeps_author_with_remaining_books() {
    let app = test_app().await;

    post_form(&app, "/add_author", "name=Jane+Austen").await;
    post_form(
        &app,
        "/add_book",
        "title=Persuasion&isbn=9780141439686&author_id=1",
    )
    .await;
    post_form(
        &app,
        "/add_book",
        "title=Emma&isbn=9780141439587&author_id=1",
    )
    .await;

    let (status, _, location) = post_form(&app, "/book/1/delete", "").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(!location.unwrap().contains("removed%20author"));

    let (_, body) = get(&app, "/").await;
    assert!(body.contains("Emma"));
    assert!(body.contains("Jane Austen"));
}

#[tokio::test]
async fn deleting_unknown_book_returns_404_page() {
    let app = test_app().await;

    let (status, body, _) = post_form(&app, "/book/42/delete", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Page not found"));
}

#[tokio::test]
async fn unknown_route_returns_custom_404_page() {
    let app = test_app().await;

    let (status, body) = get(&app, "/no_such_page").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Page not found"));
}

#[tokio::test]
async fn home_page_shows_notice_from_redirect() {
    let app = test_app().await;

    let (status, body) = get(&app, "/?notice=Deleted%20%22Persuasion%22.").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Deleted &quot;Persuasion&quot;."));
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let app = test_app().await;

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
}
