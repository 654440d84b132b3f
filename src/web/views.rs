//! HTML views for the library pages
//!
//! Pages are rendered as plain HTML strings wrapped in a shared layout,
//! with user-supplied values escaped before interpolation.

use crate::models::{author::Author, book::BookWithAuthor};

const STYLESHEET: &str = r#"
        body {
            font-family: Georgia, 'Times New Roman', serif;
            background-color: #faf8f2;
            color: #2b2b2b;
            max-width: 860px;
            margin: 0 auto;
            padding: 0 20px 40px;
            line-height: 1.5;
        }
        header {
            border-bottom: 2px solid #8b6f47;
            margin-bottom: 24px;
            padding: 16px 0 8px;
        }
        header h1 { margin: 0 0 4px; }
        nav a { margin-right: 16px; color: #8b6f47; }
        .notice {
            background-color: #e8f0e0;
            border: 1px solid #9bb97f;
            border-radius: 4px;
            padding: 8px 12px;
            margin-bottom: 16px;
        }
        table { border-collapse: collapse; width: 100%; }
        th, td { text-align: left; padding: 6px 10px; border-bottom: 1px solid #ddd; }
        form.inline { display: inline; }
        label { display: block; margin-top: 12px; }
        input, select { padding: 4px 6px; margin-top: 2px; }
        button { padding: 4px 12px; margin-top: 12px; cursor: pointer; }
"#;

/// Wrap a page body in the shared document shell
fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Folio</title>
    <style>{stylesheet}
    </style>
</head>
<body>
    <header>
        <h1>Folio</h1>
        <nav>
            <a href="/">Library</a>
            <a href="/add_author">Add Author</a>
            <a href="/add_book">Add Book</a>
        </nav>
    </header>
    <main>
{body}
    </main>
</body>
</html>
"#,
        title = escape(title),
        stylesheet = STYLESHEET,
        body = body,
    )
}

fn notice_block(notice: Option<&str>) -> String {
    match notice {
        Some(text) => format!("        <div class=\"notice\">{}</div>\n", escape(text)),
        None => String::new(),
    }
}

/// The home page: search form plus the book listing
pub fn home_page(
    books: &[BookWithAuthor],
    q: &str,
    no_results: bool,
    notice: Option<&str>,
) -> String {
    let mut body = String::new();

    body.push_str(&notice_block(notice));

    body.push_str(&format!(
        r#"        <form method="get" action="/">
            <input type="text" name="q" value="{}" placeholder="Search by title">
            <button type="submit">Search</button>
            <a href="/">Clear</a>
        </form>
"#,
        escape(q)
    ));

    if no_results {
        body.push_str(&format!(
            "        <p>No books found matching \"{}\".</p>\n",
            escape(q)
        ));
    } else if books.is_empty() {
        body.push_str("        <p>The library is empty. <a href=\"/add_book\">Add a book</a> to get started.</p>\n");
    } else {
        body.push_str(
            r#"        <table>
            <tr><th>Title</th><th>Author</th><th>ISBN</th><th>Year</th><th></th></tr>
"#,
        );
        for book in books {
            let year = book
                .publication_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "n/a".to_string());
            body.push_str(&format!(
                r#"            <tr>
                <td>{title}</td>
                <td>{author}</td>
                <td>{isbn}</td>
                <td>{year}</td>
                <td>
                    <form class="inline" method="post" action="/book/{id}/delete">
                        <button type="submit">Delete</button>
                    </form>
                </td>
            </tr>
"#,
                title = escape(&book.title),
                author = escape(&book.author_name),
                isbn = escape(&book.isbn),
                year = year,
                id = book.id,
            ));
        }
        body.push_str("        </table>\n");
    }

    layout("Library", &body)
}

/// The add-author form, optionally with a submission message
pub fn add_author_page(message: Option<&str>) -> String {
    let body = format!(
        r#"{notice}        <h2>Add Author</h2>
        <form method="post" action="/add_author">
            <label>Name
                <input type="text" name="name">
            </label>
            <label>Birth date
                <input type="date" name="birth_date">
            </label>
            <label>Date of death
                <input type="date" name="date_of_death">
            </label>
            <button type="submit">Add Author</button>
        </form>
"#,
        notice = notice_block(message),
    );

    layout("Add Author", &body)
}

/// The add-book form with the author picklist, optionally with a message
pub fn add_book_page(authors: &[Author], message: Option<&str>) -> String {
    let options: String = authors
        .iter()
        .map(|author| {
            format!(
                "                    <option value=\"{}\">{}</option>\n",
                author.id,
                escape(&author.name)
            )
        })
        .collect();

    let body = format!(
        r#"{notice}        <h2>Add Book</h2>
        <form method="post" action="/add_book">
            <label>Title
                <input type="text" name="title">
            </label>
            <label>ISBN
                <input type="text" name="isbn">
            </label>
            <label>Publication year
                <input type="number" name="publication_year" min="0" max="3000">
            </label>
            <label>Author
                <select name="author_id">
                    <option value="">Select an author</option>
{options}                </select>
            </label>
            <button type="submit">Add Book</button>
        </form>
"#,
        notice = notice_block(message),
        options = options,
    );

    layout("Add Book", &body)
}

/// The custom 404 page
pub fn not_found_page() -> String {
    layout(
        "Page Not Found",
        r#"        <h2>Page not found</h2>
        <p>The page you were looking for does not exist. <a href="/">Back to the library</a>.</p>
"#,
    )
}

/// The custom 500 page
pub fn server_error_page() -> String {
    layout(
        "Server Error",
        r#"        <h2>Something went wrong</h2>
        <p>An internal error occurred. <a href="/">Back to the library</a>.</p>
"#,
    )
}

/// A generic page for rejected requests
pub fn bad_request_page(message: &str) -> String {
    let body = format!(
        "        <h2>Request rejected</h2>\n        <p>{}</p>\n        <p><a href=\"/\">Back to the library</a>.</p>\n",
        escape(message)
    );
    layout("Bad Request", &body)
}

/// Escape a value for interpolation into HTML text or attributes
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
