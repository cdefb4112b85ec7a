//! Server-rendered HTML pages.
//!
//! Every dynamic string goes through `html_escape` before it reaches the
//! markup.

use axum::http::StatusCode;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::fmt::Write;

use crate::models::{Movie, User};

/// Data every page layout needs.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    /// The owner account, shown in the header.
    pub owner: Option<User>,

    pub authenticated: bool,

    pub flashes: Vec<String>,
}

impl PageContext {
    fn heading(&self) -> String {
        match &self.owner {
            Some(owner) => format!("{}'s Watchlist", owner.name),
            None => "Watchlist".to_string(),
        }
    }
}

fn layout(ctx: &PageContext, body: &str) -> String {
    let heading = ctx.heading();

    let mut nav = String::from(r#"<li><a href="/">Home</a></li>"#);
    if ctx.authenticated {
        nav.push_str(r#"<li><a href="/settings">Settings</a></li>"#);
        nav.push_str(r#"<li><a href="/logout">Logout</a></li>"#);
    } else {
        nav.push_str(r#"<li><a href="/login">Login</a></li>"#);
    }

    let mut flashes = String::new();
    for message in &ctx.flashes {
        let _ = write!(flashes, r#"<div class="alert">{}</div>"#, text(message));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<link rel="stylesheet" href="/static/style.css" type="text/css">
</head>
<body>
{flashes}
<h2>{title}</h2>
<nav><ul>{nav}</ul></nav>
{body}
<footer><small>&copy; Watchlist</small></footer>
</body>
</html>
"#,
        title = text(&heading),
    )
}

pub fn index(ctx: &PageContext, movies: &[Movie]) -> String {
    let mut body = format!("<p>{} Titles</p>\n", movies.len());

    body.push_str(
        r#"<form method="post" action="/">
Name <input type="text" name="title" autocomplete="off" required>
Year <input type="text" name="year" autocomplete="off" required>
<input class="btn" type="submit" name="submit" value="Add">
</form>
"#,
    );

    body.push_str(r#"<ul class="movie-list">"#);
    for movie in movies {
        let _ = write!(
            body,
            "<li>{} - {}",
            text(&movie.title),
            text(&movie.year)
        );
        if ctx.authenticated {
            let _ = write!(
                body,
                r#"<span class="float-right"><a class="btn" href="/movie/edit/{id}">Edit</a><form class="inline-form" method="post" action="/movie/delete/{id}"><input class="btn" type="submit" name="delete" value="Delete"></form></span>"#,
                id = movie.id
            );
        }
        body.push_str("</li>");
    }
    body.push_str("</ul>\n");

    layout(ctx, &body)
}

pub fn edit(ctx: &PageContext, movie: &Movie) -> String {
    let body = format!(
        r#"<h3>Edit item</h3>
<form method="post" action="/movie/edit/{id}">
Name <input type="text" name="title" autocomplete="off" required value="{title}">
Year <input type="text" name="year" autocomplete="off" required value="{year}">
<input class="btn" type="submit" name="submit" value="Update">
</form>
"#,
        id = movie.id,
        title = attr(&movie.title),
        year = attr(&movie.year),
    );

    layout(ctx, &body)
}

pub fn settings(ctx: &PageContext, name: &str) -> String {
    let body = format!(
        r#"<h3>Settings</h3>
<form method="post" action="/settings">
Your Name <input type="text" name="name" autocomplete="off" required value="{name}">
<input class="btn" type="submit" name="submit" value="Save">
</form>
"#,
        name = attr(name),
    );

    layout(ctx, &body)
}

pub fn login(ctx: &PageContext) -> String {
    let body = r#"<h3>Login</h3>
<form method="post" action="/login">
Username<br>
<input type="text" name="username" required><br><br>
Password<br>
<input type="password" name="password" required><br><br>
<input class="btn" type="submit" name="submit" value="Submit">
</form>
"#;

    layout(ctx, body)
}

pub fn error_page(ctx: &PageContext, status: StatusCode) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        r#"<ul class="movie-list"><li>{} - {}<span class="float-right"><a href="/">Go Back</a></span></li></ul>
"#,
        status.as_u16(),
        text(reason),
    );

    layout(ctx, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner(name: &str) -> User {
        User {
            id: 1,
            name: name.to_string(),
            username: Some("admin".to_string()),
        }
    }

    #[test]
    fn markup_is_escaped() {
        let ctx = PageContext {
            owner: Some(owner("<b>Ann</b>")),
            authenticated: false,
            flashes: vec!["<script>".to_string()],
        };
        let movies = vec![Movie {
            id: 1,
            title: "Tom & Jerry".to_string(),
            year: "1940".to_string(),
        }];

        let html = index(&ctx, &movies);
        assert!(html.contains("&lt;b&gt;Ann&lt;/b&gt;'s Watchlist"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Tom &amp; Jerry - 1940"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn controls_follow_authentication() {
        let movies = vec![Movie {
            id: 9,
            title: "Leon".to_string(),
            year: "1994".to_string(),
        }];

        let anonymous = index(&PageContext::default(), &movies);
        assert!(!anonymous.contains("/movie/edit/9"));
        assert!(anonymous.contains(r#"href="/login""#));

        let ctx = PageContext {
            owner: Some(owner("Ann")),
            authenticated: true,
            flashes: Vec::new(),
        };
        let signed_in = index(&ctx, &movies);
        assert!(signed_in.contains("/movie/edit/9"));
        assert!(signed_in.contains(r#"action="/movie/delete/9""#));
        assert!(signed_in.contains(r#"href="/logout""#));
    }

    #[test]
    fn edit_form_prefills_quoted_values() {
        let movie = Movie {
            id: 2,
            title: r#"The "Room""#.to_string(),
            year: "2003".to_string(),
        };
        let html = edit(&PageContext::default(), &movie);
        assert!(html.contains(r#"value="The &quot;Room&quot;""#));
    }

    #[test]
    fn error_page_names_status() {
        let ctx = PageContext {
            owner: Some(owner("Ann")),
            authenticated: true,
            flashes: Vec::new(),
        };

        let html = error_page(&ctx, StatusCode::NOT_FOUND);
        assert!(html.contains("404 - Not Found"));
        assert!(html.contains("Ann's Watchlist"));
        assert!(html.contains(r#"href="/logout""#));
    }
}
