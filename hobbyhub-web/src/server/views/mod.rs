//! HTML rendering. Every view is a pure function from domain data to markup.

pub mod card;
pub mod detail;
pub mod editor;
pub mod list;

use crate::server::html::Page;
use axum::http::StatusCode;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use time::{UtcDateTime, format_description::BorrowedFormatItem, macros::format_description};

pub const SITE_NAME: &str = "HobbyHub Travel";

const SHORT_DATE: &[BorrowedFormatItem<'static>] = format_description!(
    "[month repr:short] [day padding:none], [year], [hour repr:12]:[minute] [period]"
);
const LONG_DATE: &[BorrowedFormatItem<'static>] = format_description!(
    "[month repr:long] [day padding:none], [year], [hour repr:12]:[minute] [period]"
);

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:0;background:#f4f6fb;color:#333}\
.header{background:#2d6cdf;padding:1rem 2rem}.header a{color:#fff;text-decoration:none}\
.header-content{display:flex;justify-content:space-between;align-items:center}\
.nav-links{display:flex;gap:1.5rem;list-style:none;margin:0;padding:0}\
main{max-width:1100px;margin:2rem auto;padding:0 1rem}\
.card{background:#fff;border-radius:12px;padding:1.5rem;box-shadow:0 2px 8px #0001}\
.post-grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(300px,1fr));gap:1.5rem}\
.post-image{width:100%;max-height:400px;object-fit:cover;border-radius:10px}\
.post-meta{display:flex;justify-content:space-between;color:#666}\
.error{background:#fde8e8;color:#9b1c1c;padding:1rem;border-radius:8px}\
.comment{border-left:3px solid #2d6cdf;padding:.5rem 1rem;margin:1rem 0}";

#[must_use]
pub fn short_date(date: UtcDateTime) -> String {
    date.format(SHORT_DATE).unwrap_or_else(|_| date.to_string())
}

#[must_use]
pub fn long_date(date: UtcDateTime) -> String {
    date.format(LONG_DATE).unwrap_or_else(|_| date.to_string())
}

fn header() -> Markup {
    html! {
        header.header {
            div.header-content {
                a href="/" class="logo" { "🌍 " (SITE_NAME) }
                nav {
                    ul.nav-links {
                        li { a href="/" { "Home" } }
                        li { a href="/create" { "Create Post" } }
                    }
                }
            }
        }
    }
}

#[must_use]
pub fn layout(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | " (SITE_NAME) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                (header())
                main { (body) }
            }
        }
    }
}

/// Replaces a whole view body with an error message and some way out.
#[must_use]
pub fn error_panel(status: StatusCode, heading: &str, message: &str, actions: Markup) -> Page {
    let body = html! {
        div.error {
            h3 { (heading) }
            p { (message) }
            (actions)
        }
    };
    Page::new(heading, body).with_status(status)
}

#[must_use]
pub fn home_link() -> Markup {
    html! {
        a class="btn btn-primary" href="/" { "Back to Home" }
    }
}
