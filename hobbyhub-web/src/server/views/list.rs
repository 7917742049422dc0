use crate::server::{
    html::Page,
    views::{self, card},
};
use axum::http::StatusCode;
use hobbyhub_common::listing::{EmptyState, PostListing, SortKey};
use maud::{Markup, html};

fn controls(listing: &PostListing) -> Markup {
    html! {
        form class="controls" method="get" action="/" {
            input type="text" name="search" value=(listing.search)
                placeholder="🔍 Search posts by title..." class="search-input";
            select name="sort" class="sort-select" {
                @for key in SortKey::ALL {
                    option value=(key.column()) selected[key == listing.sort] { (key.label()) }
                }
            }
            button type="submit" class="btn btn-secondary" { "Apply" }
        }
    }
}

fn results(listing: &PostListing) -> Markup {
    html! {
        @match listing.empty_state() {
            Some(EmptyState::NoMatches { search }) => {
                div class="empty-state" {
                    h3 { "No posts found" }
                    p { "No posts match your search term \"" (search) "\"" }
                }
            },
            Some(EmptyState::NoPosts) => {
                div class="empty-state" {
                    h3 { "No posts found" }
                    p { "Be the first to share your travel experience!" }
                }
            },
            None => {
                div class="post-grid" {
                    @for post in listing.visible() {
                        (card::render(post))
                    }
                }
            },
        }
    }
}

#[must_use]
pub fn render(listing: &PostListing) -> Page {
    let body = html! {
        div class="card intro" {
            h1 { "🌍 Welcome to HobbyHub Travel Forum" }
            p {
                "Share your travel experiences, discover new destinations, \
                and connect with fellow travelers!"
            }
        }
        (controls(listing))
        (results(listing))
    };
    Page::new("Home", body)
}

/// Shown instead of the list when the posts could not be fetched.
#[must_use]
pub fn failed(message: &str, retry_href: &str) -> Page {
    let actions = html! {
        a href=(retry_href) class="btn btn-primary" { "Try Again" }
        " "
        (views::home_link())
    };
    views::error_panel(
        StatusCode::BAD_GATEWAY,
        "Error loading posts",
        message,
        actions,
    )
}
