use crate::server::{routes::PostPath, views::short_date};
use hobbyhub_common::model::post::Post;
use maud::{Markup, html};

/// Hides the image instead of showing a broken one.
pub const HIDE_ON_ERROR: &str = "this.style.display='none'";

#[must_use]
pub fn image(url: &str, alt: &str) -> Markup {
    html! {
        img src=(url) alt=(alt) class="post-image" onerror=(HIDE_ON_ERROR);
    }
}

#[must_use]
pub fn render(post: &Post) -> Markup {
    let image_url = post.image_url.as_deref().filter(|url| !url.is_empty());

    html! {
        a href=(PostPath { id: post.id }.to_string()) class="post-card-link" {
            article class="card post-card" {
                div class="post-meta" {
                    span { (short_date(post.created_at)) }
                    div class="upvotes" { "❤️ " (post.upvotes) }
                }
                h3 class="post-title" { (post.title.get()) }
                @if let Some(url) = image_url {
                    (image(url, post.title.get()))
                }
                @if let Some(excerpt) = post.excerpt() {
                    p class="post-content" { (excerpt) }
                }
            }
        }
    }
}
