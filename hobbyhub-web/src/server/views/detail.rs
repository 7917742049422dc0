use crate::server::{
    html::Page,
    routes::{CommentsPath, DeletePostPath, EditPostPath, PostPath, UpvotePostPath},
    views::{self, card, long_date},
};
use axum::http::StatusCode;
use hobbyhub_common::{
    detail::PostPage,
    model::{
        Id,
        comment::Comment,
        post::{Post, PostMarker},
    },
};
use maud::{Markup, html};

fn comment(comment: &Comment) -> Markup {
    html! {
        div class="comment" {
            div class="comment-meta" { "📅 " (long_date(comment.created_at)) }
            div class="comment-content" { (comment.content.get()) }
        }
    }
}

fn post_card(post: &Post) -> Markup {
    let image_url = post.image_url.as_deref().filter(|url| !url.is_empty());
    let content = post.content.as_deref().filter(|content| !content.is_empty());

    html! {
        div class="card" {
            div class="post-meta" {
                span { "📅 " (long_date(post.created_at)) }
                div class="upvotes" { "❤️ " (post.upvotes) }
            }
            h1 class="post-title" { (post.title.get()) }
            @if let Some(url) = image_url {
                (card::image(url, post.title.get()))
            }
            @if let Some(content) = content {
                div class="post-content" {
                    @for paragraph in content.split('\n') {
                        p { (paragraph) }
                    }
                }
            }
            div class="post-actions" {
                form method="post" action=(UpvotePostPath { id: post.id }.to_string()) {
                    input type="hidden" name="seen" value=(post.upvotes);
                    button type="submit" class="upvote-btn" { "❤️ Upvote (" (post.upvotes) ")" }
                }
                a href=(EditPostPath { id: post.id }.to_string()) class="btn btn-secondary" { "✏️ Edit" }
                a href=(DeletePostPath { id: post.id }.to_string()) class="btn btn-danger" { "🗑️ Delete" }
                a href="/" class="btn btn-secondary" { "← Back to Home" }
            }
        }
    }
}

fn comments_section(id: Id<PostMarker>, comments: &[Comment], draft: &str) -> Markup {
    html! {
        section id="comments" class="comments-section" {
            h2 class="comments-title" { "💬 Comments (" (comments.len()) ")" }
            form method="post" action=(CommentsPath { id }.to_string()) class="comment-form" {
                label for="comment" { "Add a comment:" }
                textarea id="comment" name="content" rows="3" required
                    placeholder="Share your thoughts, ask questions, or provide travel tips..." {
                    (draft)
                }
                button type="submit" class="btn btn-primary" { "💬 Add Comment" }
            }
            div class="comment-list" {
                @if comments.is_empty() {
                    p class="no-comments" { "No comments yet. Be the first to share your thoughts!" }
                } @else {
                    @for entry in comments {
                        (comment(entry))
                    }
                }
            }
        }
    }
}

/// Renders the detail view; `comment_draft` refills the comment box.
#[must_use]
pub fn render(page: &PostPage, comment_draft: &str) -> Page {
    match page {
        PostPage::Loaded { post, comments } => {
            let body = html! {
                (post_card(post))
                (comments_section(post.id, comments, comment_draft))
            };
            Page::new(post.title.get(), body)
        }
        PostPage::NotFound(_) => views::error_panel(
            StatusCode::NOT_FOUND,
            "Error loading post",
            "Post not found",
            views::home_link(),
        ),
        PostPage::Failed(message) => views::error_panel(
            StatusCode::BAD_GATEWAY,
            "Error loading post",
            message,
            views::home_link(),
        ),
    }
}

#[must_use]
pub fn confirm_delete(id: Id<PostMarker>) -> Page {
    let body = html! {
        div class="card confirm" {
            h2 { "Are you sure you want to delete this post?" }
            form method="post" action=(DeletePostPath { id }.to_string()) {
                input type="hidden" name="confirm" value="yes";
                button type="submit" class="btn btn-danger" { "Yes, delete it" }
                a href=(PostPath { id }.to_string()) class="btn btn-secondary" { "No, keep it" }
            }
        }
    };
    Page::new("Delete post", body)
}

#[cfg(test)]
mod tests {
    use crate::server::views::detail::{confirm_delete, render};
    use axum::http::StatusCode;
    use hobbyhub_common::{
        detail::PostPage,
        model::{
            Id,
            comment::{Comment, CommentBody},
            post::{Post, PostTitle},
        },
    };
    use time::macros::utc_datetime;

    fn post() -> Post {
        Post {
            id: Id::new(3),
            title: PostTitle::new("Street food in Hanoi").unwrap(),
            content: Some("Pho for breakfast.\nBanh mi for lunch.".to_owned()),
            image_url: Some("https://example.com/pho.jpg".to_owned()),
            upvotes: 5,
            created_at: utc_datetime!(2024-05-01 09:05),
        }
    }

    fn comment(id: u64, content: &str) -> Comment {
        Comment {
            id: Id::new(id),
            post_id: Id::new(3),
            content: CommentBody::new(content).unwrap(),
            created_at: utc_datetime!(2024-05-02 10:00),
        }
    }

    #[test]
    fn loaded_page_shows_post_actions_and_comments() {
        let page = render(
            &PostPage::Loaded {
                post: post(),
                comments: vec![comment(1, "Loved it"), comment(2, "Great tips!")],
            },
            "",
        );
        let body = &page.body;

        assert_eq!(page.status, StatusCode::OK);
        assert!(body.contains("May 1, 2024, 09:05 AM"));
        assert!(body.contains("<p>Pho for breakfast.</p><p>Banh mi for lunch.</p>"));
        assert!(body.contains(r#"action="/post/3/upvote""#));
        assert!(body.contains(r#"<input type="hidden" name="seen" value="5">"#));
        assert!(body.contains(r#"href="/edit/3""#));
        assert!(body.contains(r#"href="/post/3/delete""#));
        assert!(body.contains("💬 Comments (2)"));
        assert!(body.find("Loved it").unwrap() < body.find("Great tips!").unwrap());
    }

    #[test]
    fn draft_is_kept_and_empty_comments_explained() {
        let page = render(
            &PostPage::Loaded {
                post: post(),
                comments: Vec::new(),
            },
            "half <typed>",
        );

        assert!(page.body.contains("No comments yet."));
        assert!(page.body.contains(">half &lt;typed&gt;</textarea>"));
    }

    #[test]
    fn comment_markup_is_shown_as_text() {
        let page = render(
            &PostPage::Loaded {
                post: post(),
                comments: vec![comment(1, r#"<img src="x" onerror="alert(1)">"#)],
            },
            "",
        );

        assert!(
            page.body
                .contains("&lt;img src=&quot;x&quot; onerror=&quot;alert(1)&quot;&gt;")
        );
        assert!(!page.body.contains(r#"<img src="x""#));
    }

    #[test]
    fn error_states() {
        let missing = render(&PostPage::NotFound(Id::new(3)), "");
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
        assert!(missing.body.contains("Post not found"));

        let failed = render(&PostPage::Failed("connection refused".to_owned()), "");
        assert_eq!(failed.status, StatusCode::BAD_GATEWAY);
        assert!(failed.body.contains("connection refused"));
        assert!(failed.body.contains("Back to Home"));
    }

    #[test]
    fn delete_needs_confirmation() {
        let page = confirm_delete(Id::new(3));

        assert!(page.body.contains(r#"action="/post/3/delete""#));
        assert!(page.body.contains(r#"name="confirm" value="yes""#));
        assert!(page.body.contains(r#"href="/post/3""#));
    }
}
