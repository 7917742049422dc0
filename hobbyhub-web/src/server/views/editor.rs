use crate::server::{
    html::Page,
    routes::{CreatePostPath, EditPostPath, HomePath, PostPath},
    views::card::HIDE_ON_ERROR,
};
use axum::http::StatusCode;
use hobbyhub_common::{
    form::PostForm,
    model::{Id, post::PostMarker},
};
use maud::html;

/// Which form is being shown; they only differ in wording and targets.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Editor {
    Create,
    Edit(Id<PostMarker>),
}

impl Editor {
    fn heading(self) -> &'static str {
        match self {
            Editor::Create => "✈️ Share Your Travel Experience",
            Editor::Edit(_) => "✏️ Edit Your Travel Post",
        }
    }

    fn submit_label(self) -> &'static str {
        match self {
            Editor::Create => "🚀 Create Post",
            Editor::Edit(_) => "💾 Save Changes",
        }
    }

    fn action(self) -> String {
        match self {
            Editor::Create => CreatePostPath.to_string(),
            Editor::Edit(id) => EditPostPath { id }.to_string(),
        }
    }

    fn cancel_href(self) -> String {
        match self {
            Editor::Create => HomePath.to_string(),
            Editor::Edit(id) => PostPath { id }.to_string(),
        }
    }

    fn title(self) -> &'static str {
        match self {
            Editor::Create => "Create post",
            Editor::Edit(_) => "Edit post",
        }
    }
}

/// Renders the form with whatever was typed so far and an optional inline error.
#[must_use]
pub fn render(editor: Editor, form: &PostForm, error: Option<&str>) -> Page {
    let preview = form.image_url.trim();

    let body = html! {
        div class="card editor" {
            h1 { (editor.heading()) }
            @if let Some(error) = error {
                div class="error" { (error) }
            }
            form method="post" action=(editor.action()) {
                div class="form-group" {
                    label for="title" { "Title *" }
                    input type="text" id="title" name="title" value=(form.title) class="form-control"
                        placeholder="e.g., Amazing sunset at Santorini, Greece!" required;
                }
                div class="form-group" {
                    label for="content" { "Content" }
                    textarea id="content" name="content" class="form-control" rows="6"
                        placeholder="Tell us about your travel experience, recommendations, tips, or ask for advice..." {
                        (form.content)
                    }
                }
                div class="form-group" {
                    label for="image_url" { "Image URL" }
                    input type="url" id="image_url" name="image_url" value=(form.image_url)
                        class="form-control" placeholder="https://example.com/your-travel-photo.jpg";
                    @if !preview.is_empty() {
                        div class="preview" {
                            img src=(preview) alt="Preview" class="post-image" onerror=(HIDE_ON_ERROR);
                        }
                    }
                }
                button type="submit" class="btn btn-primary" { (editor.submit_label()) }
                a href=(editor.cancel_href()) class="btn btn-secondary" { "Cancel" }
            }
        }
    };

    let status = if error.is_some() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    };
    Page::new(editor.title(), body).with_status(status)
}
