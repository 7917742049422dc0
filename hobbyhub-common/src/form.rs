use crate::{
    model::{
        comment::CommentBody,
        post::{Post, PostDraft, PostTitle},
    },
    util::trimmed_or_none,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Error)]
pub enum FormError {
    #[error("Title is required")]
    TitleRequired,
}

/// Raw field values of the create and edit forms, exactly as typed.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    pub image_url: String,
}

impl PostForm {
    #[must_use]
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.get().to_owned(),
            content: post.content.clone().unwrap_or_default(),
            image_url: post.image_url.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<PostDraft, FormError> {
        let title = PostTitle::new(&self.title).map_err(|_| FormError::TitleRequired)?;

        Ok(PostDraft {
            title,
            content: trimmed_or_none(&self.content),
            image_url: trimmed_or_none(&self.image_url),
        })
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
#[serde(default)]
pub struct CommentForm {
    pub content: String,
}

impl CommentForm {
    /// `None` when there is nothing worth sending.
    #[must_use]
    pub fn body(&self) -> Option<CommentBody> {
        CommentBody::new(&self.content).ok()
    }
}

#[cfg(test)]
mod tests {
    use crate::form::{CommentForm, FormError, PostForm};

    #[test]
    fn blank_title_is_rejected() {
        for title in ["", "   ", "\t\n"] {
            let form = PostForm {
                title: title.to_owned(),
                content: "Some content".to_owned(),
                image_url: String::new(),
            };
            assert_eq!(form.validate(), Err(FormError::TitleRequired));
        }
        assert_eq!(FormError::TitleRequired.to_string(), "Title is required");
    }

    #[test]
    fn fields_are_trimmed_and_blank_optionals_dropped() {
        let form = PostForm {
            title: "  Night train to Vienna  ".to_owned(),
            content: "   ".to_owned(),
            image_url: " https://example.com/train.jpg ".to_owned(),
        };

        let draft = form.validate().unwrap();
        assert_eq!(draft.title.get(), "Night train to Vienna");
        assert_eq!(draft.content, None);
        assert_eq!(
            draft.image_url.as_deref(),
            Some("https://example.com/train.jpg")
        );

        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            serde_json::json!({
                "title": "Night train to Vienna",
                "content": null,
                "image_url": "https://example.com/train.jpg",
            })
        );
    }

    #[test]
    fn comment_form_body() {
        let blank = CommentForm {
            content: "  ".to_owned(),
        };
        assert!(blank.body().is_none());

        let filled = CommentForm {
            content: "Great tips!".to_owned(),
        };
        assert_eq!(filled.body().unwrap().get(), "Great tips!");
    }
}
