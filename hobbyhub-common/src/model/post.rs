use crate::model::Id;
use serde::Serialize;
use std::borrow::Cow;
use thiserror::Error;
use time::UtcDateTime;

pub const EXCERPT_MAX_CHARS: usize = 150;
pub const EXCERPT_ELLIPSIS: &str = "...";

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Post {
    pub id: Id<PostMarker>,
    pub title: PostTitle,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub upvotes: u64,
    pub created_at: UtcDateTime,
}

/// The writable columns of a post, as sent on insert and update.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
pub struct PostDraft {
    pub title: PostTitle,
    pub content: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Serialize)]
#[serde(transparent)]
pub struct PostTitle(String);

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("The post title is empty")]
pub struct InvalidPostTitleError;

impl PostTitle {
    /// Trims the title, rejecting it if nothing is left.
    pub fn new(title: &str) -> Result<Self, InvalidPostTitleError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            Err(InvalidPostTitleError)
        } else {
            Ok(Self(trimmed.to_owned()))
        }
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }
}

impl Post {
    /// Card-sized preview of the content, or `None` if the post has no content.
    #[must_use]
    pub fn excerpt(&self) -> Option<Cow<'_, str>> {
        self.content
            .as_deref()
            .filter(|content| !content.is_empty())
            .map(excerpt)
    }
}

#[must_use]
pub fn excerpt(content: &str) -> Cow<'_, str> {
    match content.char_indices().nth(EXCERPT_MAX_CHARS) {
        Some((cut, _)) => Cow::Owned(format!("{}{EXCERPT_ELLIPSIS}", &content[..cut])),
        None => Cow::Borrowed(content),
    }
}
