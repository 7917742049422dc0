use crate::model::{Id, post::PostMarker};
use serde::Serialize;
use thiserror::Error;
use time::UtcDateTime;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct CommentMarker;

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Comment {
    pub id: Id<CommentMarker>,
    pub post_id: Id<PostMarker>,
    pub content: CommentBody,
    pub created_at: UtcDateTime,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
pub struct NewComment {
    pub post_id: Id<PostMarker>,
    pub content: CommentBody,
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Serialize)]
#[serde(transparent)]
pub struct CommentBody(String);

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("The comment is empty")]
pub struct EmptyCommentError;

impl CommentBody {
    pub fn new(content: &str) -> Result<Self, EmptyCommentError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            Err(EmptyCommentError)
        } else {
            Ok(Self(trimmed.to_owned()))
        }
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{
        Id,
        comment::{CommentBody, NewComment},
    };

    #[test]
    fn comment_body_rejects_blank_input() {
        assert!(CommentBody::new("").is_err());
        assert!(CommentBody::new("   \n").is_err());
        assert_eq!(CommentBody::new(" Great tips! ").unwrap().get(), "Great tips!");
    }

    #[test]
    fn new_comment_row_shape() {
        let row = NewComment {
            post_id: Id::new(7),
            content: CommentBody::new("Great tips!").unwrap(),
        };

        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            serde_json::json!({ "post_id": 7, "content": "Great tips!" })
        );
    }
}
