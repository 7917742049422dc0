use crate::model::{
    Id,
    comment::Comment,
    post::{Post, PostMarker},
};
use std::fmt::Display;

/// What the detail view ends up showing once its fetches are done.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub enum PostPage {
    Loaded { post: Post, comments: Vec<Comment> },
    NotFound(Id<PostMarker>),
    Failed(String),
}

impl PostPage {
    /// Combines the post fetch with the (already degraded) comment list.
    pub fn from_fetch<E: Display>(
        id: Id<PostMarker>,
        post: Result<Option<Post>, E>,
        comments: Vec<Comment>,
    ) -> Self {
        match post {
            Ok(Some(post)) => PostPage::Loaded { post, comments },
            Ok(None) => PostPage::NotFound(id),
            Err(err) => PostPage::Failed(err.to_string()),
        }
    }
}
