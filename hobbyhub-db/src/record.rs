use hobbyhub_common::{
    model::{
        ModelValidationError,
        comment::{Comment, CommentBody},
        post::{Post, PostTitle},
    },
    util::parse_timestamp,
};
use serde::Deserialize;

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
pub(crate) struct PostRecord {
    pub id: u64,
    pub title: String,
    pub content: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub upvotes: Option<u64>,
    pub created_at: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
pub(crate) struct CommentRecord {
    pub id: u64,
    pub post_id: u64,
    pub content: String,
    pub created_at: String,
}

impl TryFrom<PostRecord> for Post {
    type Error = ModelValidationError;

    fn try_from(value: PostRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            title: PostTitle::new(&value.title)?,
            content: value.content,
            image_url: value.image_url,
            upvotes: value.upvotes.unwrap_or_default(),
            created_at: parse_timestamp(&value.created_at)?,
        })
    }
}

impl TryFrom<CommentRecord> for Comment {
    type Error = ModelValidationError;

    fn try_from(value: CommentRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            post_id: value.post_id.into(),
            content: CommentBody::new(&value.content)?,
            created_at: parse_timestamp(&value.created_at)?,
        })
    }
}
