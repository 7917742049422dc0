use crate::server::{ServerError, ServerRouter};
use axum::Router;
use axum_extra::routing::TypedPath;
use hobbyhub_common::model::{Id, post::PostMarker};
use serde::Deserialize;

mod editor;
mod posts;

pub fn routes() -> ServerRouter {
    Router::new().merge(posts::routes()).merge(editor::routes())
}

#[derive(TypedPath)]
#[typed_path("/")]
pub struct HomePath;

#[derive(TypedPath)]
#[typed_path("/create")]
pub struct CreatePostPath;

#[derive(TypedPath, Deserialize)]
#[typed_path("/post/{id}", rejection(ServerError))]
pub struct PostPath {
    pub id: Id<PostMarker>,
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/post/{id}/upvote", rejection(ServerError))]
pub struct UpvotePostPath {
    pub id: Id<PostMarker>,
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/post/{id}/comments", rejection(ServerError))]
pub struct CommentsPath {
    pub id: Id<PostMarker>,
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/post/{id}/delete", rejection(ServerError))]
pub struct DeletePostPath {
    pub id: Id<PostMarker>,
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/edit/{id}", rejection(ServerError))]
pub struct EditPostPath {
    pub id: Id<PostMarker>,
}
