use crate::server::{
    ServerRouter,
    html::{Form, Page, Query},
    routes::{CommentsPath, DeletePostPath, HomePath, PostPath, UpvotePostPath},
    views,
};
use axum::{
    extract::State,
    http::Uri,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::routing::RouterExt;
use hobbyhub_common::{
    detail::PostPage,
    form::CommentForm,
    listing::{PostListing, SortKey},
    model::{Id, comment::NewComment, post::PostMarker},
};
use hobbyhub_db::client::{CommentRetention, DbClient};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error, info};

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(list_posts)
        .typed_get(show_post)
        .typed_post(upvote_post)
        .typed_post(add_comment)
        .typed_get(confirm_delete)
        .typed_post(delete_post)
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
#[serde(default)]
struct ListParams {
    search: String,
    sort: SortKey,
}

async fn list_posts(
    _: HomePath,
    State(db): State<Arc<DbClient>>,
    uri: Uri,
    Query(ListParams { search, sort }): Query<ListParams>,
) -> Page {
    match db.fetch_posts(sort).await {
        Ok(posts) => {
            debug!(count = posts.len(), ?sort, "Fetched posts");
            views::list::render(&PostListing {
                posts,
                search,
                sort,
            })
        }
        Err(err) => {
            error!(error = %err, ?sort, "Fetching posts failed");
            views::list::failed(&err.to_string(), &uri.to_string())
        }
    }
}

/// Fetches the post and its comments side by side. Comments are best effort.
async fn load_post_page(db: &DbClient, id: Id<PostMarker>) -> PostPage {
    let (post, comments) = tokio::join!(db.fetch_post(id), db.fetch_comments(id));

    if let Err(err) = &post {
        error!(%id, error = %err, "Fetching post failed");
    }
    let comments = comments.unwrap_or_else(|err| {
        error!(%id, error = %err, "Fetching comments failed");
        Vec::new()
    });

    PostPage::from_fetch(id, post, comments)
}

async fn show_post(PostPath { id }: PostPath, State(db): State<Arc<DbClient>>) -> Page {
    let page = load_post_page(&db, id).await;
    views::detail::render(&page, "")
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Deserialize)]
struct UpvoteForm {
    seen: u64,
}

async fn upvote_post(
    UpvotePostPath { id }: UpvotePostPath,
    State(db): State<Arc<DbClient>>,
    Form(UpvoteForm { seen }): Form<UpvoteForm>,
) -> Redirect {
    match db.upvote_post(id, seen).await {
        Ok(post) => info!(%id, upvotes = post.upvotes, "Post upvoted"),
        Err(err) => error!(%id, seen, error = %err, "Upvoting post failed"),
    }

    Redirect::to(&PostPath { id }.to_string())
}

async fn add_comment(
    CommentsPath { id }: CommentsPath,
    State(db): State<Arc<DbClient>>,
    Form(form): Form<CommentForm>,
) -> Response {
    let Some(content) = form.body() else {
        debug!(%id, "Ignoring blank comment");
        return Redirect::to(&PostPath { id }.to_string()).into_response();
    };

    match db.create_comment(&NewComment { post_id: id, content }).await {
        Ok(added) => {
            info!(%id, added = added.len(), "Comment added");
            Redirect::to(&format!("{}#comments", PostPath { id })).into_response()
        }
        Err(err) => {
            error!(%id, error = %err, "Adding comment failed");
            let page = load_post_page(&db, id).await;
            views::detail::render(&page, &form.content).into_response()
        }
    }
}

async fn confirm_delete(DeletePostPath { id }: DeletePostPath) -> Page {
    views::detail::confirm_delete(id)
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
#[serde(default)]
struct DeleteForm {
    confirm: String,
}

async fn delete_post(
    DeletePostPath { id }: DeletePostPath,
    State(db): State<Arc<DbClient>>,
    State(retention): State<CommentRetention>,
    Form(DeleteForm { confirm }): Form<DeleteForm>,
) -> Redirect {
    if confirm != "yes" {
        debug!(%id, "Deletion not confirmed");
        return Redirect::to(&PostPath { id }.to_string());
    }

    match db.delete_post(id, retention).await {
        Ok(()) => {
            info!(%id, ?retention, "Post deleted");
            Redirect::to(&HomePath.to_string())
        }
        Err(err) => {
            error!(%id, error = %err, "Deleting post failed");
            Redirect::to(&PostPath { id }.to_string())
        }
    }
}
