use crate::server::{
    Result, ServerError, ServerRouter,
    html::{Form, Page},
    routes::{CreatePostPath, EditPostPath, HomePath, PostPath},
    views::editor::{Editor, render},
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::routing::RouterExt;
use hobbyhub_common::form::PostForm;
use hobbyhub_db::client::DbClient;
use std::sync::Arc;
use tracing::{error, info};

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(new_post_form)
        .typed_post(create_post)
        .typed_get(edit_post_form)
        .typed_post(update_post)
}

async fn new_post_form(_: CreatePostPath) -> Page {
    render(Editor::Create, &PostForm::default(), None)
}

async fn create_post(
    _: CreatePostPath,
    State(db): State<Arc<DbClient>>,
    Form(form): Form<PostForm>,
) -> Response {
    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(err) => return render(Editor::Create, &form, Some(&err.to_string())).into_response(),
    };

    match db.create_post(&draft).await {
        Ok(post) => {
            info!(id = %post.id, "Post created");
            Redirect::to(&HomePath.to_string()).into_response()
        }
        Err(err) => {
            error!(error = %err, "Creating post failed");
            render(Editor::Create, &form, Some(&err.to_string()))
                .with_status(StatusCode::BAD_GATEWAY)
                .into_response()
        }
    }
}

async fn edit_post_form(
    EditPostPath { id }: EditPostPath,
    State(db): State<Arc<DbClient>>,
) -> Result<Page> {
    let post = db
        .fetch_post(id)
        .await?
        .ok_or(ServerError::PostByIdNotFound(id))?;

    Ok(render(Editor::Edit(id), &PostForm::from_post(&post), None))
}

async fn update_post(
    EditPostPath { id }: EditPostPath,
    State(db): State<Arc<DbClient>>,
    Form(form): Form<PostForm>,
) -> Response {
    let editor = Editor::Edit(id);
    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(err) => return render(editor, &form, Some(&err.to_string())).into_response(),
    };

    let failure = match db.update_post(id, &draft).await {
        Ok(Some(post)) => {
            info!(%id, title = post.title.get(), "Post updated");
            return Redirect::to(&PostPath { id }.to_string()).into_response();
        }
        Ok(None) => ServerError::PostByIdNotFound(id),
        Err(err) => ServerError::from(err),
    };

    error!(%id, error = %failure, "Updating post failed");
    render(editor, &form, Some(&failure.to_string()))
        .with_status(failure.status())
        .into_response()
}
