use axum::{
    Router,
    extract::{
        FromRef, Request,
        rejection::{FormRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use hobbyhub_common::model::{Id, post::PostMarker};
use hobbyhub_db::client::{CommentRetention, DbClient, DbError};
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

mod html;
mod routes;
mod views;

pub type ServerRouter = Router<ServerState>;

#[derive(Clone, Debug, FromRef)]
pub struct ServerState {
    pub db_client: Arc<DbClient>,
    pub comment_retention: CommentRetention,
}

pub fn routes() -> ServerRouter {
    routes::routes().fallback(fallback)
}

pub async fn fallback(request: Request) -> ServerError {
    ServerError::UnknownRoute(request.into_parts().0.uri)
}

pub type Result<T, E = ServerError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Unknown route requested: {0}")]
    UnknownRoute(Uri),
    #[error("Path rejected: {0}")]
    PathRejection(#[from] PathRejection),
    #[error("Query string rejected: {0}")]
    QueryRejection(#[from] QueryRejection),
    #[error("Submitted form rejected: {0}")]
    FormRejection(#[from] FormRejection),
    #[error(transparent)]
    Database(#[from] DbError),
    #[error("Post with id {0} was not found.")]
    PostByIdNotFound(Id<PostMarker>),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::UnknownRoute(_)
            | ServerError::PathRejection(_)
            | ServerError::PostByIdNotFound(_) => StatusCode::NOT_FOUND,
            ServerError::QueryRejection(_) | ServerError::FormRejection(_) => {
                StatusCode::BAD_REQUEST
            }
            ServerError::Database(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn heading(&self) -> &'static str {
        match self {
            ServerError::UnknownRoute(_) | ServerError::PathRejection(_) => "Page not found",
            ServerError::QueryRejection(_) | ServerError::FormRejection(_) => "Invalid request",
            ServerError::Database(_) | ServerError::PostByIdNotFound(_) => "Error loading post",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();

        error!(error = %self, %status, "Replying with error");

        views::error_panel(status, self.heading(), &self.to_string(), views::home_link())
            .into_response()
    }
}


#[cfg(test)]
mod tests {
    use crate::server::test_support::{TestApp, get};
    use axum::http::StatusCode;
    use hobbyhub_db::client::CommentRetention;

    #[tokio::test]
    async fn unknown_routes_render_not_found() {
        let app = TestApp::start(CommentRetention::Orphan).await;

        let (status, _, body) = app.send(get("/nowhere")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Page not found"));
        assert!(body.contains("Back to Home"));
    }

    #[tokio::test]
    async fn malformed_ids_and_params_are_rejected() {
        let app = TestApp::start(CommentRetention::Orphan).await;

        let (status, _, _) = app.send(get("/post/not-a-number")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, body) = app.send(get("/?sort=title")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Invalid request"));
    }
}
