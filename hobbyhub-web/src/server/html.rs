use crate::server::{ServerError, views};
use axum::{
    Form as AxumForm,
    extract::{FromRequest, FromRequestParts, Query as AxumQuery},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::TypedHeader;
use headers::ContentType;
use maud::{Markup, PreEscaped};

#[derive(FromRequest, Debug, Clone, Copy, Default)]
#[from_request(via(AxumForm), rejection(ServerError))]
pub struct Form<T>(pub T);

#[derive(FromRequestParts, Debug, Clone, Copy, Default)]
#[from_request(via(AxumQuery), rejection(ServerError))]
pub struct Query<T>(pub T);

/// A full HTML document: the shared layout around one view's markup.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Page {
    pub status: StatusCode,
    pub title: String,
    pub body: String,
}

impl Page {
    #[must_use]
    pub fn new(title: impl Into<String>, body: Markup) -> Self {
        Self {
            status: StatusCode::OK,
            title: title.into(),
            body: body.into_string(),
        }
    }

    #[must_use]
    pub fn with_status(self, status: StatusCode) -> Self {
        Self { status, ..self }
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        let document = views::layout(&self.title, PreEscaped(self.body));
        (
            self.status,
            TypedHeader(ContentType::html()),
            document.into_string(),
        )
            .into_response()
    }
}
