use crate::{
    query::{Direction, Query, Table},
    record::{CommentRecord, PostRecord},
};
use hobbyhub_common::{
    listing::SortKey,
    model::{
        Id, ModelValidationError,
        comment::{Comment, NewComment},
        post::{Post, PostDraft, PostMarker},
    },
};
use reqwest::{
    Client, Response, StatusCode,
    header::{AUTHORIZATION, HeaderMap, HeaderValue, InvalidHeaderValue},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt::{Debug, Formatter};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

pub type Result<T, E = DbError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("An object returned by the backend was invalid: {0}")]
    Data(#[from] ModelValidationError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("The backend responded with {status}: {message}")]
    Backend { status: StatusCode, message: String },
    #[error("The backend url is invalid: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("The backend api key is not a valid header value: {0}")]
    InvalidApiKey(#[from] InvalidHeaderValue),
    #[error("Refusing to {action} every row of table {table}")]
    Unfiltered { action: &'static str, table: Table },
    #[error("The backend returned no row from {0}")]
    MissingRow(Table),
    #[error("Upvote on post {id} lost a race: it has {current} upvotes, not {seen}")]
    UpvoteConflict {
        id: Id<PostMarker>,
        seen: u64,
        current: u64,
    },
    #[error("Post {0} does not exist")]
    PostNotFound(Id<PostMarker>),
}

/// Where the backend lives and the key every request is signed with.
#[derive(Clone, Eq, PartialEq, Hash, Deserialize)]
pub struct BackendConfig {
    pub url: String,
    pub api_key: String,
}

impl Debug for BackendConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("api_key", &"[redacted]")
            .finish()
    }
}

/// What happens to a post's comments when the post is deleted.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentRetention {
    /// Comments stay behind, pointing at a post that no longer exists.
    #[default]
    Orphan,
    /// Comments are deleted before the post.
    Cascade,
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Deserialize)]
struct BackendErrorBody {
    message: String,
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Serialize)]
struct UpvoteChange {
    upvotes: u64,
}

const PREFER_REPRESENTATION: (&str, &str) = ("Prefer", "return=representation");

pub struct DbClient {
    http: Client,
    rest_url: Url,
}

impl Debug for DbClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbClient")
            .field("rest_url", &self.rest_url.as_str())
            .finish_non_exhaustive()
    }
}

impl DbClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let mut base = Url::parse(&config.url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let rest_url = base.join("rest/v1/")?;

        let mut api_key = HeaderValue::from_str(&config.api_key)?;
        api_key.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("apikey", api_key);
        headers.insert(AUTHORIZATION, bearer);

        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self { http, rest_url })
    }

    fn table_url(&self, table: Table) -> Result<Url> {
        Ok(self.rest_url.join(table.name())?)
    }

    pub async fn select<T>(&self, table: Table, query: &Query) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let params = query.select_params();
        debug!(%table, ?params, "Selecting rows");

        let response = self
            .http
            .get(self.table_url(table)?)
            .query(&params)
            .send()
            .await?;

        Ok(checked(response).await?.json().await?)
    }

    pub async fn insert<B, T>(&self, table: Table, rows: &[B]) -> Result<Vec<T>>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        debug!(%table, count = rows.len(), "Inserting rows");

        let (prefer, representation) = PREFER_REPRESENTATION;
        let response = self
            .http
            .post(self.table_url(table)?)
            .header(prefer, representation)
            .json(rows)
            .send()
            .await?;

        Ok(checked(response).await?.json().await?)
    }

    pub async fn update<B, T>(&self, table: Table, query: &Query, changes: &B) -> Result<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        if query.is_unfiltered() {
            return Err(DbError::Unfiltered {
                action: "update",
                table,
            });
        }
        let params = query.filter_params();
        debug!(%table, ?params, "Updating rows");

        let (prefer, representation) = PREFER_REPRESENTATION;
        let response = self
            .http
            .patch(self.table_url(table)?)
            .query(&params)
            .header(prefer, representation)
            .json(changes)
            .send()
            .await?;

        Ok(checked(response).await?.json().await?)
    }

    pub async fn delete(&self, table: Table, query: &Query) -> Result<()> {
        if query.is_unfiltered() {
            return Err(DbError::Unfiltered {
                action: "delete",
                table,
            });
        }
        let params = query.filter_params();
        debug!(%table, ?params, "Deleting rows");

        let response = self
            .http
            .delete(self.table_url(table)?)
            .query(&params)
            .send()
            .await?;
        checked(response).await?;

        Ok(())
    }

    pub async fn fetch_posts(&self, sort: SortKey) -> Result<Vec<Post>> {
        let records: Vec<PostRecord> = self
            .select(
                Table::Posts,
                &Query::new().order_by(sort.column(), Direction::Descending),
            )
            .await?;

        let posts = records
            .into_iter()
            .map(Post::try_from)
            .collect::<Result<_, _>>()?;
        Ok(posts)
    }

    pub async fn fetch_post(&self, post_id: Id<PostMarker>) -> Result<Option<Post>> {
        let records: Vec<PostRecord> = self
            .select(Table::Posts, &Query::new().eq("id", post_id))
            .await?;

        let post = records.into_iter().next().map(Post::try_from).transpose()?;
        Ok(post)
    }

    pub async fn fetch_comments(&self, post_id: Id<PostMarker>) -> Result<Vec<Comment>> {
        let records: Vec<CommentRecord> = self
            .select(
                Table::Comments,
                &Query::new()
                    .eq("post_id", post_id)
                    .order_by("created_at", Direction::Ascending),
            )
            .await?;

        let comments = records
            .into_iter()
            .map(Comment::try_from)
            .collect::<Result<_, _>>()?;
        Ok(comments)
    }

    pub async fn create_post(&self, post: &PostDraft) -> Result<Post> {
        let records: Vec<PostRecord> = self
            .insert(Table::Posts, std::slice::from_ref(post))
            .await?;

        let record = records
            .into_iter()
            .next()
            .ok_or(DbError::MissingRow(Table::Posts))?;
        Ok(record.try_into()?)
    }

    /// Returns `None` if no post with this id exists anymore.
    pub async fn update_post(
        &self,
        post_id: Id<PostMarker>,
        post: &PostDraft,
    ) -> Result<Option<Post>> {
        let records: Vec<PostRecord> = self
            .update(Table::Posts, &Query::new().eq("id", post_id), post)
            .await?;

        let post = records.into_iter().next().map(Post::try_from).transpose()?;
        Ok(post)
    }

    /// Sets the count to `seen + 1`, but only if it is still `seen`.
    ///
    /// The returned post is the row as the backend stored it. When nothing was
    /// updated the post is fetched again to tell a lost race from a missing post.
    pub async fn upvote_post(&self, post_id: Id<PostMarker>, seen: u64) -> Result<Post> {
        let change = UpvoteChange {
            upvotes: seen.saturating_add(1),
        };
        let records: Vec<PostRecord> = self
            .update(
                Table::Posts,
                &Query::new().eq("id", post_id).eq("upvotes", seen),
                &change,
            )
            .await?;

        if let Some(record) = records.into_iter().next() {
            return Ok(record.try_into()?);
        }

        match self.fetch_post(post_id).await? {
            Some(current) => Err(DbError::UpvoteConflict {
                id: post_id,
                seen,
                current: current.upvotes,
            }),
            None => Err(DbError::PostNotFound(post_id)),
        }
    }

    pub async fn create_comment(&self, comment: &NewComment) -> Result<Vec<Comment>> {
        let records: Vec<CommentRecord> = self
            .insert(Table::Comments, std::slice::from_ref(comment))
            .await?;

        let comments = records
            .into_iter()
            .map(Comment::try_from)
            .collect::<Result<_, _>>()?;
        Ok(comments)
    }

    pub async fn delete_post(
        &self,
        post_id: Id<PostMarker>,
        retention: CommentRetention,
    ) -> Result<()> {
        if retention == CommentRetention::Cascade {
            self.delete(Table::Comments, &Query::new().eq("post_id", post_id))
                .await?;
        }

        self.delete(Table::Posts, &Query::new().eq("id", post_id))
            .await
    }
}

async fn checked(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await?;
    let message = match serde_json::from_str::<BackendErrorBody>(&body) {
        Ok(error_body) => error_body.message,
        Err(_) if body.is_empty() => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_owned(),
        Err(_) => body,
    };
    warn!(%status, %message, "Backend rejected request");

    Err(DbError::Backend { status, message })
}

#[cfg(test)]
mod tests {
    use crate::client::{BackendConfig, CommentRetention, DbClient, DbError};
    use hobbyhub_common::{
        listing::SortKey,
        model::{
            Id,
            comment::{CommentBody, NewComment},
            post::{PostDraft, PostTitle},
        },
    };
    use serde_json::{Value, json};
    use time::macros::utc_datetime;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, header, method, path, query_param},
    };

    const KEY: &str = "test-key";

    fn client(server: &MockServer) -> DbClient {
        DbClient::new(&BackendConfig {
            url: server.uri(),
            api_key: KEY.to_owned(),
        })
        .unwrap()
    }

    fn post_row(id: u64, title: &str, upvotes: u64) -> Value {
        json!({
            "id": id,
            "title": title,
            "content": "Plenty to see",
            "image_url": null,
            "upvotes": upvotes,
            "created_at": "2024-05-01T09:05:00+00:00",
        })
    }

    #[tokio::test]
    async fn fetch_posts_orders_descending_and_signs_requests() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/posts"))
            .and(query_param("select", "*"))
            .and(query_param("order", "upvotes.desc"))
            .and(header("apikey", KEY))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                post_row(2, "Bali", 9),
                post_row(1, "Oslo", 3),
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let posts = client(&server).fetch_posts(SortKey::Upvotes).await.unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title.get(), "Bali");
        assert!(posts[0].upvotes >= posts[1].upvotes);
        assert_eq!(posts[1].created_at, utc_datetime!(2024-05-01 09:05));
    }

    #[tokio::test]
    async fn fetch_post_without_rows_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/posts"))
            .and(query_param("id", "eq.40"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let post = client(&server).fetch_post(Id::new(40)).await.unwrap();
        assert_eq!(post, None);
    }

    #[tokio::test]
    async fn backend_errors_carry_the_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/comments"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "code": "42703",
                "message": "column comments.post_id does not exist",
                "details": null,
                "hint": null,
            })))
            .mount(&server)
            .await;

        let err = client(&server).fetch_comments(Id::new(1)).await.unwrap_err();
        match err {
            DbError::Backend { status, message } => {
                assert_eq!(status.as_u16(), 400);
                assert_eq!(message, "column comments.post_id does not exist");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn invalid_rows_are_data_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/posts"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([post_row(1, " ", 0)])),
            )
            .mount(&server)
            .await;

        let err = client(&server).fetch_posts(SortKey::CreatedAt).await.unwrap_err();
        assert!(matches!(err, DbError::Data(_)));
    }

    #[tokio::test]
    async fn create_post_sends_nulls_and_returns_the_stored_row() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/posts"))
            .and(header("prefer", "return=representation"))
            .and(body_json(json!([{
                "title": "Bali",
                "content": null,
                "image_url": null,
            }])))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!([post_row(11, "Bali", 0)])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let draft = PostDraft {
            title: PostTitle::new("Bali").unwrap(),
            content: None,
            image_url: None,
        };
        let post = client(&server).create_post(&draft).await.unwrap();
        assert_eq!(post.id, Id::new(11));
        assert_eq!(post.upvotes, 0);
    }

    #[tokio::test]
    async fn upvote_swaps_the_seen_count() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/posts"))
            .and(query_param("id", "eq.3"))
            .and(query_param("upvotes", "eq.5"))
            .and(body_json(json!({ "upvotes": 6 })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([post_row(3, "Hanoi", 6)])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let post = client(&server).upvote_post(Id::new(3), 5).await.unwrap();
        assert_eq!(post.upvotes, 6);
    }

    #[tokio::test]
    async fn upvote_on_a_moved_count_conflicts() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/posts"))
            .and(query_param("id", "eq.3"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([post_row(3, "Hanoi", 7)])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let err = client(&server).upvote_post(Id::new(3), 5).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::UpvoteConflict {
                seen: 5,
                current: 7,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn upvote_on_a_missing_post_is_not_a_conflict() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/posts"))
            .and(query_param("id", "eq.99"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let err = client(&server).upvote_post(Id::new(99), 0).await.unwrap_err();
        assert!(matches!(err, DbError::PostNotFound(id) if id == Id::new(99)));
        assert_eq!(err.to_string(), "Post 99 does not exist");
    }

    #[tokio::test]
    async fn create_comment_returns_inserted_rows() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/comments"))
            .and(body_json(json!([{ "post_id": 3, "content": "Great tips!" }])))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
                "id": 70,
                "post_id": 3,
                "content": "Great tips!",
                "created_at": "2024-05-02T10:00:00+00:00",
            }])))
            .expect(1)
            .mount(&server)
            .await;

        let comment = NewComment {
            post_id: Id::new(3),
            content: CommentBody::new("Great tips!").unwrap(),
        };
        let inserted = client(&server).create_comment(&comment).await.unwrap();
        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].content.get(), "Great tips!");
    }

    #[tokio::test]
    async fn delete_orphans_comments_by_default() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/rest/v1/comments"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/rest/v1/posts"))
            .and(query_param("id", "eq.3"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .delete_post(Id::new(3), CommentRetention::default())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_with_cascade_removes_comments_too() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/rest/v1/comments"))
            .and(query_param("post_id", "eq.3"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/rest/v1/posts"))
            .and(query_param("id", "eq.3"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .delete_post(Id::new(3), CommentRetention::Cascade)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unfiltered_mutations_never_leave_the_client() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        let err = client(&server)
            .delete(crate::query::Table::Posts, &crate::query::Query::new())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Unfiltered { action: "delete", .. }));
    }

    #[test]
    fn config_hides_the_key() {
        let config = BackendConfig {
            url: "https://example.supabase.co".to_owned(),
            api_key: "super-secret".to_owned(),
        };
        assert!(!format!("{config:?}").contains("super-secret"));

        let client = DbClient::new(&config).unwrap();
        assert!(format!("{client:?}").contains("https://example.supabase.co/rest/v1/"));
    }

    #[test]
    fn retention_names() {
        assert_eq!(
            serde_json::from_str::<CommentRetention>("\"cascade\"").unwrap(),
            CommentRetention::Cascade
        );
        assert_eq!(
            serde_json::from_str::<CommentRetention>("\"orphan\"").unwrap(),
            CommentRetention::Orphan
        );
    }
}
