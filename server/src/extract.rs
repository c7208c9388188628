//! Request extractors whose rejections answer with the same JSON body as
//! every other failure.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};
use kernel::{fail, KernelError};

use crate::error::ErrorStatus;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ErrorStatus))]
pub struct Json<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ErrorStatus))]
pub struct Path<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ErrorStatus))]
pub struct Query<T>(pub T);

impl From<JsonRejection> for ErrorStatus {
    fn from(rejection: JsonRejection) -> Self {
        fail(KernelError::Validation, rejection.body_text()).into()
    }
}

// Every path parameter is a document id.
impl From<PathRejection> for ErrorStatus {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("{}", rejection.body_text());
        fail(KernelError::NotFound, "Invalid ID.").into()
    }
}

impl From<QueryRejection> for ErrorStatus {
    fn from(rejection: QueryRejection) -> Self {
        fail(KernelError::Validation, rejection.body_text()).into()
    }
}

#[cfg(test)]
mod test {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::routing::{get, post};
    use axum::Router;
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;
    use uuid::Uuid;

    use super::{Json, Path, Query};

    #[derive(Debug, Deserialize)]
    struct Paging {
        #[allow(dead_code)]
        page: u32,
    }

    fn router() -> Router {
        Router::new()
            .route(
                "/things/:id",
                post(|Path(id): Path<Uuid>, Json(body): Json<Value>| async move {
                    axum::Json(json!({ "id": id, "body": body }))
                }),
            )
            .route(
                "/things",
                get(|Query(_): Query<Paging>| async { StatusCode::OK }),
            )
    }

    async fn call(request: Request<Body>) -> (StatusCode, Value) {
        let response = router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn post_json(uri: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn bad_id_is_not_found() {
        let (status, body) = call(post_json("/things/42", "{}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"status": "fail", "message": "Invalid ID."}));
    }

    #[tokio::test]
    async fn malformed_json_is_a_failed_request() {
        let uri = format!("/things/{}", Uuid::new_v4());
        let (status, body) = call(post_json(&uri, "{\"title\":")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "fail");
        assert!(body["message"].as_str().is_some_and(|message| !message.is_empty()));

        let request = Request::builder()
            .method("POST")
            .uri(&uri)
            .body(Body::from("{}"))
            .unwrap();
        let (status, body) = call(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "fail");
    }

    #[tokio::test]
    async fn bad_query_is_a_failed_request() {
        let request = Request::builder()
            .uri("/things?page=first")
            .body(Body::empty())
            .unwrap();
        let (status, body) = call(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "fail");
    }

    #[tokio::test]
    async fn accepted_requests_reach_the_handler() {
        let id = Uuid::new_v4();
        let (status, body) = call(post_json(&format!("/things/{id}"), "{\"a\":1}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": id, "body": {"a": 1}}));
    }
}
