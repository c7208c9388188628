use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use application::transfer::DocumentListDto;
use kernel::prelude::entity::Document;

use crate::controller::Exhaust;

pub(crate) const SUCCESS: &str = "success";

#[derive(Debug, Serialize)]
struct Docs<T> {
    docs: T,
}

#[derive(Debug, Serialize)]
struct Doc<T> {
    doc: T,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    status: &'static str,
    results: usize,
    data: Docs<Vec<Value>>,
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// `{"status":"success","data":{"doc":…}}` answered with `code`.
#[derive(Debug, Serialize)]
pub struct DocResponse<T> {
    #[serde(skip)]
    code: StatusCode,
    status: &'static str,
    data: Doc<T>,
}

impl<T> DocResponse<T> {
    pub fn new(code: StatusCode, doc: T) -> Self {
        Self {
            code,
            status: SUCCESS,
            data: Doc { doc },
        }
    }
}

impl<T: Serialize> IntoResponse for DocResponse<T> {
    fn into_response(self) -> Response {
        (self.code, Json(self)).into_response()
    }
}

pub struct ListPresenter;

impl Exhaust<DocumentListDto> for ListPresenter {
    type To = ListResponse;
    fn emit(&self, input: DocumentListDto) -> Self::To {
        ListResponse {
            status: SUCCESS,
            results: input.docs.len(),
            data: Docs { docs: input.docs },
        }
    }
}

pub struct DocumentPresenter;

impl<E: Document> Exhaust<E> for DocumentPresenter {
    type To = DocResponse<E>;
    fn emit(&self, input: E) -> Self::To {
        DocResponse::new(StatusCode::OK, input)
    }
}

/// A document view that embeds the documents it refers to.
pub struct ViewPresenter;

impl Exhaust<Value> for ViewPresenter {
    type To = DocResponse<Value>;
    fn emit(&self, input: Value) -> Self::To {
        DocResponse::new(StatusCode::OK, input)
    }
}

pub struct CreatedPresenter;

impl<E: Document> Exhaust<E> for CreatedPresenter {
    type To = DocResponse<E>;
    fn emit(&self, input: E) -> Self::To {
        DocResponse::new(StatusCode::CREATED, input)
    }
}

pub struct DeletedPresenter;

impl Exhaust<()> for DeletedPresenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}

#[cfg(test)]
mod test {
    use application::transfer::DocumentListDto;
    use serde_json::json;

    use super::{Exhaust, ListPresenter};

    #[test]
    fn list_envelope_counts_results() {
        let response = ListPresenter.emit(DocumentListDto {
            docs: vec![json!({"id": "a"}), json!({"id": "b"})],
        });
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "status": "success",
                "results": 2,
                "data": { "docs": [{"id": "a"}, {"id": "b"}] }
            })
        );
    }
}
