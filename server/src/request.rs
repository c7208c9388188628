use application::transfer::{DeleteDocumentDto, GetDocumentDto, ListDocumentsDto};
use uuid::Uuid;

use crate::controller::Intake;

/// Turns requests into application DTOs.
pub struct Transformer;

#[derive(Debug)]
pub struct ListRequest {
    params: Vec<(String, String)>,
}

impl ListRequest {
    pub fn new(params: Vec<(String, String)>) -> Self {
        Self { params }
    }

    /// Restricts the list to documents whose `field` references `id`.
    pub fn scoped(mut self, field: &str, id: Uuid) -> Self {
        self.params.push((field.to_string(), id.to_string()));
        self
    }
}

#[derive(Debug)]
pub struct GetRequest {
    id: Uuid,
}

impl GetRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteRequest {
    id: Uuid,
}

impl DeleteRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

impl Intake<ListRequest> for Transformer {
    type To = ListDocumentsDto;
    fn emit(&self, input: ListRequest) -> Self::To {
        ListDocumentsDto::new(input.params)
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetDocumentDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetDocumentDto { id: input.id }
    }
}

impl Intake<DeleteRequest> for Transformer {
    type To = DeleteDocumentDto;
    fn emit(&self, input: DeleteRequest) -> Self::To {
        DeleteDocumentDto { id: input.id }
    }
}
