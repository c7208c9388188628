use kernel::prelude::entity::{Document, Patchable};
use kernel::KernelError;
use uuid::Uuid;

pub struct GetDocumentDto {
    pub id: Uuid,
}

pub struct DeleteDocumentDto {
    pub id: Uuid,
}

/// Raw query parameters of a list request, in request order.
#[derive(Debug, Clone, Default)]
pub struct ListDocumentsDto {
    pub params: Vec<(String, String)>,
}

impl ListDocumentsDto {
    pub fn new(params: Vec<(String, String)>) -> Self {
        Self { params }
    }

    /// Appends a parameter. Later reserved keys override earlier ones.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }
}

/// Documents of one page, already reduced to the requested fields.
#[derive(Debug, Clone)]
pub struct DocumentListDto {
    pub docs: Vec<serde_json::Value>,
}

pub struct UpdateDocumentDto<C> {
    pub id: Uuid,
    pub changes: C,
}

/// Unvalidated input for a new document.
pub trait DocumentDraft: 'static + Send {
    type Document: Document;
    fn into_document(
        self,
        id: <Self::Document as Document>::Id,
    ) -> error_stack::Result<Self::Document, KernelError>;
}

/// Unvalidated partial update of a document.
pub trait DocumentChanges: 'static + Send {
    type Document: Patchable;
    fn into_patch(
        self,
    ) -> error_stack::Result<<Self::Document as Patchable>::Patch, KernelError>;
}
