use serde_json::{Map, Value};

use crate::entity::Document;
use crate::KernelError;

#[async_trait::async_trait]
pub trait DocumentModifier<Connection, E: Document>: Sync + Send + 'static {
    async fn create(&self, con: &mut Connection, document: &E)
        -> error_stack::Result<(), KernelError>;

    /// Overwrites the given top-level fields of the stored body and leaves
    /// every other field as stored. Returns `false` when no such document
    /// exists.
    async fn merge(
        &self,
        con: &mut Connection,
        id: &E::Id,
        fields: &Map<String, Value>,
    ) -> error_stack::Result<bool, KernelError>;

    /// Returns `false` when no such document exists.
    async fn delete(&self, con: &mut Connection, id: &E::Id)
        -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnDocumentModifier<Connection, E: Document>: Sync + Send + 'static {
    type DocumentModifier: DocumentModifier<Connection, E>;
    fn document_modifier(&self) -> &Self::DocumentModifier;
}
