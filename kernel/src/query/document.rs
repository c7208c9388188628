use crate::descriptor::QueryDescriptor;
use crate::entity::Document;
use crate::KernelError;

#[async_trait::async_trait]
pub trait DocumentQuery<Connection, E: Document>: Sync + Send + 'static {
    async fn find_by_id(
        &self,
        con: &mut Connection,
        id: &E::Id,
    ) -> error_stack::Result<Option<E>, KernelError>;

    async fn find_many(
        &self,
        con: &mut Connection,
        descriptor: &QueryDescriptor,
    ) -> error_stack::Result<Vec<E>, KernelError>;
}

pub trait DependOnDocumentQuery<Connection, E: Document>: Sync + Send + 'static {
    type DocumentQuery: DocumentQuery<Connection, E>;
    fn document_query(&self) -> &Self::DocumentQuery;
}
