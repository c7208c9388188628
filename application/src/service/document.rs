use error_stack::Report;
use serde_json::{Map, Value};
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{DependOnDocumentQuery, DocumentQuery};
use kernel::interface::update::{DependOnDocumentModifier, DocumentModifier};
use kernel::prelude::descriptor::{QueryDescriptor, ReservedKeys};
use kernel::prelude::entity::{Document, DocumentId, Patchable};
use kernel::{fail, KernelError};

use crate::transfer::{
    DeleteDocumentDto, DocumentChanges, DocumentDraft, DocumentListDto, GetDocumentDto,
    ListDocumentsDto, UpdateDocumentDto,
};

pub(crate) async fn find_document<C, E, T>(
    dependency: &T,
    con: &mut C,
    id: &E::Id,
) -> error_stack::Result<Option<E>, KernelError>
where
    C: Send,
    E: Document,
    T: ?Sized + DependOnDocumentQuery<C, E>,
{
    dependency.document_query().find_by_id(con, id).await
}

pub(crate) async fn insert_document<C, E, T>(
    dependency: &T,
    con: &mut C,
    document: &E,
) -> error_stack::Result<(), KernelError>
where
    C: Send,
    E: Document,
    T: ?Sized + DependOnDocumentModifier<C, E>,
{
    dependency.document_modifier().create(con, document).await
}

/// Writes only `written` fields of `document` back to storage; other fields
/// keep whatever a concurrent writer stored meanwhile.
pub(crate) async fn merge_document<C, E, T>(
    dependency: &T,
    con: &mut C,
    document: &E,
    written: &[&'static str],
) -> error_stack::Result<bool, KernelError>
where
    C: Send,
    E: Document,
    T: ?Sized + DependOnDocumentModifier<C, E>,
{
    let body = to_document_body(document)?;
    let fields = written
        .iter()
        .filter_map(|field| body.get(*field).map(|value| (field.to_string(), value.clone())))
        .collect::<Map<String, Value>>();
    dependency
        .document_modifier()
        .merge(con, document.document_id(), &fields)
        .await
}

pub(crate) async fn remove_document<C, E, T>(
    dependency: &T,
    con: &mut C,
    id: &E::Id,
) -> error_stack::Result<bool, KernelError>
where
    C: Send,
    E: Document,
    T: ?Sized + DependOnDocumentModifier<C, E>,
{
    dependency.document_modifier().delete(con, id).await
}

pub(crate) fn document_not_found() -> Report<KernelError> {
    fail(KernelError::NotFound, "No document found with that ID")
}

pub(crate) fn to_document_value<E: Document>(
    document: &E,
) -> error_stack::Result<Value, KernelError> {
    serde_json::to_value(document)
        .map_err(|error| Report::new(error).change_context(KernelError::Internal))
}

pub(crate) fn to_document_body<E: Document>(
    document: &E,
) -> error_stack::Result<Map<String, Value>, KernelError> {
    match to_document_value(document)? {
        Value::Object(body) => Ok(body),
        _ => Err(fail(KernelError::Internal, "document body is not an object")),
    }
}

/// Runs a list query and returns the bodies of the page, reduced to the
/// requested fields.
pub(crate) async fn list_bodies<C, E, T>(
    dependency: &T,
    con: &mut C,
    descriptor: &QueryDescriptor,
) -> error_stack::Result<Vec<Map<String, Value>>, KernelError>
where
    C: Send,
    E: Document,
    T: ?Sized + DependOnDocumentQuery<C, E>,
{
    let documents = dependency.document_query().find_many(con, descriptor).await?;
    documents
        .iter()
        .map(|document| to_document_body(document).map(|body| descriptor.projection().apply(body)))
        .collect()
}

#[async_trait::async_trait]
pub trait GetDocumentService<Connection: 'static + Send>:
    'static + Sync + Send + DependOnDatabaseConnection<Connection>
{
    async fn get_document<E>(&self, dto: GetDocumentDto) -> error_stack::Result<E, KernelError>
    where
        E: Document,
        Self: DependOnDocumentQuery<Connection, E>,
    {
        let mut connection = self.database_connection().acquire().await?;
        let id = E::Id::from_uuid(dto.id);
        find_document::<_, E, _>(self, &mut connection, &id)
            .await?
            .ok_or_else(document_not_found)
    }

    async fn list_documents<E>(
        &self,
        dto: ListDocumentsDto,
    ) -> error_stack::Result<DocumentListDto, KernelError>
    where
        E: Document,
        Self: DependOnDocumentQuery<Connection, E>,
    {
        let descriptor = QueryDescriptor::build(dto.params, &ReservedKeys::default())?;
        let mut connection = self.database_connection().acquire().await?;
        let docs = list_bodies::<_, E, _>(self, &mut connection, &descriptor)
            .await?
            .into_iter()
            .map(Value::Object)
            .collect();
        Ok(DocumentListDto { docs })
    }
}

impl<Connection: 'static + Send, T> GetDocumentService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
{
}

#[async_trait::async_trait]
pub trait CreateDocumentService<Connection: 'static + Send>:
    'static + Sync + Send + DependOnDatabaseConnection<Connection>
{
    async fn create_document<D>(
        &self,
        draft: D,
    ) -> error_stack::Result<D::Document, KernelError>
    where
        D: DocumentDraft,
        Self: DependOnDocumentModifier<Connection, D::Document>,
    {
        let id = <D::Document as Document>::Id::from_uuid(Uuid::new_v4());
        let document = draft.into_document(id)?;
        let mut connection = self.database_connection().acquire().await?;
        insert_document(self, &mut connection, &document).await?;
        Ok(document)
    }
}

impl<Connection: 'static + Send, T> CreateDocumentService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
{
}

/// Patches the stored document and writes back only the fields the patch
/// touched, then returns the stored state.
pub(crate) async fn apply_changes<C, P, T>(
    dependency: &T,
    con: &mut C,
    dto: UpdateDocumentDto<P>,
) -> error_stack::Result<P::Document, KernelError>
where
    C: Send,
    P: DocumentChanges,
    T: ?Sized + DependOnDocumentQuery<C, P::Document> + DependOnDocumentModifier<C, P::Document>,
{
    let patch = dto.changes.into_patch()?;
    let id = <P::Document as Document>::Id::from_uuid(dto.id);

    let mut document = find_document::<_, P::Document, _>(dependency, con, &id)
        .await?
        .ok_or_else(document_not_found)?;
    let written = document.patch(patch);
    if written.is_empty() {
        return Ok(document);
    }

    if !merge_document(dependency, con, &document, &written).await? {
        return Err(document_not_found());
    }
    find_document::<_, P::Document, _>(dependency, con, &id)
        .await?
        .ok_or_else(document_not_found)
}

#[async_trait::async_trait]
pub trait UpdateDocumentService<Connection: 'static + Send>:
    'static + Sync + Send + DependOnDatabaseConnection<Connection>
{
    async fn update_document<P>(
        &self,
        dto: UpdateDocumentDto<P>,
    ) -> error_stack::Result<P::Document, KernelError>
    where
        P: DocumentChanges,
        Self: DependOnDocumentQuery<Connection, P::Document>
            + DependOnDocumentModifier<Connection, P::Document>,
    {
        let mut connection = self.database_connection().acquire().await?;
        apply_changes(self, &mut connection, dto).await
    }
}

impl<Connection: 'static + Send, T> UpdateDocumentService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
{
}

#[async_trait::async_trait]
pub trait DeleteDocumentService<Connection: 'static + Send>:
    'static + Sync + Send + DependOnDatabaseConnection<Connection>
{
    async fn delete_document<E>(&self, dto: DeleteDocumentDto) -> error_stack::Result<(), KernelError>
    where
        E: Document,
        Self: DependOnDocumentModifier<Connection, E>,
    {
        let id = E::Id::from_uuid(dto.id);
        let mut connection = self.database_connection().acquire().await?;
        if !remove_document::<_, E, _>(self, &mut connection, &id).await? {
            return Err(document_not_found());
        }
        Ok(())
    }
}

impl<Connection: 'static + Send, T> DeleteDocumentService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
{
}
