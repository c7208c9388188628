use serde_json::{Map, Value};

use kernel::interface::query::DocumentQuery;
use kernel::interface::update::DocumentModifier;
use kernel::prelude::descriptor::QueryDescriptor;
use kernel::prelude::entity::Document;
use kernel::KernelError;

use crate::database::InMemoryConnection;

pub struct InMemoryDocumentRepository;

#[async_trait::async_trait]
impl<E: Document> DocumentQuery<InMemoryConnection, E> for InMemoryDocumentRepository {
    async fn find_by_id(
        &self,
        con: &mut InMemoryConnection,
        id: &E::Id,
    ) -> error_stack::Result<Option<E>, KernelError> {
        let store = con.store.read().await;
        store.get::<E>(id).map(|stored| stored.decode()).transpose()
    }

    async fn find_many(
        &self,
        con: &mut InMemoryConnection,
        descriptor: &QueryDescriptor,
    ) -> error_stack::Result<Vec<E>, KernelError> {
        let store = con.store.read().await;
        store.find_many(descriptor)
    }
}

#[async_trait::async_trait]
impl<E: Document> DocumentModifier<InMemoryConnection, E> for InMemoryDocumentRepository {
    async fn create(
        &self,
        con: &mut InMemoryConnection,
        document: &E,
    ) -> error_stack::Result<(), KernelError> {
        let mut store = con.store.write().await;
        store.insert(document)
    }

    async fn merge(
        &self,
        con: &mut InMemoryConnection,
        id: &E::Id,
        fields: &Map<String, Value>,
    ) -> error_stack::Result<bool, KernelError> {
        let mut store = con.store.write().await;
        store.merge::<E>(id, fields)
    }

    async fn delete(
        &self,
        con: &mut InMemoryConnection,
        id: &E::Id,
    ) -> error_stack::Result<bool, KernelError> {
        let mut store = con.store.write().await;
        Ok(store.remove::<E>(id))
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::DocumentQuery;
    use kernel::interface::update::DocumentModifier;
    use kernel::prelude::descriptor::{QueryDescriptor, ReservedKeys};
    use kernel::prelude::entity::{Customer, CustomerId, CustomerName, CustomerPhone};
    use kernel::KernelError;
    use serde_json::json;

    use crate::database::{InMemoryDatabase, InMemoryDocumentRepository};

    fn customer(name: &str, phone: &str, is_gold: bool) -> Customer {
        Customer::new(
            CustomerId::new(uuid::Uuid::new_v4()),
            CustomerName::new(name).unwrap(),
            CustomerPhone::new(phone).unwrap(),
            is_gold,
        )
    }

    async fn query(
        db: &InMemoryDatabase,
        params: &[(&str, &str)],
    ) -> error_stack::Result<Vec<Customer>, KernelError> {
        let mut con = db.acquire().await?;
        let descriptor = QueryDescriptor::build(params.iter().copied(), &ReservedKeys::default())?;
        InMemoryDocumentRepository.find_many(&mut con, &descriptor).await
    }

    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let mut con = db.acquire().await?;
        let first = customer("Ingrid", "12345", true);
        let second = customer("Humphrey", "67890", false);
        InMemoryDocumentRepository.create(&mut con, &first).await?;
        InMemoryDocumentRepository.create(&mut con, &second).await?;

        let report = InMemoryDocumentRepository
            .create(&mut con, &first)
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Conflict);

        assert_eq!(query(&db, &[]).await?, vec![second.clone(), first.clone()]);
        assert_eq!(query(&db, &[("phone", "12345")]).await?, vec![first.clone()]);
        assert_eq!(query(&db, &[("isGold", "false")]).await?, vec![second.clone()]);
        assert_eq!(
            query(&db, &[("sort", "name")]).await?,
            vec![second.clone(), first.clone()]
        );
        assert!(query(&db, &[("page", "3"), ("limit", "1")]).await?.is_empty());

        let renamed = Customer::new(
            first.id().clone(),
            CustomerName::new("Ingrid B.").unwrap(),
            first.phone().clone(),
            true,
        );
        let fields = json!({ "name": "Ingrid B." });
        assert!(
            DocumentModifier::<_, Customer>::merge(
                &InMemoryDocumentRepository,
                &mut con,
                first.id(),
                fields.as_object().unwrap(),
            )
            .await?
        );
        let found: Option<Customer> = InMemoryDocumentRepository
            .find_by_id(&mut con, first.id())
            .await?;
        assert_eq!(found, Some(renamed));

        let clash = json!({ "isGold": "yes" });
        let report = DocumentModifier::<_, Customer>::merge(
            &InMemoryDocumentRepository,
            &mut con,
            first.id(),
            clash.as_object().unwrap(),
        )
        .await
        .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Validation);

        assert!(
            DocumentModifier::<_, Customer>::delete(&InMemoryDocumentRepository, &mut con, first.id())
                .await?
        );
        assert!(
            !DocumentModifier::<_, Customer>::delete(&InMemoryDocumentRepository, &mut con, first.id())
                .await?
        );
        Ok(())
    }
}

#[cfg(test)]
mod unique_test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::update::DocumentModifier;
    use kernel::prelude::entity::{Genre, GenreId, GenreName};
    use kernel::KernelError;
    use serde_json::json;

    use crate::database::{InMemoryDatabase, InMemoryDocumentRepository};

    #[tokio::test]
    async fn merge_cannot_take_another_documents_unique_key() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let mut con = db.acquire().await?;
        let drama = Genre::new(GenreId::new(uuid::Uuid::new_v4()), GenreName::new("Drama")?);
        let comedy = Genre::new(GenreId::new(uuid::Uuid::new_v4()), GenreName::new("Comedy")?);
        InMemoryDocumentRepository.create(&mut con, &drama).await?;
        InMemoryDocumentRepository.create(&mut con, &comedy).await?;

        let fields = json!({ "name": "drama", "slug": "drama" });
        let report = DocumentModifier::<_, Genre>::merge(
            &InMemoryDocumentRepository,
            &mut con,
            comedy.id(),
            fields.as_object().unwrap(),
        )
        .await
        .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Conflict);
        Ok(())
    }
}
