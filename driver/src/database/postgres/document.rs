use serde_json::{Map, Value};
use sqlx::pool::PoolConnection;
use sqlx::types::Json;
use sqlx::{PgConnection, Postgres, QueryBuilder};

use kernel::interface::query::DocumentQuery;
use kernel::interface::update::DocumentModifier;
use kernel::prelude::descriptor::{
    Comparison, FieldFilter, FieldName, QueryDescriptor, SortDirection,
};
use kernel::prelude::entity::Document;
use kernel::KernelError;

use crate::error::ConvertError;

/// Stores every [`Document`] as a JSONB body in the table named after its
/// collection.
pub struct PostgresDocumentRepository;

#[async_trait::async_trait]
impl<E: Document> DocumentQuery<PoolConnection<Postgres>, E> for PostgresDocumentRepository {
    async fn find_by_id(
        &self,
        con: &mut PoolConnection<Postgres>,
        id: &E::Id,
    ) -> error_stack::Result<Option<E>, KernelError> {
        PgDocumentInternal::find_by_id(con, id).await
    }

    async fn find_many(
        &self,
        con: &mut PoolConnection<Postgres>,
        descriptor: &QueryDescriptor,
    ) -> error_stack::Result<Vec<E>, KernelError> {
        PgDocumentInternal::find_many(con, descriptor).await
    }
}

#[async_trait::async_trait]
impl<E: Document> DocumentModifier<PoolConnection<Postgres>, E> for PostgresDocumentRepository {
    async fn create(
        &self,
        con: &mut PoolConnection<Postgres>,
        document: &E,
    ) -> error_stack::Result<(), KernelError> {
        PgDocumentInternal::create(con, document).await
    }

    async fn merge(
        &self,
        con: &mut PoolConnection<Postgres>,
        id: &E::Id,
        fields: &Map<String, Value>,
    ) -> error_stack::Result<bool, KernelError> {
        PgDocumentInternal::merge::<E>(con, id, fields).await
    }

    async fn delete(
        &self,
        con: &mut PoolConnection<Postgres>,
        id: &E::Id,
    ) -> error_stack::Result<bool, KernelError> {
        PgDocumentInternal::delete::<E>(con, id).await
    }
}

pub(in crate::database) struct PgDocumentInternal;

impl PgDocumentInternal {
    async fn find_by_id<E: Document>(
        con: &mut PgConnection,
        id: &E::Id,
    ) -> error_stack::Result<Option<E>, KernelError> {
        let row = sqlx::query_scalar::<_, Json<E>>(&format!(
            // language=postgresql
            r#"
            SELECT body
            FROM {}
            WHERE id = $1
            "#,
            E::COLLECTION
        ))
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(|Json(document)| document))
    }

    async fn find_many<E: Document>(
        con: &mut PgConnection,
        descriptor: &QueryDescriptor,
    ) -> error_stack::Result<Vec<E>, KernelError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT body FROM {} WHERE TRUE",
            E::COLLECTION
        ));
        for filter in descriptor.filters() {
            builder.push(" AND ");
            push_filter(&mut builder, filter);
        }

        builder.push(" ORDER BY ");
        for key in descriptor.sort() {
            push_field(&mut builder, key.field(), false);
            builder.push(match key.direction() {
                SortDirection::Ascending => " ASC, ",
                SortDirection::Descending => " DESC, ",
            });
        }
        builder
            .push("id ASC OFFSET ")
            .push_bind(bounded(descriptor.skip()))
            .push(" LIMIT ")
            .push_bind(bounded(descriptor.take()));

        let rows = builder
            .build_query_scalar::<Json<E>>()
            .fetch_all(con)
            .await
            .convert_error()?;
        Ok(rows.into_iter().map(|Json(document)| document).collect())
    }

    async fn create<E: Document>(
        con: &mut PgConnection,
        document: &E,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(&format!(
            // language=postgresql
            r#"
            INSERT INTO {} (id, body)
            VALUES ($1, $2)
            "#,
            E::COLLECTION
        ))
        .bind(document.document_id().as_ref())
        .bind(Json(document))
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    /// Single-statement merge, so concurrent conditional writes to other
    /// fields of the same body are kept.
    async fn merge<E: Document>(
        con: &mut PgConnection,
        id: &E::Id,
        fields: &Map<String, Value>,
    ) -> error_stack::Result<bool, KernelError> {
        let result = sqlx::query(&format!(
            // language=postgresql
            r#"
            UPDATE {}
            SET body = body || $2
            WHERE id = $1
            "#,
            E::COLLECTION
        ))
        .bind(id.as_ref())
        .bind(Json(fields))
        .execute(con)
        .await
        .convert_error()?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete<E: Document>(
        con: &mut PgConnection,
        id: &E::Id,
    ) -> error_stack::Result<bool, KernelError> {
        let result = sqlx::query(&format!(
            // language=postgresql
            r#"
            DELETE FROM {}
            WHERE id = $1
            "#,
            E::COLLECTION
        ))
        .bind(id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(result.rows_affected() > 0)
    }
}

fn bounded(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// `createdAt` is a column, every other field lives in the body.
fn push_field(builder: &mut QueryBuilder<'_, Postgres>, field: &FieldName, as_json: bool) {
    match (field.is_created_at(), as_json) {
        (true, true) => {
            builder.push("to_jsonb(created_at)");
        }
        (true, false) => {
            builder.push("created_at");
        }
        (false, _) => {
            builder.push("(body -> ").push_bind(field.as_ref().clone()).push(")");
        }
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &FieldFilter) {
    let typed = Json(filter.value().typed().clone());
    builder.push("((jsonb_typeof(");
    push_field(builder, filter.field(), true);
    builder
        .push(") = jsonb_typeof(")
        .push_bind(typed.clone())
        .push(") AND ");
    push_field(builder, filter.field(), true);
    builder
        .push(" ")
        .push(filter.comparison().as_sql())
        .push(" ")
        .push_bind(typed)
        .push(")");
    if *filter.comparison() == Comparison::Eq {
        builder.push(" OR (jsonb_typeof(");
        push_field(builder, filter.field(), true);
        builder.push(") = 'string' AND ");
        push_field(builder, filter.field(), true);
        builder
            .push(" #>> '{}' = ")
            .push_bind(filter.value().raw().clone())
            .push(")");
    }
    builder.push(")");
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::DocumentQuery;
    use kernel::interface::update::DocumentModifier;
    use kernel::prelude::descriptor::{QueryDescriptor, ReservedKeys};
    use kernel::prelude::entity::{
        Customer, CustomerId, CustomerName, CustomerPhone, Genre, GenreId, GenreName,
    };
    use kernel::KernelError;
    use rand::Rng;
    use serde_json::json;

    use crate::database::postgres::PostgresDatabase;
    use crate::database::PostgresDocumentRepository;

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.acquire().await?;
        let id = CustomerId::new(uuid::Uuid::new_v4());
        let phone = format!("{}", rand::thread_rng().gen_range(10_000_000..99_999_999));

        let customer = Customer::new(
            id.clone(),
            CustomerName::new("Test Customer")?,
            CustomerPhone::new(phone.clone())?,
            false,
        );
        PostgresDocumentRepository
            .create(&mut con, &customer)
            .await?;

        let found: Option<Customer> = PostgresDocumentRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(customer.clone()));

        let descriptor = QueryDescriptor::build([("phone", phone.as_str())], &ReservedKeys::default())?;
        let listed: Vec<Customer> = PostgresDocumentRepository
            .find_many(&mut con, &descriptor)
            .await?;
        assert_eq!(listed, vec![customer.clone()]);

        let customer = Customer::new(
            id.clone(),
            CustomerName::new("Renamed Customer")?,
            CustomerPhone::new(phone)?,
            true,
        );
        let fields = json!({ "name": "Renamed Customer", "isGold": true });
        assert!(
            DocumentModifier::<_, Customer>::merge(
                &PostgresDocumentRepository,
                &mut con,
                &id,
                fields.as_object().unwrap(),
            )
            .await?
        );
        let found: Option<Customer> = PostgresDocumentRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(customer));

        assert!(DocumentModifier::<_, Customer>::delete(&PostgresDocumentRepository, &mut con, &id).await?);
        let found: Option<Customer> = PostgresDocumentRepository.find_by_id(&mut con, &id).await?;
        assert!(found.is_none());

        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn duplicate_genre_name_conflicts() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.acquire().await?;
        let name = format!("Genre {}", rand::thread_rng().gen_range(10_000..99_999));
        let first = Genre::new(GenreId::new(uuid::Uuid::new_v4()), GenreName::new(name.clone())?);
        let second = Genre::new(GenreId::new(uuid::Uuid::new_v4()), GenreName::new(name.to_uppercase())?);

        PostgresDocumentRepository.create(&mut con, &first).await?;
        let report = PostgresDocumentRepository
            .create(&mut con, &second)
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Conflict);

        DocumentModifier::<_, Genre>::delete(&PostgresDocumentRepository, &mut con, first.id()).await?;
        Ok(())
    }
}
