use sqlx::pool::PoolConnection;
use sqlx::types::Json;
use sqlx::{PgConnection, Postgres};

use kernel::interface::query::RentalQuery;
use kernel::interface::update::RentalModifier;
use kernel::prelude::entity::{CustomerId, MovieId, Rental};
use kernel::KernelError;

use crate::error::ConvertError;

pub struct PostgresRentalRepository;

#[async_trait::async_trait]
impl RentalQuery<PoolConnection<Postgres>> for PostgresRentalRepository {
    async fn find_latest_by_pair(
        &self,
        con: &mut PoolConnection<Postgres>,
        customer: &CustomerId,
        movie: &MovieId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        PgRentalInternal::find_latest_by_pair(con, customer, movie).await
    }
}

#[async_trait::async_trait]
impl RentalModifier<PoolConnection<Postgres>> for PostgresRentalRepository {
    async fn mark_returned(
        &self,
        con: &mut PoolConnection<Postgres>,
        rental: &Rental,
    ) -> error_stack::Result<bool, KernelError> {
        PgRentalInternal::mark_returned(con, rental).await
    }
}

pub(in crate::database) struct PgRentalInternal;

impl PgRentalInternal {
    async fn find_latest_by_pair(
        con: &mut PgConnection,
        customer: &CustomerId,
        movie: &MovieId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        let row = sqlx::query_scalar::<_, Json<Rental>>(
            // language=postgresql
            r#"
            SELECT body
            FROM rentals
            WHERE body ->> 'customer' = $1 AND body ->> 'movie' = $2
            ORDER BY (body ->> 'dateReturned') IS NULL DESC, created_at DESC
            LIMIT 1
            "#,
        )
        .bind(customer.to_string())
        .bind(movie.to_string())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(|Json(rental)| rental))
    }

    async fn mark_returned(
        con: &mut PgConnection,
        rental: &Rental,
    ) -> error_stack::Result<bool, KernelError> {
        // language=postgresql
        let result = sqlx::query(
            r#"
            UPDATE rentals
            SET body = $2
            WHERE id = $1 AND body ->> 'dateReturned' IS NULL
            "#,
        )
        .bind(rental.id().as_ref())
        .bind(Json(rental))
        .execute(con)
        .await
        .convert_error()?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::RentalQuery;
    use kernel::interface::update::{DocumentModifier, RentalModifier};
    use kernel::prelude::entity::{CustomerId, DailyRentalRate, MovieId, Rental};
    use kernel::KernelError;
    use time::OffsetDateTime;

    use crate::database::postgres::PostgresDatabase;
    use crate::database::{PostgresDocumentRepository, PostgresRentalRepository};

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.acquire().await?;
        let customer = CustomerId::new(uuid::Uuid::new_v4());
        let movie = MovieId::new(uuid::Uuid::new_v4());
        let rental = Rental::open(customer.clone(), movie.clone(), OffsetDateTime::now_utc());

        PostgresDocumentRepository.create(&mut con, &rental).await?;
        let duplicate = Rental::open(customer.clone(), movie.clone(), OffsetDateTime::now_utc());
        let report = PostgresDocumentRepository
            .create(&mut con, &duplicate)
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Conflict);

        let found = PostgresRentalRepository
            .find_latest_by_pair(&mut con, &customer, &movie)
            .await?;
        assert_eq!(found.as_ref(), Some(&rental));

        let returned = rental.close(OffsetDateTime::now_utc(), &DailyRentalRate::new(2)?)?;
        assert!(PostgresRentalRepository.mark_returned(&mut con, &returned).await?);
        assert!(!PostgresRentalRepository.mark_returned(&mut con, &returned).await?);

        let found = PostgresRentalRepository
            .find_latest_by_pair(&mut con, &customer, &movie)
            .await?;
        assert_eq!(found, Some(returned.clone()));

        DocumentModifier::<_, Rental>::delete(&PostgresDocumentRepository, &mut con, returned.id())
            .await?;
        Ok(())
    }
}
