use sqlx::pool::PoolConnection;
use sqlx::{PgConnection, Postgres};

use kernel::interface::update::{RatingModifier, StockModifier};
use kernel::prelude::entity::{
    MovieId, NumberInStock, RatingStats, RatingsAverage, RatingsQuantity,
};
use kernel::KernelError;

use crate::error::ConvertError;

pub struct PostgresMovieRepository;

#[async_trait::async_trait]
impl StockModifier<PoolConnection<Postgres>> for PostgresMovieRepository {
    async fn decrement_stock(
        &self,
        con: &mut PoolConnection<Postgres>,
        movie: &MovieId,
    ) -> error_stack::Result<bool, KernelError> {
        PgMovieInternal::decrement_stock(con, movie).await
    }

    async fn increment_stock(
        &self,
        con: &mut PoolConnection<Postgres>,
        movie: &MovieId,
    ) -> error_stack::Result<bool, KernelError> {
        PgMovieInternal::increment_stock(con, movie).await
    }
}

#[async_trait::async_trait]
impl RatingModifier<PoolConnection<Postgres>> for PostgresMovieRepository {
    async fn update_ratings(
        &self,
        con: &mut PoolConnection<Postgres>,
        movie: &MovieId,
        stats: Option<&RatingStats>,
    ) -> error_stack::Result<bool, KernelError> {
        let (average, quantity) = match stats {
            Some(stats) => (
                RatingsAverage::new(*stats.average()),
                RatingsQuantity::new(*stats.quantity()),
            ),
            None => (RatingsAverage::default(), RatingsQuantity::default()),
        };
        PgMovieInternal::update_ratings(con, movie, &average, &quantity).await
    }
}

pub(in crate::database) struct PgMovieInternal;

impl PgMovieInternal {
    async fn decrement_stock(
        con: &mut PgConnection,
        movie: &MovieId,
    ) -> error_stack::Result<bool, KernelError> {
        // language=postgresql
        let result = sqlx::query(
            r#"
            UPDATE movies
            SET body = jsonb_set(body, '{numberInStock}', to_jsonb((body ->> 'numberInStock')::int - 1))
            WHERE id = $1 AND (body ->> 'numberInStock')::int > 0
            "#,
        )
        .bind(movie.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(result.rows_affected() > 0)
    }

    async fn increment_stock(
        con: &mut PgConnection,
        movie: &MovieId,
    ) -> error_stack::Result<bool, KernelError> {
        // language=postgresql
        let result = sqlx::query(
            r#"
            UPDATE movies
            SET body = jsonb_set(body, '{numberInStock}', to_jsonb((body ->> 'numberInStock')::int + 1))
            WHERE id = $1 AND (body ->> 'numberInStock')::int < $2
            "#,
        )
        .bind(movie.as_ref())
        .bind(NumberInStock::MAX)
        .execute(con)
        .await
        .convert_error()?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_ratings(
        con: &mut PgConnection,
        movie: &MovieId,
        average: &RatingsAverage,
        quantity: &RatingsQuantity,
    ) -> error_stack::Result<bool, KernelError> {
        // language=postgresql
        let result = sqlx::query(
            r#"
            UPDATE movies
            SET body = body || jsonb_build_object('ratingsAverage', $2::float8, 'ratingsQuantity', $3::int8)
            WHERE id = $1
            "#,
        )
        .bind(movie.as_ref())
        .bind(average.as_ref())
        .bind(quantity.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::DocumentQuery;
    use kernel::interface::update::{DocumentModifier, RatingModifier, StockModifier};
    use kernel::prelude::entity::{
        DailyRentalRate, GenreId, Movie, MovieId, MovieTitle, NumberInStock, RatingStats,
    };
    use kernel::KernelError;
    use serde_json::json;

    use crate::database::postgres::PostgresDatabase;
    use crate::database::{PostgresDocumentRepository, PostgresMovieRepository};

    async fn stock_of(
        con: &mut sqlx::pool::PoolConnection<sqlx::Postgres>,
        id: &MovieId,
    ) -> error_stack::Result<i32, KernelError> {
        let movie: Option<Movie> = PostgresDocumentRepository.find_by_id(con, id).await?;
        Ok(movie.map(|movie| *movie.number_in_stock().as_ref()).unwrap_or(-1))
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.acquire().await?;
        let id = MovieId::new(uuid::Uuid::new_v4());
        let movie = Movie::new(
            id.clone(),
            MovieTitle::new("Stalker Test")?,
            GenreId::new(uuid::Uuid::new_v4()),
            NumberInStock::new(1)?,
            DailyRentalRate::new(2)?,
        );
        PostgresDocumentRepository.create(&mut con, &movie).await?;

        assert!(PostgresMovieRepository.decrement_stock(&mut con, &id).await?);
        assert_eq!(stock_of(&mut con, &id).await?, 0);
        assert!(!PostgresMovieRepository.decrement_stock(&mut con, &id).await?);
        assert_eq!(stock_of(&mut con, &id).await?, 0);
        assert!(PostgresMovieRepository.increment_stock(&mut con, &id).await?);
        assert_eq!(stock_of(&mut con, &id).await?, 1);

        let stats = RatingStats::new(3, 11.0 / 3.0);
        assert!(
            PostgresMovieRepository
                .update_ratings(&mut con, &id, Some(&stats))
                .await?
        );
        let found: Option<Movie> = PostgresDocumentRepository.find_by_id(&mut con, &id).await?;
        let found = found.unwrap();
        assert_eq!(*found.ratings_average().as_ref(), 3.7);
        assert_eq!(*found.ratings_quantity().as_ref(), 3);

        DocumentModifier::<_, Movie>::delete(&PostgresDocumentRepository, &mut con, &id).await?;
        assert!(!PostgresMovieRepository.increment_stock(&mut con, &id).await?);
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn title_merge_keeps_concurrent_stock_write() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.acquire().await?;
        let id = MovieId::new(uuid::Uuid::new_v4());
        let movie = Movie::new(
            id.clone(),
            MovieTitle::new("Solaris Test")?,
            GenreId::new(uuid::Uuid::new_v4()),
            NumberInStock::new(NumberInStock::MAX)?,
            DailyRentalRate::new(2)?,
        );
        PostgresDocumentRepository.create(&mut con, &movie).await?;
        assert!(!PostgresMovieRepository.increment_stock(&mut con, &id).await?);

        assert!(PostgresMovieRepository.decrement_stock(&mut con, &id).await?);
        let fields = json!({ "title": "Solaris Test 1972", "slug": "solaris-test-1972" });
        assert!(
            DocumentModifier::<_, Movie>::merge(
                &PostgresDocumentRepository,
                &mut con,
                &id,
                fields.as_object().unwrap(),
            )
            .await?
        );
        assert_eq!(stock_of(&mut con, &id).await?, NumberInStock::MAX - 1);

        DocumentModifier::<_, Movie>::delete(&PostgresDocumentRepository, &mut con, &id).await?;
        Ok(())
    }
}
