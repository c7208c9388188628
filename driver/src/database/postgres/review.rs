use sqlx::pool::PoolConnection;
use sqlx::{PgConnection, Postgres};

use kernel::interface::query::ReviewQuery;
use kernel::prelude::entity::{MovieId, RatingStats};
use kernel::KernelError;

use crate::error::ConvertError;

pub struct PostgresReviewRepository;

#[async_trait::async_trait]
impl ReviewQuery<PoolConnection<Postgres>> for PostgresReviewRepository {
    async fn rating_stats(
        &self,
        con: &mut PoolConnection<Postgres>,
        movie: &MovieId,
    ) -> error_stack::Result<Option<RatingStats>, KernelError> {
        PgReviewInternal::rating_stats(con, movie).await
    }
}

#[derive(sqlx::FromRow)]
struct RatingStatsRow {
    quantity: i64,
    average: Option<f64>,
}

impl RatingStatsRow {
    fn into_stats(self) -> Option<RatingStats> {
        match (self.quantity, self.average) {
            (quantity, Some(average)) if quantity > 0 => Some(RatingStats::new(quantity, average)),
            _ => None,
        }
    }
}

pub(in crate::database) struct PgReviewInternal;

impl PgReviewInternal {
    async fn rating_stats(
        con: &mut PgConnection,
        movie: &MovieId,
    ) -> error_stack::Result<Option<RatingStats>, KernelError> {
        let row = sqlx::query_as::<_, RatingStatsRow>(
            // language=postgresql
            r#"
            SELECT COUNT(*) AS quantity, AVG((body ->> 'rating')::float8) AS average
            FROM reviews
            WHERE body ->> 'movie' = $1
            "#,
        )
        .bind(movie.to_string())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(row.into_stats())
    }
}
