use kernel::interface::query::ReviewQuery;
use kernel::prelude::entity::{MovieId, RatingStats, Review};
use kernel::KernelError;

use crate::database::InMemoryConnection;

pub struct InMemoryReviewRepository;

#[async_trait::async_trait]
impl ReviewQuery<InMemoryConnection> for InMemoryReviewRepository {
    async fn rating_stats(
        &self,
        con: &mut InMemoryConnection,
        movie: &MovieId,
    ) -> error_stack::Result<Option<RatingStats>, KernelError> {
        let store = con.store.read().await;
        let Some(reviews) = store.collection::<Review>() else {
            return Ok(None);
        };
        let reviews = reviews
            .documents()
            .map(|stored| stored.decode::<Review>())
            .collect::<error_stack::Result<Vec<_>, KernelError>>()?;
        Ok(RatingStats::collect(
            reviews
                .iter()
                .filter(|review| review.movie() == movie)
                .map(Review::rating),
        ))
    }
}
