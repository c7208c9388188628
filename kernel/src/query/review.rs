use crate::entity::{MovieId, RatingStats};
use crate::KernelError;

#[async_trait::async_trait]
pub trait ReviewQuery<Connection>: Sync + Send + 'static {
    async fn rating_stats(
        &self,
        con: &mut Connection,
        movie: &MovieId,
    ) -> error_stack::Result<Option<RatingStats>, KernelError>;
}

pub trait DependOnReviewQuery<Connection>: Sync + Send + 'static {
    type ReviewQuery: ReviewQuery<Connection>;
    fn review_query(&self) -> &Self::ReviewQuery;
}
