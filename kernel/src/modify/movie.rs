use crate::entity::{MovieId, RatingStats};
use crate::KernelError;

/// Stock writes of the rental ledger. Both are single conditional writes
/// at the storage layer and return whether they were applied.
#[async_trait::async_trait]
pub trait StockModifier<Connection>: Sync + Send + 'static {
    /// Decrements `numberInStock` only while it is above zero.
    async fn decrement_stock(
        &self,
        con: &mut Connection,
        movie: &MovieId,
    ) -> error_stack::Result<bool, KernelError>;

    /// Increments `numberInStock` only while it is below
    /// [`NumberInStock::MAX`](crate::entity::NumberInStock::MAX).
    async fn increment_stock(
        &self,
        con: &mut Connection,
        movie: &MovieId,
    ) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnStockModifier<Connection>: Sync + Send + 'static {
    type StockModifier: StockModifier<Connection>;
    fn stock_modifier(&self) -> &Self::StockModifier;
}

#[async_trait::async_trait]
pub trait RatingModifier<Connection>: Sync + Send + 'static {
    /// `None` resets the movie to its unrated defaults.
    async fn update_ratings(
        &self,
        con: &mut Connection,
        movie: &MovieId,
        stats: Option<&RatingStats>,
    ) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnRatingModifier<Connection>: Sync + Send + 'static {
    type RatingModifier: RatingModifier<Connection>;
    fn rating_modifier(&self) -> &Self::RatingModifier;
}
