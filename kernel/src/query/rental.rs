use crate::entity::{CustomerId, MovieId, Rental};
use crate::KernelError;

#[async_trait::async_trait]
pub trait RentalQuery<Connection>: Sync + Send + 'static {
    /// The rental a return for this pair applies to: the outstanding one if
    /// any, otherwise the most recently created.
    async fn find_latest_by_pair(
        &self,
        con: &mut Connection,
        customer: &CustomerId,
        movie: &MovieId,
    ) -> error_stack::Result<Option<Rental>, KernelError>;
}

pub trait DependOnRentalQuery<Connection>: Sync + Send + 'static {
    type RentalQuery: RentalQuery<Connection>;
    fn rental_query(&self) -> &Self::RentalQuery;
}
