use crate::entity::Rental;
use crate::KernelError;

#[async_trait::async_trait]
pub trait RentalModifier<Connection>: Sync + Send + 'static {
    /// Persists a closed rental, but only while the stored copy is still
    /// outstanding. Returns `false` when another return got there first
    /// or the rental no longer exists.
    async fn mark_returned(
        &self,
        con: &mut Connection,
        rental: &Rental,
    ) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnRentalModifier<Connection>: Sync + Send + 'static {
    type RentalModifier: RentalModifier<Connection>;
    fn rental_modifier(&self) -> &Self::RentalModifier;
}
