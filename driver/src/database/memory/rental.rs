use kernel::interface::query::RentalQuery;
use kernel::interface::update::RentalModifier;
use kernel::prelude::entity::{CustomerId, MovieId, Rental};
use kernel::KernelError;

use crate::database::InMemoryConnection;

pub struct InMemoryRentalRepository;

#[async_trait::async_trait]
impl RentalQuery<InMemoryConnection> for InMemoryRentalRepository {
    async fn find_latest_by_pair(
        &self,
        con: &mut InMemoryConnection,
        customer: &CustomerId,
        movie: &MovieId,
    ) -> error_stack::Result<Option<Rental>, KernelError> {
        let store = con.store.read().await;
        let Some(rentals) = store.collection::<Rental>() else {
            return Ok(None);
        };
        let mut latest: Option<(bool, u64, Rental)> = None;
        for stored in rentals.documents() {
            let rental = stored.decode::<Rental>()?;
            if rental.customer() != customer || rental.movie() != movie {
                continue;
            }
            let rank = (rental.is_outstanding(), stored.sequence());
            if latest
                .as_ref()
                .map_or(true, |(outstanding, sequence, _)| rank > (*outstanding, *sequence))
            {
                latest = Some((rank.0, rank.1, rental));
            }
        }
        Ok(latest.map(|(_, _, rental)| rental))
    }
}

#[async_trait::async_trait]
impl RentalModifier<InMemoryConnection> for InMemoryRentalRepository {
    async fn mark_returned(
        &self,
        con: &mut InMemoryConnection,
        rental: &Rental,
    ) -> error_stack::Result<bool, KernelError> {
        let mut store = con.store.write().await;
        let outstanding = match store.get::<Rental>(rental.id()) {
            Some(stored) => stored.decode::<Rental>()?.is_outstanding(),
            None => false,
        };
        if !outstanding {
            return Ok(false);
        }
        store.replace(rental)
    }
}
