use error_stack::Report;
use time::OffsetDateTime;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{DependOnDocumentQuery, DependOnRentalQuery, RentalQuery};
use kernel::interface::update::{
    DependOnDocumentModifier, DependOnRentalModifier, DependOnStockModifier, RentalModifier,
};
use kernel::prelude::entity::{Customer, CustomerId, Movie, MovieId, Rental, RentalId};
use kernel::prelude::ledger::{DependOnRetryConfig, LedgerOperation, Saga};
use kernel::{fail, KernelError};

use crate::service::{find_document, LedgerStore, SagaRunner};
use crate::transfer::{CreateRentalDto, RentalDto, ReturnRentalDto};

#[async_trait::async_trait]
pub trait CreateRentalService<Connection: 'static + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnDocumentQuery<Connection, Customer>
    + DependOnDocumentQuery<Connection, Movie>
    + DependOnDocumentModifier<Connection, Rental>
    + DependOnStockModifier<Connection>
    + DependOnRetryConfig
{
    #[tracing::instrument(skip_all, fields(customer = %dto.customer, movie = %dto.movie))]
    async fn create_rental(&self, dto: CreateRentalDto) -> error_stack::Result<RentalDto, KernelError> {
        let mut connection = self.database_connection().acquire().await?;

        let customer_id = CustomerId::new(dto.customer);
        let movie_id = MovieId::new(dto.movie);
        let customer = find_document::<_, Customer, _>(self, &mut connection, &customer_id)
            .await?
            .ok_or_else(|| fail(KernelError::Validation, "invalid customer"))?;
        let movie = find_document::<_, Movie, _>(self, &mut connection, &movie_id)
            .await?
            .ok_or_else(|| fail(KernelError::Validation, "invalid movie"))?;
        if !movie.is_in_stock() {
            return Err(fail(KernelError::Validation, "movie not in stock"));
        }

        let rental = Rental::open(customer_id, movie_id.clone(), OffsetDateTime::now_utc());
        let saga = Saga::new()
            .then(LedgerOperation::InsertRental(rental.clone()))
            .then(LedgerOperation::DecrementStock(movie_id));

        SagaRunner::new(&LedgerStore(self), self.retry_config())
            .run(&mut connection, saga)
            .await?;
        tracing::debug!("rental {} created", rental.id());

        Ok(RentalDto::new(rental, &customer, &movie))
    }
}

impl<Connection: 'static + Send, T> CreateRentalService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnDocumentQuery<Connection, Customer>
        + DependOnDocumentQuery<Connection, Movie>
        + DependOnDocumentModifier<Connection, Rental>
        + DependOnStockModifier<Connection>
        + DependOnRetryConfig
{
}

/// Explains a refused conditional return: either another return got there
/// first or the rental was deleted after it was read.
async fn refused_return<C, T>(dependency: &T, con: &mut C, rental: &RentalId) -> Report<KernelError>
where
    C: Send,
    T: ?Sized + DependOnDocumentQuery<C, Rental>,
{
    match find_document::<_, Rental, _>(dependency, con, rental).await {
        Ok(Some(_)) => fail(KernelError::Conflict, "return already processed"),
        Ok(None) => fail(KernelError::NotFound, "rental not found"),
        Err(report) => report,
    }
}

#[async_trait::async_trait]
pub trait ReturnRentalService<Connection: 'static + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnDocumentQuery<Connection, Customer>
    + DependOnDocumentQuery<Connection, Movie>
    + DependOnRentalQuery<Connection>
    + DependOnRentalModifier<Connection>
    + DependOnDocumentQuery<Connection, Rental>
    + DependOnDocumentModifier<Connection, Rental>
    + DependOnStockModifier<Connection>
    + DependOnRetryConfig
{
    #[tracing::instrument(skip_all, fields(customer = %dto.customer, movie = %dto.movie))]
    async fn return_rental(&self, dto: ReturnRentalDto) -> error_stack::Result<RentalDto, KernelError> {
        let mut connection = self.database_connection().acquire().await?;

        let customer_id = CustomerId::new(dto.customer);
        let movie_id = MovieId::new(dto.movie);
        let customer = find_document::<_, Customer, _>(self, &mut connection, &customer_id)
            .await?
            .ok_or_else(|| fail(KernelError::NotFound, "customer not found"))?;
        let movie = find_document::<_, Movie, _>(self, &mut connection, &movie_id)
            .await?
            .ok_or_else(|| fail(KernelError::NotFound, "movie not found"))?;
        let rental = self
            .rental_query()
            .find_latest_by_pair(&mut connection, &customer_id, &movie_id)
            .await?
            .ok_or_else(|| fail(KernelError::NotFound, "rental not found"))?;

        let returned = rental.close(OffsetDateTime::now_utc(), movie.daily_rental_rate())?;
        if !self
            .rental_modifier()
            .mark_returned(&mut connection, &returned)
            .await?
        {
            return Err(refused_return(self, &mut connection, rental.id()).await);
        }

        SagaRunner::new(&LedgerStore(self), self.retry_config())
            .execute_with_retry(&mut connection, &LedgerOperation::IncrementStock(movie_id))
            .await?;
        tracing::debug!("rental {} returned", returned.id());

        Ok(RentalDto::new(returned, &customer, &movie))
    }
}

impl<Connection: 'static + Send, T> ReturnRentalService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnDocumentQuery<Connection, Customer>
        + DependOnDocumentQuery<Connection, Movie>
        + DependOnRentalQuery<Connection>
        + DependOnRentalModifier<Connection>
        + DependOnDocumentQuery<Connection, Rental>
        + DependOnDocumentModifier<Connection, Rental>
        + DependOnStockModifier<Connection>
        + DependOnRetryConfig
{
}
