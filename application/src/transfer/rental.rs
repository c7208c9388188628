use kernel::prelude::entity::{Customer, DestructRental, Movie, Rental};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::transfer::{CustomerSummary, MovieSummary};

#[derive(Debug, Clone)]
pub struct CreateRentalDto {
    pub customer: Uuid,
    pub movie: Uuid,
}

#[derive(Debug, Clone)]
pub struct ReturnRentalDto {
    pub customer: Uuid,
    pub movie: Uuid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RentalDto {
    pub id: Uuid,
    pub customer: CustomerSummary,
    pub movie: MovieSummary,
    pub date_out: OffsetDateTime,
    pub date_returned: Option<OffsetDateTime>,
    pub rental_fee: Option<i64>,
}

impl RentalDto {
    pub fn new(rental: Rental, customer: &Customer, movie: &Movie) -> Self {
        let DestructRental {
            id,
            date_out,
            date_returned,
            rental_fee,
            ..
        } = rental.into_destruct();
        Self {
            id: id.into(),
            customer: CustomerSummary::from(customer),
            movie: MovieSummary::from(movie),
            date_out: date_out.into(),
            date_returned: date_returned.map(Into::into),
            rental_fee: rental_fee.map(Into::into),
        }
    }
}
