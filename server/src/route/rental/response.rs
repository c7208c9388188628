use axum::http::StatusCode;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use application::transfer::{CustomerSummary, MovieSummary, RentalDto};

use crate::controller::Exhaust;
use crate::response::DocResponse;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalCustomer {
    id: Uuid,
    name: String,
    is_gold: bool,
    phone: String,
}

impl From<CustomerSummary> for RentalCustomer {
    fn from(value: CustomerSummary) -> Self {
        Self {
            id: value.id,
            name: value.name,
            is_gold: value.is_gold,
            phone: value.phone,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalMovie {
    id: Uuid,
    title: String,
    daily_rental_rate: i32,
    ratings_average: f64,
    ratings_quantity: i64,
}

impl From<MovieSummary> for RentalMovie {
    fn from(value: MovieSummary) -> Self {
        Self {
            id: value.id,
            title: value.title,
            daily_rental_rate: value.daily_rental_rate,
            ratings_average: value.ratings_average,
            ratings_quantity: value.ratings_quantity,
        }
    }
}

/// A rental with its customer and movie embedded.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalResponse {
    id: Uuid,
    customer: RentalCustomer,
    movie: RentalMovie,
    #[serde(with = "time::serde::rfc3339")]
    date_out: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    date_returned: Option<OffsetDateTime>,
    rental_fee: Option<i64>,
}

impl From<RentalDto> for RentalResponse {
    fn from(value: RentalDto) -> Self {
        Self {
            id: value.id,
            customer: value.customer.into(),
            movie: value.movie.into(),
            date_out: value.date_out,
            date_returned: value.date_returned,
            rental_fee: value.rental_fee,
        }
    }
}

pub struct RentalPresenter {
    code: StatusCode,
}

impl RentalPresenter {
    pub fn new(code: StatusCode) -> Self {
        Self { code }
    }
}

impl Exhaust<RentalDto> for RentalPresenter {
    type To = DocResponse<RentalResponse>;
    fn emit(&self, input: RentalDto) -> Self::To {
        DocResponse::new(self.code, input.into())
    }
}
