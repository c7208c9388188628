use application::transfer::{CreateRentalDto, ReturnRentalDto};
use serde::Deserialize;
use uuid::Uuid;

use crate::controller::Intake;
use crate::request::Transformer;

#[derive(Debug, Deserialize)]
pub struct CreateRentalRequest {
    customer: Uuid,
    movie: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ReturnRentalRequest {
    customer: Uuid,
    movie: Uuid,
}

impl Intake<CreateRentalRequest> for Transformer {
    type To = CreateRentalDto;
    fn emit(&self, input: CreateRentalRequest) -> Self::To {
        CreateRentalDto {
            customer: input.customer,
            movie: input.movie,
        }
    }
}

impl Intake<ReturnRentalRequest> for Transformer {
    type To = ReturnRentalDto;
    fn emit(&self, input: ReturnRentalRequest) -> Self::To {
        ReturnRentalDto {
            customer: input.customer,
            movie: input.movie,
        }
    }
}
