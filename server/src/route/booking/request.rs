use application::transfer::{CreateBookingDto, UpdateBookingDto, UpdateDocumentDto};
use serde::Deserialize;
use uuid::Uuid;

use crate::controller::Intake;
use crate::request::Transformer;

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    movie: Uuid,
    customer: Uuid,
    paid: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookingRequest {
    movie: Option<Uuid>,
    customer: Option<Uuid>,
    paid: Option<bool>,
}

impl Intake<CreateBookingRequest> for Transformer {
    type To = CreateBookingDto;
    fn emit(&self, input: CreateBookingRequest) -> Self::To {
        CreateBookingDto {
            movie: input.movie,
            customer: input.customer,
            paid: input.paid,
        }
    }
}

impl Intake<(Uuid, UpdateBookingRequest)> for Transformer {
    type To = UpdateDocumentDto<UpdateBookingDto>;
    fn emit(&self, input: (Uuid, UpdateBookingRequest)) -> Self::To {
        let (id, input) = input;
        UpdateDocumentDto {
            id,
            changes: UpdateBookingDto {
                movie: input.movie,
                customer: input.customer,
                paid: input.paid,
            },
        }
    }
}
