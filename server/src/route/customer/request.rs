use application::transfer::{CreateCustomerDto, UpdateCustomerDto, UpdateDocumentDto};
use serde::Deserialize;
use uuid::Uuid;

use crate::controller::Intake;
use crate::request::Transformer;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    name: String,
    phone: String,
    is_gold: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    name: Option<String>,
    phone: Option<String>,
    is_gold: Option<bool>,
}

impl Intake<CreateCustomerRequest> for Transformer {
    type To = CreateCustomerDto;
    fn emit(&self, input: CreateCustomerRequest) -> Self::To {
        CreateCustomerDto {
            name: input.name,
            phone: input.phone,
            is_gold: input.is_gold,
        }
    }
}

impl Intake<(Uuid, UpdateCustomerRequest)> for Transformer {
    type To = UpdateDocumentDto<UpdateCustomerDto>;
    fn emit(&self, input: (Uuid, UpdateCustomerRequest)) -> Self::To {
        let (id, input) = input;
        UpdateDocumentDto {
            id,
            changes: UpdateCustomerDto {
                name: input.name,
                phone: input.phone,
                is_gold: input.is_gold,
            },
        }
    }
}
