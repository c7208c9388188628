use application::transfer::{CreateGenreDto, UpdateDocumentDto, UpdateGenreDto};
use serde::Deserialize;
use uuid::Uuid;

use crate::controller::Intake;
use crate::request::Transformer;

#[derive(Debug, Deserialize)]
pub struct CreateGenreRequest {
    name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateGenreRequest {
    name: Option<String>,
}

impl Intake<CreateGenreRequest> for Transformer {
    type To = CreateGenreDto;
    fn emit(&self, input: CreateGenreRequest) -> Self::To {
        CreateGenreDto { name: input.name }
    }
}

impl Intake<(Uuid, UpdateGenreRequest)> for Transformer {
    type To = UpdateDocumentDto<UpdateGenreDto>;
    fn emit(&self, input: (Uuid, UpdateGenreRequest)) -> Self::To {
        let (id, input) = input;
        UpdateDocumentDto {
            id,
            changes: UpdateGenreDto { name: input.name },
        }
    }
}
