use application::transfer::{CreateCourseDto, UpdateCourseDto, UpdateDocumentDto};
use serde::Deserialize;
use uuid::Uuid;

use crate::controller::Intake;
use crate::request::Transformer;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    name: String,
    category: String,
    author: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    is_published: Option<bool>,
    price: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    name: Option<String>,
    category: Option<String>,
    author: Option<String>,
    tags: Option<Vec<String>>,
    is_published: Option<bool>,
    price: Option<f64>,
}

impl Intake<CreateCourseRequest> for Transformer {
    type To = CreateCourseDto;
    fn emit(&self, input: CreateCourseRequest) -> Self::To {
        CreateCourseDto {
            name: input.name,
            category: input.category,
            author: input.author,
            tags: input.tags,
            is_published: input.is_published,
            price: input.price,
        }
    }
}

impl Intake<(Uuid, UpdateCourseRequest)> for Transformer {
    type To = UpdateDocumentDto<UpdateCourseDto>;
    fn emit(&self, input: (Uuid, UpdateCourseRequest)) -> Self::To {
        let (id, input) = input;
        UpdateDocumentDto {
            id,
            changes: UpdateCourseDto {
                name: input.name,
                category: input.category,
                author: input.author,
                tags: input.tags,
                is_published: input.is_published,
                price: input.price,
            },
        }
    }
}
