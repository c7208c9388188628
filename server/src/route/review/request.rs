use application::transfer::{CreateReviewDto, UpdateDocumentDto, UpdateReviewDto};
use serde::Deserialize;
use uuid::Uuid;

use crate::controller::Intake;
use crate::request::Transformer;

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    review: String,
    rating: i32,
    movie: Uuid,
    customer: Uuid,
}

/// Review posted under `/movies/:id/reviews`; the path names the movie.
#[derive(Debug, Deserialize)]
pub struct NestedReviewRequest {
    review: String,
    rating: i32,
    customer: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UpdateReviewRequest {
    review: Option<String>,
    rating: Option<i32>,
}

impl Intake<CreateReviewRequest> for Transformer {
    type To = CreateReviewDto;
    fn emit(&self, input: CreateReviewRequest) -> Self::To {
        CreateReviewDto {
            review: input.review,
            rating: input.rating,
            movie: input.movie,
            customer: input.customer,
        }
    }
}

impl Intake<(Uuid, NestedReviewRequest)> for Transformer {
    type To = CreateReviewDto;
    fn emit(&self, input: (Uuid, NestedReviewRequest)) -> Self::To {
        let (movie, input) = input;
        CreateReviewDto {
            review: input.review,
            rating: input.rating,
            movie,
            customer: input.customer,
        }
    }
}

impl Intake<(Uuid, UpdateReviewRequest)> for Transformer {
    type To = UpdateDocumentDto<UpdateReviewDto>;
    fn emit(&self, input: (Uuid, UpdateReviewRequest)) -> Self::To {
        let (id, input) = input;
        UpdateDocumentDto {
            id,
            changes: UpdateReviewDto {
                review: input.review,
                rating: input.rating,
            },
        }
    }
}
