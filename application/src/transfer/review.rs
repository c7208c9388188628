use kernel::prelude::entity::{Rating, ReviewPatch, ReviewText};
use kernel::KernelError;
use uuid::Uuid;

use crate::transfer::DocumentChanges;

/// Reviews are not a plain [`DocumentDraft`](crate::transfer::DocumentDraft):
/// their references are checked and the movie's ratings follow every write.
#[derive(Debug, Clone)]
pub struct CreateReviewDto {
    pub review: String,
    pub rating: i32,
    pub movie: Uuid,
    pub customer: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateReviewDto {
    pub review: Option<String>,
    pub rating: Option<i32>,
}

impl DocumentChanges for UpdateReviewDto {
    type Document = kernel::prelude::entity::Review;

    fn into_patch(self) -> error_stack::Result<ReviewPatch, KernelError> {
        Ok(ReviewPatch {
            review: self.review.map(ReviewText::new).transpose()?,
            rating: self.rating.map(Rating::new).transpose()?,
        })
    }
}
