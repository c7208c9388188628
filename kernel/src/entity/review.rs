mod id;
mod rating;
mod stats;
mod text;

pub use self::{id::*, rating::*, stats::*, text::*};
use crate::entity::{CustomerId, Document, MovieId, Patchable};
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure)]
pub struct Review {
    id: ReviewId,
    review: ReviewText,
    rating: Rating,
    movie: MovieId,
    customer: CustomerId,
}

impl Review {
    pub fn new(
        id: ReviewId,
        review: ReviewText,
        rating: Rating,
        movie: MovieId,
        customer: CustomerId,
    ) -> Self {
        Self {
            id,
            review,
            rating,
            movie,
            customer,
        }
    }
}

impl Document for Review {
    type Id = ReviewId;
    const COLLECTION: &'static str = "reviews";

    fn document_id(&self) -> &Self::Id {
        &self.id
    }

    fn unique_keys(&self) -> Vec<String> {
        vec![format!("author:{}:{}", self.movie, self.customer)]
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ReviewPatch {
    pub review: Option<ReviewText>,
    pub rating: Option<Rating>,
}

impl Patchable for Review {
    type Patch = ReviewPatch;

    fn patch(&mut self, patch: Self::Patch) -> Vec<&'static str> {
        let mut written = Vec::new();
        if let Some(review) = patch.review {
            self.review = review;
            written.push("review");
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
            written.push("rating");
        }
        written
    }
}
