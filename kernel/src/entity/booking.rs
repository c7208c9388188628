mod id;

pub use self::id::*;
use crate::entity::{CustomerId, Document, MovieId, Patchable};
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

/// A paid (or pending) reservation of a movie by a customer. Unlike a
/// rental it does not touch the stock.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure)]
pub struct Booking {
    id: BookingId,
    movie: MovieId,
    customer: CustomerId,
    paid: bool,
}

impl Booking {
    pub fn new(id: BookingId, movie: MovieId, customer: CustomerId, paid: bool) -> Self {
        Self {
            id,
            movie,
            customer,
            paid,
        }
    }
}

impl Document for Booking {
    type Id = BookingId;
    const COLLECTION: &'static str = "bookings";

    fn document_id(&self) -> &Self::Id {
        &self.id
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct BookingPatch {
    pub movie: Option<MovieId>,
    pub customer: Option<CustomerId>,
    pub paid: Option<bool>,
}

impl Patchable for Booking {
    type Patch = BookingPatch;

    fn patch(&mut self, patch: Self::Patch) -> Vec<&'static str> {
        let mut written = Vec::new();
        if let Some(movie) = patch.movie {
            self.movie = movie;
            written.push("movie");
        }
        if let Some(customer) = patch.customer {
            self.customer = customer;
            written.push("customer");
        }
        if let Some(paid) = patch.paid {
            self.paid = paid;
            written.push("paid");
        }
        written
    }
}
