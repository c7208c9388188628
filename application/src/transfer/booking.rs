use kernel::prelude::entity::{Booking, BookingId, BookingPatch, CustomerId, MovieId};
use kernel::KernelError;
use uuid::Uuid;

use crate::transfer::{DocumentChanges, DocumentDraft};

#[derive(Debug, Clone)]
pub struct CreateBookingDto {
    pub movie: Uuid,
    pub customer: Uuid,
    pub paid: Option<bool>,
}

impl DocumentDraft for CreateBookingDto {
    type Document = Booking;

    fn into_document(self, id: BookingId) -> error_stack::Result<Booking, KernelError> {
        Ok(Booking::new(
            id,
            MovieId::new(self.movie),
            CustomerId::new(self.customer),
            self.paid.unwrap_or(true),
        ))
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateBookingDto {
    pub movie: Option<Uuid>,
    pub customer: Option<Uuid>,
    pub paid: Option<bool>,
}

impl DocumentChanges for UpdateBookingDto {
    type Document = Booking;

    fn into_patch(self) -> error_stack::Result<BookingPatch, KernelError> {
        Ok(BookingPatch {
            movie: self.movie.map(MovieId::new),
            customer: self.customer.map(CustomerId::new),
            paid: self.paid,
        })
    }
}
