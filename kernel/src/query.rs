mod document;
mod rental;
mod review;

pub use self::{document::*, rental::*, review::*};
