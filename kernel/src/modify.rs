mod document;
mod movie;
mod rental;

pub use self::{document::*, movie::*, rental::*};
