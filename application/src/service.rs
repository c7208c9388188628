mod auth;
mod document;
mod ledger;
mod rental;
mod review;
mod view;

pub use self::{auth::*, document::*, ledger::*, rental::*, review::*, view::*};
