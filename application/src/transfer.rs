mod booking;
mod course;
mod customer;
mod document;
mod genre;
mod movie;
mod rental;
mod review;
mod user;

pub use self::{
    booking::*, course::*, customer::*, document::*, genre::*, movie::*, rental::*, review::*,
    user::*,
};
