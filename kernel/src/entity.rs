mod booking;
mod common;
mod course;
mod credential;
mod customer;
mod genre;
mod movie;
mod rental;
mod review;
mod user;

pub use self::{
    booking::*, common::*, course::*, credential::*, customer::*, genre::*, movie::*, rental::*,
    review::*, user::*,
};
