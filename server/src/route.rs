mod booking;
mod course;
mod customer;
mod genre;
mod movie;
mod rental;
mod review;
mod user;

pub use self::{
    booking::*, course::*, customer::*, genre::*, movie::*, rental::*, review::*, user::*,
};
