//! Rental and return bookkeeping between the rentals and movies collections.
//!
//! Writes to the two collections cannot share a transaction, so a change
//! is planned as a [`Saga`]: an ordered list of [`LedgerStep`]s, each
//! recording the operation, its target collection and the operation that
//! undoes it. The runner executes the steps and, on the first failure,
//! undoes the applied ones in reverse order.

mod config;
mod operation;
mod saga;

pub use self::{config::*, operation::*, saga::*};
