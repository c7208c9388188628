use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::entity::bounded_number;
use crate::KernelError;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct DailyRentalRate(i32);

impl DailyRentalRate {
    pub fn new(rate: impl Into<i32>) -> error_stack::Result<Self, KernelError> {
        bounded_number(rate.into(), "Daily rental rate", 0, 255).map(Self)
    }
}
