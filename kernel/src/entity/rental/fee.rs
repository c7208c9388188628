use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::entity::DailyRentalRate;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct RentalFee(i64);

impl RentalFee {
    pub fn new(fee: impl Into<i64>) -> Self {
        Self(fee.into())
    }

    pub fn calculate(rental_days: i64, rate: &DailyRentalRate) -> Self {
        Self(rental_days.max(0) * i64::from(*rate.as_ref()))
    }
}
