use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct RatingsAverage(f64);

impl RatingsAverage {
    pub fn new(average: impl Into<f64>) -> Self {
        Self((average.into() * 10.0).round() / 10.0)
    }
}

impl Default for RatingsAverage {
    fn default() -> Self {
        Self(4.5)
    }
}

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct RatingsQuantity(i64);

impl RatingsQuantity {
    pub fn new(quantity: impl Into<i64>) -> Self {
        Self(quantity.into())
    }
}
