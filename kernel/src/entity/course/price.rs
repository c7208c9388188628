use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::{fail, KernelError};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct CoursePrice(i32);

impl CoursePrice {
    pub const MIN: f64 = 10.0;
    pub const MAX: f64 = 200.0;

    /// Bounds are checked on the given amount, the stored price is rounded.
    pub fn new(amount: f64) -> error_stack::Result<Self, KernelError> {
        if !amount.is_finite() || amount < Self::MIN {
            return Err(fail(KernelError::Validation, "Price must be at least 10."));
        }
        if amount > Self::MAX {
            return Err(fail(KernelError::Validation, "Price must be at most 200."));
        }
        Ok(Self(amount.round() as i32))
    }
}

#[cfg(test)]
mod test {
    use super::CoursePrice;

    #[test]
    fn price_is_rounded_within_bounds() {
        assert_eq!(CoursePrice::new(19.6).unwrap(), CoursePrice(20));
        assert_eq!(CoursePrice::new(10.0).unwrap(), CoursePrice(10));
        assert!(CoursePrice::new(9.99).is_err());
        assert!(CoursePrice::new(200.5).is_err());
        assert!(CoursePrice::new(f64::NAN).is_err());
    }
}
