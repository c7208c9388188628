use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::entity::bounded_number;
use crate::KernelError;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
#[serde(try_from = "i32")]
pub struct NumberInStock(i32);

impl NumberInStock {
    pub const MAX: i32 = 255;

    pub fn new(amount: impl Into<i32>) -> error_stack::Result<Self, KernelError> {
        bounded_number(amount.into(), "Number in stock", 0, Self::MAX).map(Self)
    }

    pub fn is_empty(&self) -> bool {
        self.0 <= 0
    }

    pub fn decremented(&self) -> Option<Self> {
        (self.0 > 0).then(|| Self(self.0 - 1))
    }

    pub fn incremented(&self) -> Option<Self> {
        (self.0 < Self::MAX).then(|| Self(self.0 + 1))
    }
}

impl TryFrom<i32> for NumberInStock {
    type Error = error_stack::Report<KernelError>;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
