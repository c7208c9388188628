use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::entity::bounded_number;
use crate::KernelError;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct Rating(i32);

impl Rating {
    pub fn new(rating: impl Into<i32>) -> error_stack::Result<Self, KernelError> {
        bounded_number(rating.into(), "Rating", 1, 5).map(Self)
    }
}
