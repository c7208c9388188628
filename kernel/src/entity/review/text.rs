use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::entity::bounded_text;
use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct ReviewText(String);

impl ReviewText {
    pub fn new(review: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        bounded_text(review.into(), "A review", 1, 4096).map(Self)
    }
}
