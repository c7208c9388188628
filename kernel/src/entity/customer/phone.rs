use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::entity::bounded_text;
use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct CustomerPhone(String);

impl CustomerPhone {
    pub fn new(phone: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        bounded_text(phone.into(), "A customer phone number", 5, 255).map(Self)
    }
}
