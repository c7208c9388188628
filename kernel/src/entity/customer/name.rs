use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::entity::bounded_text;
use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct CustomerName(String);

impl CustomerName {
    pub fn new(name: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        bounded_text(name.into(), "A customer name", 3, 255).map(Self)
    }
}
