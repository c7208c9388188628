use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::entity::bounded_text;
use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct CourseName(String);

impl CourseName {
    pub fn new(name: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        bounded_text(name.into(), "A course name", 5, 255).map(Self)
    }
}
