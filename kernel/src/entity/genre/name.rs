use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::entity::bounded_text;
use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct GenreName(String);

impl GenreName {
    pub fn new(name: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        bounded_text(name.into(), "A genre name", 5, 50).map(Self)
    }
}
