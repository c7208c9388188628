use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::entity::bounded_text;
use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct MovieTitle(String);

impl MovieTitle {
    pub fn new(title: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        bounded_text(title.into(), "A movie title", 5, 255).map(Self)
    }
}
