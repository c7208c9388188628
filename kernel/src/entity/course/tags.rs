use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::{fail, KernelError};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct CourseTags(Vec<String>);

impl CourseTags {
    pub fn new(tags: impl IntoIterator<Item = String>) -> error_stack::Result<Self, KernelError> {
        let tags = tags
            .into_iter()
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect::<Vec<_>>();
        if tags.is_empty() {
            return Err(fail(
                KernelError::Validation,
                "A course should have at least one tag!",
            ));
        }
        Ok(Self(tags))
    }
}
