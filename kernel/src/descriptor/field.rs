use std::fmt::Display;

use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::{fail, KernelError};

/// Name of a document field, restricted to plain identifiers so it can
/// never smuggle an operator or a path into a backend query.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Fromln, AsRefln)]
pub struct FieldName(String);

impl FieldName {
    pub const CREATED_AT: &'static str = "createdAt";
    pub const ID: &'static str = "id";

    pub fn new(name: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let name = name.into();
        let mut chars = name.chars();
        let valid = match chars.next() {
            Some(first) => {
                (first.is_ascii_alphabetic() || first == '_')
                    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            None => false,
        };
        if !valid {
            return Err(fail(
                KernelError::Validation,
                format!("invalid field name `{name}`"),
            ));
        }
        Ok(Self(name))
    }

    pub fn created_at() -> Self {
        Self(Self::CREATED_AT.to_string())
    }

    /// Creation time is storage metadata rather than part of the body.
    pub fn is_created_at(&self) -> bool {
        self.0 == Self::CREATED_AT
    }
}

impl Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod test {
    use super::FieldName;

    #[test]
    fn accepts_identifiers_only() {
        assert!(FieldName::new("numberInStock").is_ok());
        assert!(FieldName::new("_private").is_ok());
        assert!(FieldName::new("").is_err());
        assert!(FieldName::new("$where").is_err());
        assert!(FieldName::new("movie.title").is_err());
        assert!(FieldName::new("1st").is_err());
    }
}
