use serde_json::{Map, Value};

use crate::descriptor::FieldName;
use crate::{fail, KernelError};

/// Which fields of each document make it into the result.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub enum Projection {
    #[default]
    All,
    Include(Vec<FieldName>),
    Exclude(Vec<FieldName>),
}

impl Projection {
    /// `title,numberInStock` keeps only those fields, `-slug,-genre` drops
    /// them. Mixing both forms is rejected.
    pub fn parse(raw: &str) -> error_stack::Result<Self, KernelError> {
        let entries = raw
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .collect::<Vec<_>>();
        if entries.is_empty() {
            return Ok(Self::All);
        }
        let excluded = entries.iter().filter(|entry| entry.starts_with('-')).count();
        if excluded == entries.len() {
            let fields = entries
                .into_iter()
                .map(|entry| FieldName::new(entry.trim_start_matches('-')))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Self::Exclude(fields));
        }
        if excluded > 0 {
            return Err(fail(
                KernelError::Validation,
                "fields cannot mix inclusion and exclusion",
            ));
        }
        let fields = entries
            .into_iter()
            .map(FieldName::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::Include(fields))
    }

    pub fn apply(&self, document: Map<String, Value>) -> Map<String, Value> {
        match self {
            Self::All => document,
            Self::Include(fields) => document
                .into_iter()
                .filter(|(key, _)| {
                    key == FieldName::ID || fields.iter().any(|field| field.as_ref() == key)
                })
                .collect(),
            Self::Exclude(fields) => document
                .into_iter()
                .filter(|(key, _)| !fields.iter().any(|field| field.as_ref() == key))
                .collect(),
        }
    }
}
