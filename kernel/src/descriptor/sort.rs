use vodca::References;

use crate::descriptor::FieldName;
use crate::KernelError;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Eq, PartialEq, Hash, References)]
pub struct SortKey {
    field: FieldName,
    direction: SortDirection,
}

impl SortKey {
    pub fn new(field: FieldName, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn newest_first() -> Self {
        Self::new(FieldName::created_at(), SortDirection::Descending)
    }

    /// Parses `title,-price` style lists. Blank entries are skipped.
    pub fn parse_list(raw: &str) -> error_stack::Result<Vec<Self>, KernelError> {
        raw.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| match entry.strip_prefix('-') {
                Some(field) => Ok(Self::new(FieldName::new(field)?, SortDirection::Descending)),
                None => Ok(Self::new(FieldName::new(entry)?, SortDirection::Ascending)),
            })
            .collect()
    }
}
