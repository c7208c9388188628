use std::fmt::Display;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vodca::{AsRefln, Fromln};

use crate::entity::DocumentId;

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Fromln, AsRefln)]
pub struct GenreId(Uuid);

impl GenreId {
    pub fn new(id: impl Into<Uuid>) -> Self {
        Self(id.into())
    }
}

impl DocumentId for GenreId {
    fn from_uuid(id: Uuid) -> Self {
        Self::new(id)
    }
}

impl Display for GenreId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
