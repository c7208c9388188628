mod id;
mod name;

pub use self::{id::*, name::*};
use crate::entity::{Document, Patchable, Slug};
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure)]
pub struct Genre {
    id: GenreId,
    name: GenreName,
    slug: Slug,
}

impl Genre {
    pub fn new(id: GenreId, name: GenreName) -> Self {
        Self {
            id,
            slug: Slug::from_text(name.as_ref()),
            name,
        }
    }
}

impl Document for Genre {
    type Id = GenreId;
    const COLLECTION: &'static str = "genres";

    fn document_id(&self) -> &Self::Id {
        &self.id
    }

    fn unique_keys(&self) -> Vec<String> {
        vec![format!("name:{}", self.name.as_ref().to_lowercase())]
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct GenrePatch {
    pub name: Option<GenreName>,
}

impl Patchable for Genre {
    type Patch = GenrePatch;

    fn patch(&mut self, patch: Self::Patch) -> Vec<&'static str> {
        match patch.name {
            Some(name) => {
                self.slug = Slug::from_text(name.as_ref());
                self.name = name;
                vec!["name", "slug"]
            }
            None => Vec::new(),
        }
    }
}
