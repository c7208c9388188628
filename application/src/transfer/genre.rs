use kernel::prelude::entity::{Genre, GenreId, GenreName, GenrePatch};
use kernel::KernelError;

use crate::transfer::{DocumentChanges, DocumentDraft};

#[derive(Debug, Clone)]
pub struct CreateGenreDto {
    pub name: String,
}

impl DocumentDraft for CreateGenreDto {
    type Document = Genre;

    fn into_document(self, id: GenreId) -> error_stack::Result<Genre, KernelError> {
        Ok(Genre::new(id, GenreName::new(self.name)?))
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateGenreDto {
    pub name: Option<String>,
}

impl DocumentChanges for UpdateGenreDto {
    type Document = Genre;

    fn into_patch(self) -> error_stack::Result<GenrePatch, KernelError> {
        Ok(GenrePatch {
            name: self.name.map(GenreName::new).transpose()?,
        })
    }
}
