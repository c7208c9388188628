use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

pub trait DocumentId: 'static + Clone + Sync + Send + AsRef<Uuid> {
    fn from_uuid(id: Uuid) -> Self;
}

/// An entity stored as a self-describing document in its own collection.
///
/// The serialized form is the stored body, so field names seen by filters
/// and projections are the serde names of the entity.
pub trait Document: 'static + Clone + Sync + Send + Unpin + Serialize + DeserializeOwned {
    type Id: DocumentId;
    const COLLECTION: &'static str;

    fn document_id(&self) -> &Self::Id;

    /// Keys that must be unique among the documents of the collection.
    /// Each key carries its own prefix, so keys of different fields never
    /// collide.
    fn unique_keys(&self) -> Vec<String> {
        Vec::new()
    }
}

pub trait Patchable: Document {
    type Patch: 'static + Sync + Send;

    /// Applies the patch and returns the body fields it wrote. Only those
    /// fields are written back to storage.
    fn patch(&mut self, patch: Self::Patch) -> Vec<&'static str>;
}
