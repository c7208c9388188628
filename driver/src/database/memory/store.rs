use std::cmp::Ordering;
use std::collections::HashMap;

use serde_json::{Map, Value};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::descriptor::{FieldName, QueryDescriptor, SortDirection};
use kernel::prelude::entity::Document;
use kernel::{fail, KernelError};

use crate::error::ConvertError;

#[derive(Default)]
pub(in crate::database) struct Collections {
    collections: HashMap<&'static str, Collection>,
    sequence: u64,
}

#[derive(Default)]
pub(in crate::database) struct Collection {
    documents: HashMap<Uuid, StoredDocument>,
}

pub(in crate::database) struct StoredDocument {
    body: Value,
    unique_keys: Vec<String>,
    created_at: OffsetDateTime,
    sequence: u64,
}

impl StoredDocument {
    pub fn decode<E: Document>(&self) -> error_stack::Result<E, KernelError> {
        serde_json::from_value(self.body.clone()).convert_error()
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// The body as seen by filters, with the storage creation time added.
    fn view(&self) -> Value {
        let mut view = self.body.clone();
        if let (Value::Object(map), Ok(created_at)) = (&mut view, self.created_at.format(&Rfc3339))
        {
            map.insert(FieldName::CREATED_AT.to_string(), Value::String(created_at));
        }
        view
    }
}

impl Collections {
    pub fn collection<E: Document>(&self) -> Option<&Collection> {
        self.collections.get(E::COLLECTION)
    }

    pub fn get<E: Document>(&self, id: &E::Id) -> Option<&StoredDocument> {
        self.collection::<E>()?.documents.get(id.as_ref())
    }

    pub fn insert<E: Document>(&mut self, document: &E) -> error_stack::Result<(), KernelError> {
        let body = serde_json::to_value(document).convert_error()?;
        let unique_keys = document.unique_keys();
        let id = *document.document_id().as_ref();

        self.sequence += 1;
        let sequence = self.sequence;
        let collection = self.collections.entry(E::COLLECTION).or_default();
        if collection.documents.contains_key(&id) || collection.holds_any(&unique_keys, &id) {
            return Err(fail(KernelError::Conflict, "duplicate document"));
        }
        collection.documents.insert(
            id,
            StoredDocument {
                body,
                unique_keys,
                created_at: OffsetDateTime::now_utc(),
                sequence,
            },
        );
        Ok(())
    }

    /// Replaces the body of an existing document, keeping its metadata.
    pub fn replace<E: Document>(&mut self, document: &E) -> error_stack::Result<bool, KernelError> {
        let body = serde_json::to_value(document).convert_error()?;
        let unique_keys = document.unique_keys();
        let id = *document.document_id().as_ref();
        self.store_body::<E>(&id, body, unique_keys)
    }

    /// Overwrites the given top-level fields of a stored body. The merged
    /// body must still decode as `E`.
    pub fn merge<E: Document>(
        &mut self,
        id: &E::Id,
        fields: &Map<String, Value>,
    ) -> error_stack::Result<bool, KernelError> {
        let Some(stored) = self.get::<E>(id) else {
            return Ok(false);
        };
        let mut body = stored.body.clone();
        let Value::Object(map) = &mut body else {
            return Err(fail(KernelError::Internal, "stored body is not an object"));
        };
        map.extend(fields.iter().map(|(key, value)| (key.clone(), value.clone())));
        let merged = serde_json::from_value::<E>(body.clone()).map_err(|e| {
            fail(KernelError::Validation, format!("invalid update: {e}"))
        })?;
        self.store_body::<E>(id.as_ref(), body, merged.unique_keys())
    }

    fn store_body<E: Document>(
        &mut self,
        id: &Uuid,
        body: Value,
        unique_keys: Vec<String>,
    ) -> error_stack::Result<bool, KernelError> {
        let Some(collection) = self.collections.get_mut(E::COLLECTION) else {
            return Ok(false);
        };
        if collection.holds_any(&unique_keys, id) {
            return Err(fail(KernelError::Conflict, "duplicate document"));
        }
        match collection.documents.get_mut(id) {
            Some(stored) => {
                stored.body = body;
                stored.unique_keys = unique_keys;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn remove<E: Document>(&mut self, id: &E::Id) -> bool {
        self.collections
            .get_mut(E::COLLECTION)
            .and_then(|collection| collection.documents.remove(id.as_ref()))
            .is_some()
    }

    /// Loads a document, lets `change` edit it and stores it again if
    /// `change` returns `true`. `None` when the document does not exist.
    pub fn modify<E, F>(&mut self, id: &E::Id, change: F) -> error_stack::Result<Option<bool>, KernelError>
    where
        E: Document,
        F: FnOnce(&mut E) -> bool,
    {
        let Some(stored) = self.get::<E>(id) else {
            return Ok(None);
        };
        let mut document = stored.decode::<E>()?;
        if !change(&mut document) {
            return Ok(Some(false));
        }
        self.replace(&document).map(Some)
    }

    pub fn find_many<E: Document>(
        &self,
        descriptor: &QueryDescriptor,
    ) -> error_stack::Result<Vec<E>, KernelError> {
        let Some(collection) = self.collection::<E>() else {
            return Ok(Vec::new());
        };
        let mut matching = collection
            .documents
            .values()
            .map(|stored| (stored, stored.view()))
            .filter(|(_, view)| descriptor.matches(view))
            .collect::<Vec<_>>();

        matching.sort_by(|(left, left_view), (right, right_view)| {
            descriptor
                .sort()
                .iter()
                .map(|key| {
                    let ordering = if key.field().is_created_at() {
                        left.created_at
                            .cmp(&right.created_at)
                            .then(left.sequence.cmp(&right.sequence))
                    } else {
                        compare_fields(
                            left_view.get(key.field().as_ref().as_str()),
                            right_view.get(key.field().as_ref().as_str()),
                        )
                    };
                    match key.direction() {
                        SortDirection::Ascending => ordering,
                        SortDirection::Descending => ordering.reverse(),
                    }
                })
                .find(|ordering| ordering.is_ne())
                .unwrap_or_else(|| left.sequence.cmp(&right.sequence))
        });

        matching
            .into_iter()
            .skip(usize::try_from(descriptor.skip()).unwrap_or(usize::MAX))
            .take(usize::try_from(descriptor.take()).unwrap_or(usize::MAX))
            .map(|(stored, _)| stored.decode::<E>())
            .collect()
    }
}

impl Collection {
    pub fn documents(&self) -> impl Iterator<Item = &StoredDocument> {
        self.documents.values()
    }

    fn holds_any(&self, keys: &[String], except: &Uuid) -> bool {
        if keys.is_empty() {
            return false;
        }
        self.documents.iter().any(|(id, stored)| {
            id != except && stored.unique_keys.iter().any(|held| keys.contains(held))
        })
    }
}

/// Missing values sort first, then values by JSON type, then by value.
fn compare_fields(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    fn rank(value: Option<&Value>) -> u8 {
        match value {
            None | Some(Value::Null) => 0,
            Some(Value::String(_)) => 1,
            Some(Value::Number(_)) => 2,
            Some(Value::Bool(_)) => 3,
            Some(Value::Array(_)) => 4,
            Some(Value::Object(_)) => 5,
        }
    }
    match (left, right) {
        (Some(Value::String(left)), Some(Value::String(right))) => left.cmp(right),
        (Some(Value::Number(left)), Some(Value::Number(right))) => left
            .as_f64()
            .zip(right.as_f64())
            .and_then(|(left, right)| left.partial_cmp(&right))
            .unwrap_or(Ordering::Equal),
        (Some(Value::Bool(left)), Some(Value::Bool(right))) => left.cmp(right),
        _ => rank(left).cmp(&rank(right)),
    }
}
