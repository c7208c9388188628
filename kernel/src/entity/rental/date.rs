use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct DateOut(#[serde(with = "time::serde::rfc3339")] OffsetDateTime);

impl DateOut {
    pub fn new(time: impl Into<OffsetDateTime>) -> Self {
        Self(time.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct DateReturned(#[serde(with = "time::serde::rfc3339")] OffsetDateTime);

impl DateReturned {
    pub fn new(time: impl Into<OffsetDateTime>) -> Self {
        Self(time.into())
    }
}
