mod id;
mod name;
mod phone;

pub use self::{id::*, name::*, phone::*};
use crate::entity::{Document, Patchable};
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    id: CustomerId,
    name: CustomerName,
    phone: CustomerPhone,
    is_gold: bool,
}

impl Customer {
    pub fn new(id: CustomerId, name: CustomerName, phone: CustomerPhone, is_gold: bool) -> Self {
        Self {
            id,
            name,
            phone,
            is_gold,
        }
    }
}

impl Document for Customer {
    type Id = CustomerId;
    const COLLECTION: &'static str = "customers";

    fn document_id(&self) -> &Self::Id {
        &self.id
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct CustomerPatch {
    pub name: Option<CustomerName>,
    pub phone: Option<CustomerPhone>,
    pub is_gold: Option<bool>,
}

impl Patchable for Customer {
    type Patch = CustomerPatch;

    fn patch(&mut self, patch: Self::Patch) -> Vec<&'static str> {
        let mut written = Vec::new();
        if let Some(name) = patch.name {
            self.name = name;
            written.push("name");
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
            written.push("phone");
        }
        if let Some(is_gold) = patch.is_gold {
            self.is_gold = is_gold;
            written.push("isGold");
        }
        written
    }
}
