use kernel::prelude::entity::{Customer, CustomerId, CustomerName, CustomerPatch, CustomerPhone};
use kernel::KernelError;

use crate::transfer::{DocumentChanges, DocumentDraft};

#[derive(Debug, Clone)]
pub struct CreateCustomerDto {
    pub name: String,
    pub phone: String,
    pub is_gold: Option<bool>,
}

impl DocumentDraft for CreateCustomerDto {
    type Document = Customer;

    fn into_document(self, id: CustomerId) -> error_stack::Result<Customer, KernelError> {
        Ok(Customer::new(
            id,
            CustomerName::new(self.name)?,
            CustomerPhone::new(self.phone)?,
            self.is_gold.unwrap_or(false),
        ))
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateCustomerDto {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub is_gold: Option<bool>,
}

impl DocumentChanges for UpdateCustomerDto {
    type Document = Customer;

    fn into_patch(self) -> error_stack::Result<CustomerPatch, KernelError> {
        Ok(CustomerPatch {
            name: self.name.map(CustomerName::new).transpose()?,
            phone: self.phone.map(CustomerPhone::new).transpose()?,
            is_gold: self.is_gold,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerSummary {
    pub id: uuid::Uuid,
    pub name: String,
    pub is_gold: bool,
    pub phone: String,
}

impl From<&Customer> for CustomerSummary {
    fn from(customer: &Customer) -> Self {
        Self {
            id: *customer.id().as_ref(),
            name: customer.name().as_ref().clone(),
            is_gold: *customer.is_gold(),
            phone: customer.phone().as_ref().clone(),
        }
    }
}
