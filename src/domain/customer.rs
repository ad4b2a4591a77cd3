use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CustomerEmail, CustomerId, CustomerName, PhoneNumber, TypeConstraintError,
};

/// Activity flag of a customer. Any value may be replaced by any other.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum CustomerStatus {
    #[default]
    Active,
    Inactive,
}

impl CustomerStatus {
    /// All variants in declaration order.
    pub const ALL: [CustomerStatus; 2] = [CustomerStatus::Active, CustomerStatus::Inactive];

    pub const fn as_str(self) -> &'static str {
        match self {
            CustomerStatus::Active => "ACTIVE",
            CustomerStatus::Inactive => "INACTIVE",
        }
    }

    /// Comma-separated list of the accepted literals.
    pub fn allowed_values() -> String {
        Self::ALL
            .iter()
            .map(|status| status.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Display for CustomerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomerStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(CustomerStatus::Active),
            "INACTIVE" => Ok(CustomerStatus::Inactive),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: CustomerName,
    pub last_name: CustomerName,
    pub email: CustomerEmail,
    pub phone: Option<PhoneNumber>,
    pub status: CustomerStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a customer. Identity, status and timestamps are
/// assigned by the store.
#[derive(Clone, Debug, PartialEq)]
pub struct NewCustomer {
    pub first_name: CustomerName,
    pub last_name: CustomerName,
    pub email: CustomerEmail,
    pub phone: Option<PhoneNumber>,
}

impl NewCustomer {
    #[must_use]
    pub fn new(
        first_name: CustomerName,
        last_name: CustomerName,
        email: CustomerEmail,
        phone: Option<PhoneNumber>,
    ) -> Self {
        Self {
            first_name,
            last_name,
            email,
            phone,
        }
    }

    /// Materializes the record the store persists.
    pub fn into_customer(self, id: CustomerId, now: NaiveDateTime) -> Customer {
        Customer {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            status: CustomerStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Mutable subset of a customer. Email, id and creation time are not here.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateCustomer {
    pub first_name: CustomerName,
    pub last_name: CustomerName,
    pub phone: Option<PhoneNumber>,
    pub status: CustomerStatus,
}

impl UpdateCustomer {
    #[must_use]
    pub fn new(
        first_name: CustomerName,
        last_name: CustomerName,
        phone: Option<PhoneNumber>,
        status: CustomerStatus,
    ) -> Self {
        Self {
            first_name,
            last_name,
            phone,
            status,
        }
    }

    /// Applies the changes to `customer`, never moving `updated_at` backwards.
    pub fn apply(&self, customer: &mut Customer, now: NaiveDateTime) {
        customer.first_name = self.first_name.clone();
        customer.last_name = self.last_name.clone();
        customer.phone = self.phone.clone();
        customer.status = self.status;
        customer.updated_at = now.max(customer.updated_at);
    }
}
