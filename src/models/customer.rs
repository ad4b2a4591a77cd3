use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::customer::Customer as DomainCustomer;
use crate::domain::types::{
    CustomerEmail, CustomerName, PhoneNumber, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::customers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::customer::Customer`].
pub struct Customer {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::customers)]
/// Insertable form of [`Customer`].
pub struct NewCustomer<'a> {
    pub id: String,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub status: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::customers)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`Customer`] record.
pub struct UpdateCustomer<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub phone: Option<&'a str>,
    pub status: &'a str,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Customer> for DomainCustomer {
    type Error = TypeConstraintError;

    fn try_from(customer: Customer) -> Result<Self, Self::Error> {
        Ok(Self {
            id: customer.id.parse()?,
            first_name: CustomerName::new(customer.first_name)?,
            last_name: CustomerName::new(customer.last_name)?,
            email: CustomerEmail::new(customer.email)?,
            phone: PhoneNumber::from_optional(customer.phone),
            status: customer.status.parse()?,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        })
    }
}

impl<'a> From<&'a DomainCustomer> for NewCustomer<'a> {
    fn from(customer: &'a DomainCustomer) -> Self {
        Self {
            id: customer.id.to_string(),
            first_name: customer.first_name.as_str(),
            last_name: customer.last_name.as_str(),
            email: customer.email.as_str(),
            phone: customer.phone.as_ref().map(PhoneNumber::as_str),
            status: customer.status.as_str(),
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        }
    }
}

impl<'a> From<&'a DomainCustomer> for UpdateCustomer<'a> {
    fn from(customer: &'a DomainCustomer) -> Self {
        Self {
            first_name: customer.first_name.as_str(),
            last_name: customer.last_name.as_str(),
            phone: customer.phone.as_ref().map(PhoneNumber::as_str),
            status: customer.status.as_str(),
            updated_at: customer.updated_at,
        }
    }
}
