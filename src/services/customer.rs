//! Customer directory operations.
//!
//! Every function receives the repository explicitly, validates its input
//! once before touching the store and maps store failures into
//! [`ServiceError`].

use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::query::ListParams;
use crate::domain::types::CustomerId;
use crate::dto::customer::CustomerPageResponse;
use crate::forms::customer::{CreateCustomerForm, UpdateCustomerForm};
use crate::repository::errors::RepositoryError;
use crate::repository::{CustomerReader, CustomerWriter};
use crate::services::{ServiceError, ServiceResult};

/// Parses a path id. An id that cannot be parsed cannot exist either.
fn parse_id(raw: &str) -> ServiceResult<CustomerId> {
    raw.parse()
        .map_err(|_| ServiceError::NotFound(raw.to_string()))
}

/// Creates a customer after checking that the email is free.
pub fn create_customer<R>(repo: &R, form: CreateCustomerForm) -> ServiceResult<Customer>
where
    R: CustomerReader + CustomerWriter + ?Sized,
{
    let new_customer = NewCustomer::try_from(form)?;
    let email = new_customer.email.to_string();

    let existing = repo
        .get_customer_by_email(&new_customer.email)
        .map_err(|err| {
            log::error!("Failed to look up customer by email: {err}");
            ServiceError::from(err)
        })?;
    if existing.is_some() {
        return Err(ServiceError::AlreadyExists(email));
    }

    match repo.create_customer(&new_customer) {
        Ok(customer) => {
            log::info!("Created customer {}", customer.id);
            Ok(customer)
        }
        // Lost a race with a concurrent create of the same email.
        Err(RepositoryError::Duplicate(_)) => Err(ServiceError::AlreadyExists(email)),
        Err(err) => {
            log::error!("Failed to create customer: {err}");
            Err(err.into())
        }
    }
}

/// Fetches a single customer.
pub fn get_customer<R>(repo: &R, id: &str) -> ServiceResult<Customer>
where
    R: CustomerReader + ?Sized,
{
    let customer_id = parse_id(id)?;

    repo.get_customer_by_id(customer_id)
        .map_err(|err| {
            log::error!("Failed to get customer {customer_id}: {err}");
            ServiceError::from(err)
        })?
        .ok_or_else(|| ServiceError::NotFound(id.to_string()))
}

/// Overwrites names, phone and status. Email, id and creation time never change.
pub fn update_customer<R>(repo: &R, id: &str, form: UpdateCustomerForm) -> ServiceResult<Customer>
where
    R: CustomerWriter + ?Sized,
{
    let updates = UpdateCustomer::try_from(form)?;
    let customer_id = parse_id(id)?;

    match repo.update_customer(customer_id, &updates) {
        Ok(customer) => {
            log::info!("Updated customer {customer_id}");
            Ok(customer)
        }
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound(id.to_string())),
        Err(err) => {
            log::error!("Failed to update customer {customer_id}: {err}");
            Err(err.into())
        }
    }
}

/// Removes a customer. Deleting an absent customer reports `NotFound`.
pub fn delete_customer<R>(repo: &R, id: &str) -> ServiceResult<()>
where
    R: CustomerWriter + ?Sized,
{
    let customer_id = parse_id(id)?;

    match repo.delete_customer(customer_id) {
        Ok(()) => {
            log::info!("Deleted customer {customer_id}");
            Ok(())
        }
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound(id.to_string())),
        Err(err) => {
            log::error!("Failed to delete customer {customer_id}: {err}");
            Err(err.into())
        }
    }
}

/// Normalizes the listing parameters and returns one page of customers.
pub fn list_customers<R>(repo: &R, params: &ListParams) -> ServiceResult<CustomerPageResponse>
where
    R: CustomerReader + ?Sized,
{
    let query = params.normalize()?;
    let pagination = query.pagination;

    let (total, customers) = repo.list_customers(query).map_err(|err| {
        log::error!("Failed to list customers: {err}");
        ServiceError::from(err)
    })?;

    Ok(CustomerPageResponse::new(customers, pagination, total))
}
