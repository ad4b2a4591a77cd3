//! Persistence boundary of the customer directory.
//!
//! Services depend on the [`CustomerReader`] and [`CustomerWriter`] traits;
//! [`DieselRepository`] implements them on top of a pooled SQLite database.

use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        customer::{Customer, NewCustomer, UpdateCustomer},
        query::CustomerListQuery,
        types::{CustomerEmail, CustomerId},
    },
    repository::errors::RepositoryResult,
};

pub mod customer;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;

/// Diesel-backed repository shared by every request handler.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

pub trait CustomerReader {
    fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>>;
    fn get_customer_by_email(&self, email: &CustomerEmail) -> RepositoryResult<Option<Customer>>;
    /// Returns the number of matching records and the requested window of them.
    fn list_customers(&self, query: CustomerListQuery) -> RepositoryResult<(usize, Vec<Customer>)>;
}

pub trait CustomerWriter {
    /// Inserts a record with a fresh id, `ACTIVE` status and equal timestamps.
    ///
    /// Fails with [`errors::RepositoryError::Duplicate`] when the email is taken.
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
    /// Fails with [`errors::RepositoryError::NotFound`] when the record is absent.
    fn update_customer(&self, id: CustomerId, updates: &UpdateCustomer)
    -> RepositoryResult<Customer>;
    /// Fails with [`errors::RepositoryError::NotFound`] when nothing was removed.
    fn delete_customer(&self, id: CustomerId) -> RepositoryResult<()>;
}
