//! Domain aggregates exposed by the customer directory service layer.

pub mod customer;
pub mod query;
pub mod search;
pub mod types;
