pub mod customer;
pub mod errors;

pub use errors::{FieldErrors, ServiceError, ServiceResult};
