//! Error taxonomy shared by every service function.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::domain::query::QueryError;
use crate::repository::errors::RepositoryError;

/// Field name → human readable message, ordered by field name.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// No customer carries the requested id.
    #[error("Customer with id {0} not found")]
    NotFound(String),

    /// Another customer already uses the email.
    #[error("Customer with email {0} already exists")]
    AlreadyExists(String),

    /// One or more fields or query parameters were rejected.
    #[error("Validation Failed")]
    Validation(FieldErrors),

    /// The payload could not be read into the expected shape.
    #[error("{0}")]
    MalformedRequest(String),

    /// Anything unexpected. The detail is for logs only.
    #[error("Internal server error")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        ServiceError::Internal(err.to_string())
    }
}

impl From<Vec<QueryError>> for ServiceError {
    fn from(errors: Vec<QueryError>) -> Self {
        ServiceError::Validation(
            errors
                .iter()
                .map(|err| (err.parameter().to_string(), err.to_string()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_errors_become_field_errors() {
        let err = ServiceError::from(vec![
            QueryError::InvalidPageSize("0".to_string()),
            QueryError::InvalidSortField("score".to_string()),
        ]);
        let ServiceError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        assert_eq!(fields["size"], "Size must be between 1 and 100");
        assert_eq!(fields["sort"], "Unknown sort field: score");
    }

    #[test]
    fn repository_errors_are_internal_and_messages_are_generic() {
        let err = ServiceError::from(RepositoryError::ConnectionError("db down".to_string()));
        assert!(matches!(err, ServiceError::Internal(_)));
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn not_found_message_names_the_id() {
        let err = ServiceError::NotFound("abc".to_string());
        assert_eq!(err.to_string(), "Customer with id abc not found");
    }
}
