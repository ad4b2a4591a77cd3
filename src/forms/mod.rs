//! Request payloads accepted by the customer routes.

use thiserror::Error;
use validator::ValidationErrors;

use crate::services::{FieldErrors, ServiceError};

pub mod customer;

#[derive(Debug, Error, PartialEq, Eq)]
/// Errors that can occur when processing request payloads.
pub enum FormError {
    #[error("validation errors: {0:?}")]
    Validation(FieldErrors),

    #[error("Invalid value for field '{field}'. Allowed values: {allowed}")]
    InvalidEnumValue { field: &'static str, allowed: String },
}

impl FormError {
    /// Single-field validation failure.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        FormError::Validation(FieldErrors::from([(field.to_string(), message.into())]))
    }
}

impl From<ValidationErrors> for FormError {
    fn from(errors: ValidationErrors) -> Self {
        FormError::Validation(flatten_errors(&errors))
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::Validation(fields) => ServiceError::Validation(fields),
            other @ FormError::InvalidEnumValue { .. } => {
                ServiceError::MalformedRequest(other.to_string())
            }
        }
    }
}

/// Keeps the first message reported for each field, keyed by its camelCase name.
pub fn flatten_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let message = errs
                .first()
                .and_then(|err| err.message.as_ref())
                .map(ToString::to_string)
                .unwrap_or_else(|| "is invalid".to_string());
            (camel_case(&field), message)
        })
        .collect()
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}
