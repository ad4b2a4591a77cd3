//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., parseable identifiers,
//! validated email, trimmed non-empty names) so that once a value reaches the
//! domain layer it can be treated as trusted.
use std::{ops::Deref, str::FromStr};

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use uuid::Uuid;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Provided uuid failed format validation.
    #[error("invalid uuid value")]
    InvalidUuid,
}

/// Opaque identifier of a customer record.
///
/// Generated once when the record is inserted and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(Uuid);

impl CustomerId {
    /// Generate a new random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CustomerId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for CustomerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CustomerId {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(
            Uuid::parse_str(s.trim()).map_err(|_| TypeConstraintError::InvalidUuid)?,
        ))
    }
}

impl TryFrom<String> for CustomerId {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Trimmed and validated email address.
///
/// Case is preserved: two addresses differing only in case are distinct.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CustomerEmail(String);

impl CustomerEmail {
    /// Validates and trims an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let trimmed = email.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        if !trimmed.validate_email() {
            return Err(TypeConstraintError::InvalidEmail);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the email as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for CustomerEmail {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CustomerEmail {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for CustomerEmail {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CustomerEmail> for String {
    fn from(value: CustomerEmail) -> Self {
        value.0
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = value.into().trim().to_string();
                if trimmed.is_empty() {
                    return Err(TypeConstraintError::EmptyString);
                }
                Ok(Self(trimmed))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(
    CustomerName,
    "First or last name of a customer, trimmed and non-empty."
);

non_empty_string_newtype!(
    PhoneNumber,
    "Free-form contact phone, trimmed and non-empty."
);

impl PhoneNumber {
    /// Maps an optional raw phone into an optional wrapper, treating blank input as absent.
    pub fn from_optional(value: Option<String>) -> Option<Self> {
        value.and_then(|raw| Self::new(raw).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_email_trims_but_keeps_case() {
        let email = CustomerEmail::new("  Jo@X.com ").unwrap();
        assert_eq!(email.as_str(), "Jo@X.com");
    }

    #[test]
    fn customer_email_rejects_bad_shapes() {
        assert_eq!(
            CustomerEmail::new("not-an-email"),
            Err(TypeConstraintError::InvalidEmail)
        );
        assert_eq!(
            CustomerEmail::new("   "),
            Err(TypeConstraintError::EmptyString)
        );
    }

    #[test]
    fn customer_name_rejects_blank() {
        assert!(CustomerName::new("  ").is_err());
        assert_eq!(CustomerName::new(" Jo ").unwrap().as_str(), "Jo");
    }

    #[test]
    fn blank_phone_becomes_absent() {
        assert_eq!(PhoneNumber::from_optional(Some("   ".to_string())), None);
        assert_eq!(PhoneNumber::from_optional(None), None);
        assert_eq!(
            PhoneNumber::from_optional(Some(" +1 555 ".to_string()))
                .unwrap()
                .as_str(),
            "+1 555"
        );
    }

    #[test]
    fn customer_id_round_trips_through_text() {
        let id = CustomerId::new();
        let parsed: CustomerId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert_eq!(
            "not-a-uuid".parse::<CustomerId>(),
            Err(TypeConstraintError::InvalidUuid)
        );
    }
}
