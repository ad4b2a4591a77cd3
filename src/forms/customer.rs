use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::customer::{CustomerStatus, NewCustomer, UpdateCustomer};
use crate::domain::types::{CustomerEmail, CustomerName, PhoneNumber};
use crate::forms::FormError;

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Parses an optional status literal exactly as sent (`ACTIVE` / `INACTIVE`).
fn parse_status(raw: Option<&str>) -> Result<Option<CustomerStatus>, FormError> {
    raw.map(|value| {
        value
            .parse::<CustomerStatus>()
            .map_err(|_| FormError::InvalidEnumValue {
                field: "status",
                allowed: CustomerStatus::allowed_values(),
            })
    })
    .transpose()
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Body of `POST /customers`.
pub struct CreateCustomerForm {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "First name is required"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Last name is required"))]
    pub last_name: String,
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "Email is required"),
        email(message = "Email must be a valid email address")
    )]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Accepted for compatibility; new customers always start `ACTIVE`.
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Body of `PUT /customers/{id}`. Email cannot be changed.
pub struct UpdateCustomerForm {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "First name is required"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Last name is required"))]
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(required(message = "Status is required"))]
    pub status: Option<String>,
}

impl TryFrom<CreateCustomerForm> for NewCustomer {
    type Error = FormError;

    fn try_from(form: CreateCustomerForm) -> Result<Self, Self::Error> {
        parse_status(form.status.as_deref())?;
        form.validate()?;

        Ok(NewCustomer::new(
            CustomerName::new(form.first_name)
                .map_err(|_| FormError::field("firstName", "First name is required"))?,
            CustomerName::new(form.last_name)
                .map_err(|_| FormError::field("lastName", "Last name is required"))?,
            CustomerEmail::new(form.email)
                .map_err(|_| FormError::field("email", "Email must be a valid email address"))?,
            PhoneNumber::from_optional(form.phone),
        ))
    }
}

impl TryFrom<UpdateCustomerForm> for UpdateCustomer {
    type Error = FormError;

    fn try_from(form: UpdateCustomerForm) -> Result<Self, Self::Error> {
        let status = parse_status(form.status.as_deref())?;
        form.validate()?;
        let status = status.ok_or_else(|| FormError::field("status", "Status is required"))?;

        Ok(UpdateCustomer::new(
            CustomerName::new(form.first_name)
                .map_err(|_| FormError::field("firstName", "First name is required"))?,
            CustomerName::new(form.last_name)
                .map_err(|_| FormError::field("lastName", "Last name is required"))?,
            PhoneNumber::from_optional(form.phone),
            status,
        ))
    }
}
