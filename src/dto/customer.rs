//! Response shapes returned by the customer endpoints.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::customer::{Customer, CustomerStatus};
use crate::domain::query::Pagination;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: CustomerStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id.to_string(),
            first_name: customer.first_name.into_inner(),
            last_name: customer.last_name.into_inner(),
            email: customer.email.into_inner(),
            phone: customer.phone.map(|phone| phone.into_inner()),
            status: customer.status,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        }
    }
}

/// Page envelope for customer listings. `page` is zero-based.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPageResponse {
    pub content: Vec<CustomerResponse>,
    pub page: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
    pub is_first: bool,
    pub is_last: bool,
}

impl CustomerPageResponse {
    pub fn new(customers: Vec<Customer>, pagination: Pagination, total_elements: usize) -> Self {
        let total_pages = total_elements.div_ceil(pagination.size.max(1));

        Self {
            content: customers.into_iter().map(Into::into).collect(),
            page: pagination.page,
            size: pagination.size,
            total_elements,
            total_pages,
            is_first: pagination.page == 0,
            is_last: pagination.page >= total_pages.saturating_sub(1),
        }
    }
}
