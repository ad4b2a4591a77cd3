//! Listing query descriptor and the normalization of raw listing parameters.
//!
//! Raw `page`, `size`, `sort`, `order` and `search` values arrive as loosely
//! typed strings and integers. [`ListParams::normalize`] turns them into a
//! [`CustomerListQuery`] or into the full list of [`QueryError`]s, so the same
//! raw input always yields the same descriptor or the same failures.

use std::fmt::Display;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::search::CustomerSearch;

pub const DEFAULT_PAGE: i64 = 0;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Customer attribute used to order listings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CustomerSortField {
    FirstName,
    LastName,
    Email,
    #[default]
    CreatedAt,
}

impl CustomerSortField {
    pub const ALL: [CustomerSortField; 4] = [
        CustomerSortField::FirstName,
        CustomerSortField::LastName,
        CustomerSortField::Email,
        CustomerSortField::CreatedAt,
    ];

    /// Public (camelCase) field name.
    pub const fn field(self) -> &'static str {
        match self {
            CustomerSortField::FirstName => "firstName",
            CustomerSortField::LastName => "lastName",
            CustomerSortField::Email => "email",
            CustomerSortField::CreatedAt => "createdAt",
        }
    }

    /// Resolves user input such as `first_name`, `FirstName` or `firstname`.
    ///
    /// Blank input selects [`CustomerSortField::CreatedAt`].
    pub fn normalize(raw: Option<&str>) -> Result<Self, QueryError> {
        let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
            return Ok(Self::default());
        };

        let wanted = fold(raw);
        Self::ALL
            .into_iter()
            .find(|field| fold(field.field()) == wanted)
            .ok_or_else(|| QueryError::InvalidSortField(raw.to_string()))
    }
}

impl Display for CustomerSortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.field())
    }
}

fn fold(value: &str) -> String {
    value.trim().replace('_', "").to_lowercase()
}

/// Ordering direction of a listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    /// Case-insensitive match on `ASC`/`DESC`; blank input selects `ASC`.
    pub fn normalize(raw: Option<&str>) -> Result<Self, QueryError> {
        let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
            return Ok(Self::default());
        };

        match raw.trim().to_uppercase().as_str() {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            _ => Err(QueryError::InvalidSortDirection(raw.to_string())),
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected listing parameter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Page index must be >= 0")]
    InvalidPage(String),
    #[error("Size must be between 1 and 100")]
    InvalidPageSize(String),
    #[error("Unknown sort field: {0}")]
    InvalidSortField(String),
    #[error("Unknown sort direction: {0}")]
    InvalidSortDirection(String),
}

impl QueryError {
    /// Name of the query parameter the error refers to.
    pub const fn parameter(&self) -> &'static str {
        match self {
            QueryError::InvalidPage(_) => "page",
            QueryError::InvalidPageSize(_) => "size",
            QueryError::InvalidSortField(_) => "sort",
            QueryError::InvalidSortDirection(_) => "order",
        }
    }

}

/// Validated page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub size: usize,
}

impl Pagination {
    /// Checks `page >= 0` and `1 <= size <= 100`, reporting every violation.
    pub fn new(page: i64, size: i64) -> Result<Self, Vec<QueryError>> {
        let page = usize::try_from(page).map_err(|_| QueryError::InvalidPage(page.to_string()));
        let size = usize::try_from(size)
            .ok()
            .filter(|size| (1..=MAX_PAGE_SIZE as usize).contains(size))
            .ok_or_else(|| QueryError::InvalidPageSize(size.to_string()));

        match (page, size) {
            (Ok(page), Ok(size)) => Ok(Self { page, size }),
            (page, size) => Err(page.err().into_iter().chain(size.err()).collect()),
        }
    }

    /// Parses raw `page`/`size` strings; blank or absent values take the defaults.
    pub fn parse(page: Option<&str>, size: Option<&str>) -> Result<Self, Vec<QueryError>> {
        let page = parse_number(page, DEFAULT_PAGE, QueryError::InvalidPage);
        let size = parse_number(size, DEFAULT_PAGE_SIZE, QueryError::InvalidPageSize);

        match (page, size) {
            (Ok(page), Ok(size)) => Self::new(page, size),
            (page, size) => Err(page.err().into_iter().chain(size.err()).collect()),
        }
    }

    /// Number of rows to skip, or `None` when `page * size` does not fit the
    /// store's signed 64-bit offset. Such a window is always empty.
    pub fn offset(&self) -> Option<i64> {
        self.page
            .checked_mul(self.size)
            .and_then(|offset| i64::try_from(offset).ok())
    }
}

fn parse_number(
    raw: Option<&str>,
    default: i64,
    error: fn(String) -> QueryError,
) -> Result<i64, QueryError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| error(value.to_string())),
    }
}

/// Canonical query descriptor consumed by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerListQuery {
    pub pagination: Pagination,
    pub sort_field: CustomerSortField,
    pub sort_direction: SortDirection,
    pub search: Option<CustomerSearch>,
}

impl CustomerListQuery {
    pub fn new(pagination: Pagination) -> Self {
        Self {
            pagination,
            sort_field: CustomerSortField::default(),
            sort_direction: SortDirection::default(),
            search: None,
        }
    }

    pub fn sort(mut self, field: CustomerSortField, direction: SortDirection) -> Self {
        self.sort_field = field;
        self.sort_direction = direction;
        self
    }

    pub fn search(mut self, search: Option<CustomerSearch>) -> Self {
        self.search = search;
        self
    }
}

/// Listing parameters exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub size: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub search: Option<String>,
}

impl ListParams {
    /// Validates pagination, then sort field and direction, then builds the
    /// search predicate. All parameter failures are reported together.
    pub fn normalize(&self) -> Result<CustomerListQuery, Vec<QueryError>> {
        let pagination = Pagination::parse(self.page.as_deref(), self.size.as_deref());
        let sort_field = CustomerSortField::normalize(self.sort.as_deref());
        let sort_direction = SortDirection::normalize(self.order.as_deref());

        match (pagination, sort_field, sort_direction) {
            (Ok(pagination), Ok(field), Ok(direction)) => Ok(CustomerListQuery::new(pagination)
                .sort(field, direction)
                .search(CustomerSearch::from_raw(self.search.as_deref()))),
            (pagination, field, direction) => {
                let mut errors = pagination.err().unwrap_or_default();
                errors.extend(field.err());
                errors.extend(direction.err());
                Err(errors)
            }
        }
    }
}
