//! Free-text customer search predicate.

use crate::domain::customer::Customer;

/// Case-insensitive substring filter over first name, last name, email and phone.
///
/// A record matches when any of the four fields contains the term. Only
/// constructed for non-blank input; "match everything" is the absence of a
/// predicate, not a predicate that always holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomerSearch {
    term: String,
}

impl CustomerSearch {
    /// Builds a predicate from raw user input. Blank input yields `None`.
    pub fn from_raw(raw: Option<&str>) -> Option<Self> {
        raw.map(str::trim)
            .filter(|term| !term.is_empty())
            .map(|term| Self {
                term: term.to_string(),
            })
    }

    /// The trimmed search term as entered.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// SQL `LIKE` pattern of the lower-cased term, wildcards escaped with `\`.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.term.len() + 2);
        pattern.push('%');
        for ch in self.term.to_lowercase().chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }

    /// Evaluates the predicate against an already loaded record.
    pub fn matches(&self, customer: &Customer) -> bool {
        let needle = self.term.to_lowercase();
        let contains = |value: &str| value.to_lowercase().contains(&needle);

        contains(customer.first_name.as_str())
            || contains(customer.last_name.as_str())
            || contains(customer.email.as_str())
            || customer
                .phone
                .as_ref()
                .is_some_and(|phone| contains(phone.as_str()))
    }
}
