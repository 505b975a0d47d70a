//! Free-text matching across a record's text-bearing fields.

use crate::traits::{SearchField, Searchable};

/// Case-insensitive substring matcher built from the search box contents.
///
/// A record passes if *any* of its [`SearchField`]s contains the query.
/// An empty (or whitespace-only) query passes every record. Absent fields
/// behave as empty strings.
///
/// Phone fields are additionally compared digits-to-digits when the query
/// looks like a phone number, so `050 123` finds `0501234567`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMatcher {
    needle: String,
    digits: Option<String>,
}

impl TextMatcher {
    pub fn new(query: &str) -> Self {
        let needle = query.trim().to_lowercase();
        let digits = phone_digits(&needle);
        TextMatcher { needle, digits }
    }

    /// Returns `true` if the query is empty and matches everything.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Tests a record.
    pub fn matches<R: Searchable + ?Sized>(&self, record: &R) -> bool {
        self.is_empty() || self.matches_fields(&record.search_fields())
    }

    /// Tests an explicit list of fields.
    pub fn matches_fields(&self, fields: &[SearchField<'_>]) -> bool {
        if self.is_empty() {
            return true;
        }
        fields.iter().any(|field| self.matches_field(*field))
    }

    fn matches_field(&self, field: SearchField<'_>) -> bool {
        match field {
            SearchField::Text(text) => self.contains(text.unwrap_or_default()),
            SearchField::Phone(phone) => {
                let phone = phone.unwrap_or_default();
                if self.contains(phone) {
                    return true;
                }
                match &self.digits {
                    Some(digits) => only_digits(phone).contains(digits.as_str()),
                    None => false,
                }
            }
        }
    }

    fn contains(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.needle)
    }
}

/// Digits of a query made only of digits and phone punctuation.
fn phone_digits(query: &str) -> Option<String> {
    let is_phone_like = query
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')' | '.'));
    let digits = only_digits(query);
    (is_phone_like && !digits.is_empty()).then_some(digits)
}

fn only_digits(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}
