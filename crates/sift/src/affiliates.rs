//! The Affiliates list view.
//!
//! One filter (`status`: `active` / `inactive`), sortable by `createdAt`
//! and `referrals`.

use serde::{Deserialize, Serialize};

use crate::seeker::{
    FilterSet, FilterValue, Predicate, PredicateSet, Schema, SearchField, Searchable,
    Seekable, StateOf, Timestamp, Value,
};
use crate::Choice;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Affiliate {
    #[serde(default)]
    pub id: u64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub referral_code: Option<String>,
    pub is_active: Option<bool>,
    pub referrals_count: Option<i64>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Choice)]
#[choice(kind = "affiliate status")]
pub enum AffiliateStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Choice)]
#[choice(kind = "affiliate filter")]
pub enum AffiliateFilterKey {
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Choice)]
#[choice(rename_all = "camelCase", kind = "affiliate sort field")]
pub enum AffiliateSortField {
    #[default]
    CreatedAt,
    Referrals,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AffiliateFilters {
    pub status: FilterValue<AffiliateStatus>,
}

impl FilterSet for AffiliateFilters {
    type Key = AffiliateFilterKey;

    fn code(&self, key: AffiliateFilterKey) -> Option<&'static str> {
        match key {
            AffiliateFilterKey::Status => self.status.code(),
        }
    }

    fn assign(&mut self, key: AffiliateFilterKey, raw: &str) {
        match key {
            AffiliateFilterKey::Status => self.status = FilterValue::parse(raw),
        }
    }
}

impl Seekable for Affiliate {
    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        match field {
            "createdAt" => Value::timestamp_or_none(
                self.created_at
                    .as_deref()
                    .and_then(|raw| Timestamp::parse(raw).ok()),
            ),
            "referrals" => Value::number_or_none(self.referrals_count),
            _ => Value::None,
        }
    }
}

impl Searchable for Affiliate {
    fn search_fields(&self) -> Vec<SearchField<'_>> {
        vec![
            SearchField::Text(self.name.as_deref()),
            SearchField::Text(self.email.as_deref()),
            SearchField::Phone(self.phone.as_deref()),
            SearchField::Text(self.referral_code.as_deref()),
        ]
    }
}

/// Schema of the Affiliates list view.
#[derive(Debug)]
pub struct Affiliates;

pub type AffiliateQuery = StateOf<Affiliates>;

impl Schema for Affiliates {
    type Record = Affiliate;
    type Filters = AffiliateFilters;
    type SortField = AffiliateSortField;

    fn predicates() -> PredicateSet<Affiliate, AffiliateFilters> {
        // An affiliate without the flag counts as inactive.
        PredicateSet::new().with(Predicate::new(
            AffiliateFilterKey::Status,
            |f: &AffiliateFilters| f.status,
            |a: &Affiliate, wanted: AffiliateStatus| {
                let active = a.is_active.unwrap_or(false);
                active == (wanted == AffiliateStatus::Active)
            },
        ))
    }
}
