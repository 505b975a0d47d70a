//! The Users list view.
//!
//! Records come from the admin API's user snapshot. Free text covers first
//! name, last name, email, phone and the business display name. Six filter
//! dimensions are available:
//!
//! | key | values | reads |
//! |-----|--------|-------|
//! | `status` | [`SubscriptionStatus`] | `business.subscription.status` |
//! | `subscriptionPlan` | [`Plan`] | `business.subscription.plan` |
//! | `billingCycle` | [`BillingCycle`] | `business.subscription.billing_cycle` |
//! | `hasPaymentToken` | `true` / `false` | `business.subscription.has_token` |
//! | `isVerified` | `true` / `false` | `business.is_verified` |
//! | `hasAffiliate` | `true` / `false` | presence of `affiliate` |
//!
//! Sortable by `createdAt` (default, newest first) and `futureAppointments`.

use serde::{Deserialize, Serialize};

use crate::seeker::{
    FilterSet, FilterValue, Predicate, PredicateSet, Schema, SearchField, Searchable,
    Seekable, StateOf, Timestamp, Value,
};
use crate::Choice;

/// One user as delivered by the admin API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: u64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub business: Option<Business>,
    pub affiliate: Option<AffiliateRef>,
    pub future_appointments_count: Option<i64>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub display_name: Option<String>,
    pub is_verified: Option<bool>,
    pub subscription: Option<Subscription>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub status: Option<String>,
    pub plan: Option<String>,
    pub billing_cycle: Option<String>,
    pub has_token: Option<bool>,
}

/// Back-reference to the affiliate who referred the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AffiliateRef {
    #[serde(default)]
    pub id: u64,
    pub name: Option<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        let parts = [self.first_name.as_deref(), self.last_name.as_deref()];
        parts
            .iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn subscription(&self) -> Option<&Subscription> {
        self.business.as_ref()?.subscription.as_ref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Choice)]
pub enum SubscriptionStatus {
    Active,
    Trialing,
    PastDue,
    Canceled,
    Incomplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Choice)]
pub enum Plan {
    Basic,
    Pro,
    Enterprise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Choice)]
pub enum BillingCycle {
    Monthly,
    Yearly,
}

/// Filter dimensions of the Users view; codes are the query-string keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Choice)]
#[choice(rename_all = "camelCase", kind = "user filter")]
pub enum UserFilterKey {
    Status,
    SubscriptionPlan,
    BillingCycle,
    HasPaymentToken,
    IsVerified,
    HasAffiliate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Choice)]
#[choice(rename_all = "camelCase", kind = "user sort field")]
pub enum UserSortField {
    #[default]
    CreatedAt,
    FutureAppointments,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilters {
    pub status: FilterValue<SubscriptionStatus>,
    pub subscription_plan: FilterValue<Plan>,
    pub billing_cycle: FilterValue<BillingCycle>,
    pub has_payment_token: FilterValue<bool>,
    pub is_verified: FilterValue<bool>,
    pub has_affiliate: FilterValue<bool>,
}

impl FilterSet for UserFilters {
    type Key = UserFilterKey;

    fn code(&self, key: UserFilterKey) -> Option<&'static str> {
        match key {
            UserFilterKey::Status => self.status.code(),
            UserFilterKey::SubscriptionPlan => self.subscription_plan.code(),
            UserFilterKey::BillingCycle => self.billing_cycle.code(),
            UserFilterKey::HasPaymentToken => self.has_payment_token.code(),
            UserFilterKey::IsVerified => self.is_verified.code(),
            UserFilterKey::HasAffiliate => self.has_affiliate.code(),
        }
    }

    fn assign(&mut self, key: UserFilterKey, raw: &str) {
        match key {
            UserFilterKey::Status => self.status = FilterValue::parse(raw),
            UserFilterKey::SubscriptionPlan => self.subscription_plan = FilterValue::parse(raw),
            UserFilterKey::BillingCycle => self.billing_cycle = FilterValue::parse(raw),
            UserFilterKey::HasPaymentToken => self.has_payment_token = FilterValue::parse(raw),
            UserFilterKey::IsVerified => self.is_verified = FilterValue::parse(raw),
            UserFilterKey::HasAffiliate => self.has_affiliate = FilterValue::parse(raw),
        }
    }
}

impl Seekable for User {
    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        match field {
            "createdAt" => Value::timestamp_or_none(
                self.created_at
                    .as_deref()
                    .and_then(|raw| Timestamp::parse(raw).ok()),
            ),
            "futureAppointments" => Value::number_or_none(self.future_appointments_count),
            _ => Value::None,
        }
    }
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<SearchField<'_>> {
        vec![
            SearchField::Text(self.first_name.as_deref()),
            SearchField::Text(self.last_name.as_deref()),
            SearchField::Text(self.email.as_deref()),
            SearchField::Phone(self.phone.as_deref()),
            SearchField::Text(
                self.business
                    .as_ref()
                    .and_then(|b| b.display_name.as_deref()),
            ),
        ]
    }
}

/// Schema of the Users list view.
#[derive(Debug)]
pub struct Users;

/// Query state of the Users list view.
pub type UserQuery = StateOf<Users>;

impl Schema for Users {
    type Record = User;
    type Filters = UserFilters;
    type SortField = UserSortField;

    fn predicates() -> PredicateSet<User, UserFilters> {
        PredicateSet::new()
            .with(Predicate::code_eq(
                UserFilterKey::Status,
                |f: &UserFilters| f.status,
                |u: &User| u.subscription().and_then(|s| s.status.as_deref()),
            ))
            .with(Predicate::code_eq(
                UserFilterKey::SubscriptionPlan,
                |f: &UserFilters| f.subscription_plan,
                |u: &User| u.subscription().and_then(|s| s.plan.as_deref()),
            ))
            .with(Predicate::code_eq(
                UserFilterKey::BillingCycle,
                |f: &UserFilters| f.billing_cycle,
                |u: &User| u.subscription().and_then(|s| s.billing_cycle.as_deref()),
            ))
            .with(Predicate::flag(
                UserFilterKey::HasPaymentToken,
                |f: &UserFilters| f.has_payment_token,
                |u: &User| u.subscription().and_then(|s| s.has_token),
            ))
            .with(Predicate::flag(
                UserFilterKey::IsVerified,
                |f: &UserFilters| f.is_verified,
                |u: &User| u.business.as_ref().and_then(|b| b.is_verified),
            ))
            .with(Predicate::flag(
                UserFilterKey::HasAffiliate,
                |f: &UserFilters| f.has_affiliate,
                |u: &User| Some(u.affiliate.is_some()),
            ))
    }
}
