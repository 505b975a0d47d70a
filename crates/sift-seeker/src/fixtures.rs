//! Small member-directory schema shared by the unit tests.

use crate::engine::Schema;
use crate::filter::{FilterSet, FilterValue, Predicate, PredicateSet};
use crate::traits::{Choice, SearchField, Searchable, Seekable};
use crate::value::{Number, Timestamp, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    Basic,
    Pro,
}

impl Choice for Plan {
    const KIND: &'static str = "plan";
    const ALL: &'static [Self] = &[Plan::Basic, Plan::Pro];

    fn code(self) -> &'static str {
        match self {
            Plan::Basic => "basic",
            Plan::Pro => "pro",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKey {
    Plan,
    Verified,
}

impl Choice for MemberKey {
    const KIND: &'static str = "filter";
    const ALL: &'static [Self] = &[MemberKey::Plan, MemberKey::Verified];

    fn code(self) -> &'static str {
        match self {
            MemberKey::Plan => "plan",
            MemberKey::Verified => "verified",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemberField {
    #[default]
    Joined,
    Visits,
}

impl Choice for MemberField {
    const KIND: &'static str = "sort field";
    const ALL: &'static [Self] = &[MemberField::Joined, MemberField::Visits];

    fn code(self) -> &'static str {
        match self {
            MemberField::Joined => "joined",
            MemberField::Visits => "visits",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberFilters {
    pub plan: FilterValue<Plan>,
    pub verified: FilterValue<bool>,
}

impl FilterSet for MemberFilters {
    type Key = MemberKey;

    fn code(&self, key: MemberKey) -> Option<&'static str> {
        match key {
            MemberKey::Plan => self.plan.code(),
            MemberKey::Verified => self.verified.code(),
        }
    }

    fn assign(&mut self, key: MemberKey, raw: &str) {
        match key {
            MemberKey::Plan => self.plan = FilterValue::parse(raw),
            MemberKey::Verified => self.verified = FilterValue::parse(raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub name: String,
    pub phone: Option<String>,
    pub plan: Option<String>,
    pub verified: Option<bool>,
    pub joined: String,
    pub visits: u32,
}

impl Member {
    pub fn new(name: &str, joined: &str) -> Self {
        Member {
            name: name.to_string(),
            phone: None,
            plan: None,
            verified: None,
            joined: joined.to_string(),
            visits: 0,
        }
    }

    pub fn plan(mut self, plan: &str) -> Self {
        self.plan = Some(plan.to_string());
        self
    }

    pub fn verified(mut self, verified: bool) -> Self {
        self.verified = Some(verified);
        self
    }

    pub fn phone(mut self, phone: &str) -> Self {
        self.phone = Some(phone.to_string());
        self
    }

    pub fn visits(mut self, visits: u32) -> Self {
        self.visits = visits;
        self
    }
}

impl Seekable for Member {
    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        match field {
            "joined" => Value::timestamp_or_none(Timestamp::parse(&self.joined).ok()),
            "visits" => Value::Number(Number::from(self.visits)),
            _ => Value::None,
        }
    }
}

impl Searchable for Member {
    fn search_fields(&self) -> Vec<SearchField<'_>> {
        vec![
            SearchField::Text(Some(&self.name)),
            SearchField::Phone(self.phone.as_deref()),
        ]
    }
}

pub struct Members;

impl Schema for Members {
    type Record = Member;
    type Filters = MemberFilters;
    type SortField = MemberField;

    fn predicates() -> PredicateSet<Member, MemberFilters> {
        PredicateSet::new()
            .with(Predicate::code_eq(
                MemberKey::Plan,
                |f: &MemberFilters| f.plan,
                |m: &Member| m.plan.as_deref(),
            ))
            .with(Predicate::flag(
                MemberKey::Verified,
                |f: &MemberFilters| f.verified,
                |m: &Member| m.verified,
            ))
    }
}
