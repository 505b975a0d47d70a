//! End-to-end scenarios for the Users list view.

use insta::assert_snapshot;
use sift::seeker::{Dir, FilterValue, Params, QueryEngine, SortSpec, StateCodec};
use sift::users::{
    Business, Subscription, User, UserFilterKey, UserFilters, UserQuery, UserSortField, Users,
};
use sift::view::ListView;

fn user(id: u64, first: &str, created_at: &str) -> User {
    User {
        id,
        first_name: Some(first.to_string()),
        created_at: Some(created_at.to_string()),
        ..User::default()
    }
}

fn with_token(mut u: User, has_token: Option<bool>) -> User {
    u.business = Some(Business {
        subscription: Some(Subscription {
            has_token,
            ..Subscription::default()
        }),
        ..Business::default()
    });
    u
}

fn ids(rows: &[&User]) -> Vec<u64> {
    rows.iter().map(|u| u.id).collect()
}

fn codec() -> StateCodec<UserFilters, UserSortField> {
    StateCodec::new()
}

// =============================================================================
// Scenario A: join date ordering and toggling
// =============================================================================

#[test]
fn scenario_a_sort_by_join_date() {
    let records = vec![
        user(1, "Jan", "2024-01-01"),
        user(3, "Mar", "2024-03-01"),
        user(2, "Feb", "2024-02-01"),
    ];
    let engine = QueryEngine::<Users>::new();

    let asc = UserQuery::default().with_sort(SortSpec::asc(UserSortField::CreatedAt));
    assert_eq!(ids(&engine.apply(&records, &asc)), [1, 2, 3]);

    let toggled = asc.set_sort(UserSortField::CreatedAt);
    assert_eq!(toggled.sort.dir, Dir::Desc);
    assert_eq!(ids(&engine.apply(&records, &toggled)), [3, 2, 1]);
}

#[test]
fn scenario_a_mixed_timestamp_formats() {
    let records = vec![
        user(1, "a", "2024-02-01T08:00:00Z"),
        user(2, "b", "2024-02-01 07:00:00"),
        user(3, "c", "2024-02-01T10:00:00+03:00"),
        user(4, "d", ""),
    ];
    let engine = QueryEngine::<Users>::new();

    // 10:00+03:00 is 07:00Z, tied with record 2; input order breaks the tie.
    let asc = UserQuery::default().with_sort(SortSpec::asc(UserSortField::CreatedAt));
    assert_eq!(ids(&engine.apply(&records, &asc)), [2, 3, 1, 4]);
}

// =============================================================================
// Scenario B: phone search
// =============================================================================

#[test]
fn scenario_b_phone_search() {
    let mut dana = user(1, "Dana", "2024-01-01");
    dana.phone = Some("0501234567".to_string());
    let mut noa = user(2, "Noa", "2024-01-02");
    noa.phone = Some("0529999999".to_string());
    let records = vec![dana, noa];

    let mut view = ListView::<Users>::new();
    view.set_search("050");
    assert_eq!(ids(&view.rows(&records)), [1]);
}

// =============================================================================
// Scenario C: boolean filter on a nested optional field
// =============================================================================

#[test]
fn scenario_c_has_payment_token() {
    let records = vec![
        with_token(user(1, "no token", "2024-01-01"), Some(false)),
        with_token(user(2, "field absent", "2024-01-02"), None),
        user(3, "no business", "2024-01-03"),
        with_token(user(4, "token", "2024-01-04"), Some(true)),
    ];
    let engine = QueryEngine::<Users>::new();

    let state = UserQuery::default().set_filter(UserFilterKey::HasPaymentToken, "true");
    assert_eq!(ids(&engine.apply(&records, &state)), [4]);

    let state = state.set_filter(UserFilterKey::HasPaymentToken, "false");
    assert_eq!(ids(&engine.apply(&records, &state)), [3, 2, 1]);
}

// =============================================================================
// Scenario D: tampered links fall back per field
// =============================================================================

#[test]
fn scenario_d_invalid_direction() {
    let params: Params = [("sortDirection".to_string(), "sideways".to_string())]
        .into_iter()
        .collect();
    let state = codec().decode(&params);
    assert_eq!(state.sort.dir, Dir::Desc);
    assert!(state.is_default());
}

#[test]
fn scenario_d_keeps_valid_fields() {
    let state = codec().decode_query_string(
        "?q=dana&status=bogus&subscriptionPlan=pro&sortField=email&sortDirection=asc",
    );
    assert_eq!(state.search, "dana");
    assert_eq!(state.filters.status, FilterValue::Unset);
    assert_eq!(state.filters.subscription_plan.code(), Some("pro"));
    assert_eq!(state.sort, SortSpec::asc(UserSortField::CreatedAt));
}

// =============================================================================
// Scenario E: reset
// =============================================================================

#[test]
fn scenario_e_reset() {
    let state = UserQuery::default()
        .set_search("salon")
        .set_filter(UserFilterKey::Status, "active")
        .set_filter(UserFilterKey::IsVerified, "false")
        .set_sort(UserSortField::FutureAppointments)
        .set_sort(UserSortField::FutureAppointments);
    assert!(!state.is_default());

    let reset = state.reset();
    assert_eq!(reset, UserQuery::default());
    assert!(codec().encode(&reset).is_empty());
}

// =============================================================================
// Shared query strings
// =============================================================================

#[test]
fn default_state_encodes_to_nothing() {
    assert!(codec().encode(&UserQuery::default()).is_empty());
    assert_eq!(codec().decode(&Params::new()), UserQuery::default());
}

#[test]
fn query_string_snapshots() {
    let mut view = ListView::<Users>::new();

    assert_snapshot!(view.set_search("Dana & Co"), @"q=Dana+%26+Co");
    assert_snapshot!(
        view.set_filter(UserFilterKey::SubscriptionPlan, "enterprise"),
        @"q=Dana+%26+Co&subscriptionPlan=enterprise"
    );
    assert_snapshot!(
        view.set_sort(UserSortField::FutureAppointments),
        @"q=Dana+%26+Co&sortField=futureAppointments&subscriptionPlan=enterprise"
    );
    assert_snapshot!(
        view.set_sort(UserSortField::FutureAppointments),
        @"q=Dana+%26+Co&sortDirection=asc&sortField=futureAppointments&subscriptionPlan=enterprise"
    );
    assert_snapshot!(view.reset(), @"");
}

#[test]
fn summary_snapshot() {
    let records = vec![
        with_token(user(1, "a", "2024-01-01"), Some(true)),
        with_token(user(2, "b", "2024-01-02"), Some(false)),
        user(3, "c", "2024-01-03"),
    ];
    let mut view = ListView::<Users>::new();
    view.load("hasPaymentToken=true&isVerified=false");

    let json = serde_json::to_string(&view.summary(&records)).unwrap();
    assert_snapshot!(json, @r#"{"total":3,"shown":1,"filters":["hasPaymentToken=true","isVerified=false"]}"#);
}
