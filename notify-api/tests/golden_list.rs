use std::fs;

use notify_api::decode_list;
use notify_core::{Badge, Listing, NotificationKind};
use serde_json::{json, Value};

fn fixture_path(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn read_fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name)).expect("fixture should be readable")
}

#[test]
fn dropdown_list_matches_golden_listing() {
    let list = decode_list(&read_fixture("dropdown_list.json")).expect("list should decode");
    assert_eq!(list.unread_count, 4);

    let listing = Listing::from_entries(&list.notifications);
    let actual: Vec<Value> = listing
        .rows()
        .iter()
        .map(|row| {
            json!({
                "id": row.id,
                "icon": row.icon,
                "title": row.title,
                "unread": row.unread,
            })
        })
        .collect();

    let expected: Value =
        serde_json::from_str(&read_fixture("dropdown_listing.json")).expect("golden is JSON");

    assert_eq!(Value::Array(actual), expected);
}

#[test]
fn unknown_and_missing_types_fall_back_to_info() {
    let list = decode_list(&read_fixture("dropdown_list.json")).expect("list should decode");
    let kinds: Vec<NotificationKind> = list.notifications.iter().map(|entry| entry.kind).collect();
    assert_eq!(
        kinds,
        vec![
            NotificationKind::Success,
            NotificationKind::Warning,
            NotificationKind::Error,
            NotificationKind::Info,
            NotificationKind::Info,
            NotificationKind::Info,
        ]
    );
}

#[test]
fn null_type_does_not_fail_the_list() {
    let body = r#"{"notifications":[{"id":1,"type":null,"title":"t","message":"m","is_read":false,"created_at":""}],"unread_count":1}"#;
    let list = decode_list(body).expect("null type should not fail the list");
    let listing = Listing::from_entries(&list.notifications);
    assert_eq!(listing.rows().len(), 1);
    assert_eq!(listing.rows()[0].icon, "ℹ️");
    assert!(listing.rows()[0].unread);
}

#[test]
fn markup_in_text_is_kept_verbatim() {
    let list = decode_list(&read_fixture("dropdown_list.json")).expect("list should decode");
    let low_balance = list
        .notifications
        .iter()
        .find(|entry| entry.id == 40)
        .expect("entry 40 present");
    assert_eq!(low_balance.message, "Your balance is below <b>200</b> rubles.");
}

#[test]
fn empty_list_renders_placeholder_and_hides_badge() {
    let list = decode_list(&read_fixture("empty_list.json")).expect("list should decode");
    assert_eq!(Listing::from_entries(&list.notifications), Listing::Empty);
    assert_eq!(Badge::from_count(list.unread_count, 99), Badge::Hidden);
}

#[test]
fn list_without_entries_array_is_rejected() {
    assert!(decode_list(r#"{"unread_count": 2}"#).is_err());
}
