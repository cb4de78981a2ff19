use std::fs;

use chrono::{Datelike, Local, Timelike};
use mailtriage::email::normalizer::{NO_SENDER, NO_SUBJECT};
use mailtriage::email::{normalize, RawMessage};

fn load_fixture(path: &str) -> RawMessage {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read test fixture {}: {}", path, e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse test fixture {}: {}", path, e))
}

#[test]
fn test_normalize_multipart_gmail_message() {
    let raw = load_fixture("data_test/multipart.json");
    let email = normalize(&raw);

    assert_eq!(email.id, "18f3a9c2d4e5b6a7");
    assert_eq!(email.subject, "Sync on Thursday?");
    assert_eq!(email.sender, "Bob Martin <bob@example.com>");

    // HTML part comes first but only the first text/plain part is used, trimmed
    assert_eq!(email.body, "Hi team,\n\nCan we meet Thursday at 10?\n\nThanks,\nBob");

    // "(IST)" annotation is dropped before parsing
    let date = email.received_at;
    assert_eq!((date.year(), date.month(), date.day()), (2024, 7, 25));
    assert_eq!((date.hour(), date.minute(), date.second()), (12, 34, 56));
    assert_eq!(date.offset().local_minus_utc(), 19800);

    assert!(email.category.is_none());
    assert!(email.summary.is_none());
}

#[test]
fn test_normalize_single_part_with_bad_date() {
    let raw = load_fixture("data_test/single_part.json");

    let before = Local::now();
    let email = normalize(&raw);
    let after = Local::now();

    assert_eq!(email.body, "hello");
    assert_eq!(email.subject, NO_SUBJECT);
    assert_eq!(email.sender, NO_SENDER);

    // Fallback to the current time
    let tolerance = chrono::Duration::seconds(5);
    assert!(email.received_at >= before - tolerance);
    assert!(email.received_at <= after + tolerance);
}

#[test]
fn test_normalize_is_repeatable() {
    let raw = load_fixture("data_test/multipart.json");

    assert_eq!(normalize(&raw), normalize(&raw));
}

#[test]
fn test_minimal_wire_message() {
    let raw: RawMessage = serde_json::from_str(r#"{"id": "only-id"}"#)
        .expect("Failed to parse minimal message");
    let email = normalize(&raw);

    assert_eq!(email.id, "only-id");
    assert_eq!(email.subject, NO_SUBJECT);
    assert_eq!(email.sender, NO_SENDER);
    assert_eq!(email.body, "");
}

#[test]
fn test_multipart_without_plain_text_has_empty_body() {
    let raw: RawMessage = serde_json::from_str(
        r#"{
            "id": "html-only",
            "payload": {
                "mimeType": "multipart/alternative",
                "headers": [{"name": "Subject", "value": "Newsletter"}],
                "body": {"size": 0, "data": "aWdub3JlZA=="},
                "parts": [
                    {"mimeType": "text/html", "body": {"data": "PGI-aGk8L2I-"}},
                    {"mimeType": "TEXT/PLAIN", "body": {"data": "aGVsbG8="}}
                ]
            }
        }"#,
    )
    .expect("Failed to parse html-only message");

    let email = normalize(&raw);

    assert_eq!(email.subject, "Newsletter");
    assert_eq!(email.body, "");
}

#[test]
fn test_wrong_weekday_keeps_header_date() {
    let raw: RawMessage = serde_json::from_str(
        r#"{
            "id": "wrong-weekday",
            "payload": {
                "headers": [{"name": "Date", "value": "Fri, 25 Jul 2024 12:34:56 +0530 (IST)"}],
                "body": {"data": "aGVsbG8="}
            }
        }"#,
    )
    .expect("Failed to parse wrong-weekday message");

    let email = normalize(&raw);

    assert_eq!(email.received_at.to_rfc3339(), "2024-07-25T12:34:56+05:30");
}
