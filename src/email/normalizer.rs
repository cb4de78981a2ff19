//! Turns a raw Gmail message into a flat `Email`.
//!
//! Every step degrades to a default instead of failing: a missing header
//! becomes a placeholder, an unparseable date becomes "now", an undecodable
//! body becomes empty.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use chrono::{DateTime, FixedOffset, Local, Weekday};
use log::{debug, warn};

use super::common::Email;
use super::wire::{MessagePart, RawMessage};

pub const NO_SUBJECT: &str = "No Subject";
pub const NO_SENDER: &str = "No Sender";

/// RFC 2822 style date after the "Thu, " weekday prefix, e.g. "25 Jul 2024 12:34:56 +0530"
const MAIL_DATE_FORMAT: &str = "%d %b %Y %H:%M:%S %z";

// Gmail is not consistent about padding.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub fn normalize(message: &RawMessage) -> Email {
    debug!("Normalizing email ID: {}", message.id);

    let mut subject = None;
    let mut sender = None;
    let mut raw_date = None;

    for header in &message.payload.headers {
        match header.name.as_str() {
            "Subject" if subject.is_none() => subject = Some(header.value.clone()),
            "From" if sender.is_none() => sender = Some(header.value.clone()),
            "Date" if raw_date.is_none() => raw_date = Some(header.value.as_str()),
            _ => {}
        }
    }

    let received_at = parse_received_date(raw_date.unwrap_or("")).unwrap_or_else(|| {
        debug!("Unparseable date {:?} on email {}, using current time", raw_date, message.id);
        Local::now().fixed_offset()
    });

    Email {
        id: message.id.clone(),
        sender: sender.unwrap_or_else(|| NO_SENDER.to_string()),
        subject: subject.unwrap_or_else(|| NO_SUBJECT.to_string()),
        body: extract_body(&message.payload).trim().to_string(),
        received_at,
        category: None,
        summary: None,
    }
}

/// Parse a `Date` header value, ignoring a trailing "(UTC)"-style zone name.
///
/// The weekday must be present and well-formed but is not checked against
/// the date: mailers get it wrong and the rest of the header is still good.
pub fn parse_received_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let cleaned = raw.split(" (").next().unwrap_or("").trim();
    let (weekday, rest) = cleaned.split_once(", ")?;
    weekday.parse::<Weekday>().ok()?;

    DateTime::parse_from_str(rest.trim_start(), MAIL_DATE_FORMAT).ok()
}

/// Plain-text body of a message, untrimmed.
///
/// Multipart payloads use the first `text/plain` part carrying data; nested
/// multiparts and HTML parts are not looked at.
pub fn extract_body(payload: &MessagePart) -> String {
    match &payload.parts {
        Some(parts) => parts
            .iter()
            .filter(|part| part.mime_type.as_deref() == Some("text/plain"))
            .find_map(|part| part.data())
            .map(decode_payload)
            .unwrap_or_default(),
        None => payload.data().map(decode_payload).unwrap_or_default(),
    }
}

/// Decode URL-safe base64 text into a UTF-8 string, or empty on failure.
pub fn decode_payload(data: &str) -> String {
    let bytes = match URL_SAFE_LENIENT.decode(data.trim()) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Malformed base64 payload ({}), leaving body empty", e);
            return String::new();
        }
    };

    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!("Body is not valid UTF-8 ({}), leaving body empty", e);
            String::new()
        }
    }
}
