use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{DateRangeError, FieldError};
use crate::page::ErrorSink;

// JS `\d` is ASCII-only, Rust's is not.
static STUDENT_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("Invalid student id regex"));

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.+@dome\.tu\.ac\.th$").expect("Invalid email regex"));

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Splits a full name into first and last name.
pub fn validate_full_name(value: &str) -> Result<(String, String), FieldError> {
    let mut tokens = value.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(first), Some(last), None) => Ok((first.to_string(), last.to_string())),
        _ => Err(FieldError::FullName),
    }
}

pub fn validate_student_id(value: &str) -> Result<(), FieldError> {
    if !STUDENT_ID_RE.is_match(value) {
        return Err(FieldError::StudentId);
    }
    Ok(())
}

pub fn validate_email(value: &str) -> Result<(), FieldError> {
    if !EMAIL_RE.is_match(value) {
        return Err(FieldError::Email);
    }
    Ok(())
}

/// Writes a validation result into the field's error slot.
pub fn render_field_result<T>(sink: &mut dyn ErrorSink, result: &Result<T, FieldError>) {
    match result {
        Ok(_) => sink.clear(),
        Err(e) => sink.show(&e.to_string()),
    }
}

/// Parses the value of a date-time input.
///
/// Accepts `datetime-local` values (with or without seconds, `T` or space
/// separated), RFC 3339 timestamps, and bare dates which resolve to midnight.
/// RFC 3339 values come back in UTC; every other form is wall-clock time
/// with no offset.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    parse_instant(value).map(|instant| instant.at)
}

struct Instant {
    at: NaiveDateTime,
    /// Carried an explicit offset and was normalized to UTC.
    zoned: bool,
}

fn parse_instant(value: &str) -> Option<Instant> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    for format in DATETIME_FORMATS {
        if let Ok(at) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Instant { at, zoned: false });
        }
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(Instant {
            at: parsed.naive_utc(),
            zoned: true,
        });
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|at| Instant { at, zoned: false })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    /// End is strictly after start.
    Ordered,
    /// End is at or before start.
    Reversed,
    /// One side is empty or not a date, or only one side has an offset.
    Incomplete,
}

/// Orders two date-time inputs.
///
/// A pair where only one side carries a UTC offset has no common clock to
/// compare on, so it counts as `Incomplete` rather than guessing the local
/// zone.
pub fn check_date_range(start: &str, end: &str) -> DateRange {
    match (parse_instant(start), parse_instant(end)) {
        (Some(start), Some(end)) if start.zoned != end.zoned => DateRange::Incomplete,
        (Some(start), Some(end)) if end.at > start.at => DateRange::Ordered,
        (Some(_), Some(_)) => DateRange::Reversed,
        _ => DateRange::Incomplete,
    }
}

pub fn validate_date_range(start: &str, end: &str) -> Result<(), DateRangeError> {
    match check_date_range(start, end) {
        DateRange::Ordered => Ok(()),
        DateRange::Reversed | DateRange::Incomplete => Err(DateRangeError),
    }
}
