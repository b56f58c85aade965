// SPDX-License-Identifier: MPL-2.0
//! Display helpers for prices, dates and long text.

use crate::config::{DEFAULT_DATE_PATTERN, DEFAULT_TRUNCATE_LEN};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use num_format::{Locale, ToFormattedString};

/// Timestamp layout used by the café server.
pub const SERVER_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats an integer with `,` thousands separators (`1234567` -> `1,234,567`).
#[must_use]
pub fn format_number(n: i64) -> String {
    n.to_formatted_string(&Locale::ko)
}

/// Formats a price in won (`4500` -> `4,500원`).
#[must_use]
pub fn format_price(price: i64) -> String {
    format!("{}원", format_number(price))
}

/// Reformats free-form numeric input as the user types.
///
/// Non-digits are dropped and the rest regrouped. Input without any digit
/// is returned unchanged; digit runs too long for a `u128` are not grouped.
#[must_use]
pub fn format_number_input(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return raw.to_string();
    }
    match digits.parse::<u128>() {
        Ok(value) => value.to_formatted_string(&Locale::ko),
        Err(_) => digits.trim_start_matches('0').to_string(),
    }
}

/// Formats `datetime` with a token pattern.
///
/// Recognized tokens: `YYYY`, `MM`, `DD`, `HH`, `mm`, `ss`. Everything else
/// is copied as-is.
#[must_use]
pub fn format_date(datetime: &NaiveDateTime, pattern: &str) -> String {
    pattern
        .replace("YYYY", &format!("{:04}", datetime.year()))
        .replace("MM", &format!("{:02}", datetime.month()))
        .replace("DD", &format!("{:02}", datetime.day()))
        .replace("HH", &format!("{:02}", datetime.hour()))
        .replace("mm", &format!("{:02}", datetime.minute()))
        .replace("ss", &format!("{:02}", datetime.second()))
}

/// [`format_date`] with the `YYYY-MM-DD` pattern.
#[must_use]
pub fn format_date_default(datetime: &NaiveDateTime) -> String {
    format_date(datetime, DEFAULT_DATE_PATTERN)
}

/// Parses a server timestamp (`YYYY-MM-DD HH:MM:SS` or a bare date).
#[must_use]
pub fn parse_server_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    NaiveDateTime::parse_from_str(text, SERVER_DATETIME_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Shortens `text` to `max_chars` characters, appending `...` when cut.
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// [`truncate`] with the default length of 50 characters.
#[must_use]
pub fn truncate_default(text: &str) -> String {
    truncate(text, DEFAULT_TRUNCATE_LEN)
}
