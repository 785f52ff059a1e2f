//! Timestamp rendering and recognition of date-shaped names.

use crate::app::models::DateToken;
use chrono::{DateTime, Local, NaiveDate};
use std::time::SystemTime;

/// Dates before this year are not treated as meaningful names.
const MIN_YEAR: i32 = 1978;

pub fn file_stamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y%m%d%H%M%S")
        .to_string()
}

pub fn year_dir(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format("%Y").to_string()
}

pub fn month_dir(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format("%Y%m").to_string()
}

/// `YYYYMMDDhhmmss`, the shape of a name this tool already produced.
pub fn is_full_stamp(s: &str) -> bool {
    if s.len() != 14 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let Some(date) = parse_date(&s[..8]) else {
        return false;
    };
    let (h, m, sec) = (field(s, 8..10), field(s, 10..12), field(s, 12..14));
    date.and_hms_opt(h, m, sec).is_some()
}

/// A stamp optionally followed by a two or three digit collision index.
pub fn is_completed_name(stem: &str) -> bool {
    match stem.split_once('-') {
        Some((stamp, index)) => {
            is_full_stamp(stamp)
                && (2..=3).contains(&index.len())
                && index.bytes().all(|b| b.is_ascii_digit())
        }
        None => is_full_stamp(stem),
    }
}

/// Classifies `YYYY`, `YYYYMM` and `YYYYMMDD` directory names.
pub fn date_token(s: &str) -> Option<DateToken> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (token, padded) = match s.len() {
        4 => (DateToken::Year, format!("{s}0101")),
        6 => (DateToken::YearMonth, format!("{s}01")),
        8 => (DateToken::YearMonthDay, s.to_string()),
        _ => return None,
    };
    parse_date(&padded).map(|_| token)
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let year = s[..4].parse::<i32>().ok()?;
    if year < MIN_YEAR {
        return None;
    }
    NaiveDate::from_ymd_opt(year, field(s, 4..6), field(s, 6..8))
}

// Callers have already checked the slice is ASCII digits.
fn field(s: &str, range: std::ops::Range<usize>) -> u32 {
    s[range].parse().unwrap_or(u32::MAX)
}
