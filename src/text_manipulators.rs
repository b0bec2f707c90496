use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use scraper::ElementRef;

use crate::error::{WatchError, WatchResult};

// Year first, month before day. US-style dates are the only month-first form.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y%m%d", "%m/%d/%Y"];
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

pub fn extract_text(node: ElementRef) -> String {
    node.text().collect::<String>().trim().to_string()
}

/// Parses a day from free-form text. Any time-of-day part is dropped.
///
/// Two-digit years land within 50 years of the current one (`24-06-10` is
/// 2024). Three-digit years are rejected.
pub fn parse_flexible_date(input: &str) -> WatchResult<NaiveDate> {
    parse_flexible_date_near(input, Utc::now().year())
}

fn parse_flexible_date_near(input: &str, reference_year: i32) -> WatchResult<NaiveDate> {
    let invalid = || WatchError::InvalidDate {
        input: input.to_string(),
    };
    let date = parse_date_fields(input.trim()).ok_or_else(invalid)?;
    match date.year() {
        0..=99 => date
            .with_year(expand_two_digit_year(date.year(), reference_year))
            .ok_or_else(invalid),
        100..=999 => Err(invalid()),
        _ => Ok(date),
    }
}

fn parse_date_fields(trimmed: &str) -> Option<NaiveDate> {
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(date_time) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(date_time.date());
        }
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|date_time| date_time.date_naive())
}

/// Puts `year` in the reference year's century, then shifts by a century
/// if that lands 50 or more years away.
fn expand_two_digit_year(year: i32, reference_year: i32) -> i32 {
    let expanded = reference_year - reference_year % 100 + year;
    if expanded >= reference_year + 50 {
        expanded - 100
    } else if expanded < reference_year - 50 {
        expanded + 100
    } else {
        expanded
    }
}

/// Turns displayed fare text like `$ 1,234` into whole currency units.
pub struct PriceParser {
    price_regex: Regex,
}

impl PriceParser {
    pub fn new() -> WatchResult<Self> {
        let price_regex = Regex::new(r"^\s*\p{Sc}?\s*(\d{1,3}(?:,\d{3})+|\d+)\s*$")?;
        Ok(Self { price_regex })
    }

    pub fn parse_price(&self, text: &str) -> WatchResult<u32> {
        let invalid = || WatchError::InvalidPrice {
            text: text.to_string(),
        };
        let Some(caps) = self.price_regex.captures(text) else {
            return Err(invalid());
        };
        let Some(digits) = caps.get(1) else {
            return Err(invalid());
        };
        digits
            .as_str()
            .replace(',', "")
            .parse::<u32>()
            .map_err(|_| invalid())
    }
}
