//! Date heuristics for free-text changelog headers

use chrono::{Month, NaiveDate};

/// Recover a calendar date from the date part of a `* <date> <author>` header
///
/// Looks for a month name, a 1-2 digit day and a 4-digit year, in any
/// order. Weekday names, clock times and zone names are ignored, and a
/// weekday that does not match the date is not an error.
///
/// Examples:
/// - `"Mon Jan 01 2024"` -> 2024-01-01
/// - `"Tue 2 January 2024"` -> 2024-01-02
/// - `"Wed Mar 06 14:03:12 UTC 2024"` -> 2024-03-06
pub fn parse_changelog_date(text: &str) -> Option<NaiveDate> {
    let tokens: Vec<&str> = text.split_whitespace().collect();

    let year = tokens.last().and_then(|token| parse_year(token))?;
    let month = tokens
        .iter()
        .find_map(|token| token.parse::<Month>().ok())?;
    let day = tokens[..tokens.len() - 1]
        .iter()
        .find_map(|token| parse_day(token))?;

    NaiveDate::from_ymd_opt(year, month.number_from_month(), day)
}

fn parse_year(token: &str) -> Option<i32> {
    if token.len() == 4 && token.bytes().all(|b| b.is_ascii_digit()) {
        token.parse().ok()
    } else {
        None
    }
}

fn parse_day(token: &str) -> Option<u32> {
    let token = token.trim_end_matches(',');
    if (1..=2).contains(&token.len()) && token.bytes().all(|b| b.is_ascii_digit()) {
        token.parse().ok().filter(|day| (1..=31).contains(day))
    } else {
        None
    }
}
