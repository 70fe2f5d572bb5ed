// SPDX-License-Identifier: MPL-2.0
//! Card expiry date checks.
//!
//! The expiry year is a two-digit offset from 2000 and the month is 1-based.
//! A card counts as unexpired when the first instant of its expiry month
//! lies strictly after the reference time. Months outside 1–12 roll over
//! into neighbouring years (month 13 of 2029 is January 2030, month 0 of
//! 2030 is December 2029).

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Base year the two-digit expiry year is added to.
const CENTURY_BASE: i64 = 2000;

/// Returns `true` if the expiry month starts after the current local time.
///
/// Inputs that do not start with a number (after optional whitespace and
/// sign) are not a date and yield `false`.
#[must_use]
pub fn validate_expiry_date(month: &str, year: &str) -> bool {
    validate_expiry_date_at(month, year, Local::now().naive_local())
}

/// Same as [`validate_expiry_date`] against an explicit reference time.
#[must_use]
pub fn validate_expiry_date_at(month: &str, year: &str, now: NaiveDateTime) -> bool {
    expiry_month_start(month, year).is_some_and(|start| start > now)
}

/// Resolves the first instant of the expiry month, applying month rollover.
///
/// Returns `None` for unparseable input or dates outside chrono's range.
#[must_use]
pub fn expiry_month_start(month: &str, year: &str) -> Option<NaiveDateTime> {
    let month = parse_leading_int(month)?;
    let year = parse_leading_int(year)?;

    let total_months = (CENTURY_BASE.checked_add(year)?)
        .checked_mul(12)?
        .checked_add(month.checked_sub(1)?)?;
    let resolved_year = i32::try_from(total_months.div_euclid(12)).ok()?;
    let resolved_month = u32::try_from(total_months.rem_euclid(12) + 1).ok()?;

    NaiveDate::from_ymd_opt(resolved_year, resolved_month, 1)?.and_hms_opt(0, 0, 0)
}

/// Parses the integer prefix of `input`: leading whitespace, an optional
/// sign, then as many ASCII digits as follow. `"07"` is 7, `" 12ab"` is 12,
/// `"ab"` is `None`.
fn parse_leading_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    let value: i64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .expect("valid test date")
    }

    #[test]
    fn future_month_is_valid() {
        assert!(validate_expiry_date_at("01", "30", at(2026, 10, 18)));
    }

    #[test]
    fn past_month_is_invalid() {
        assert!(!validate_expiry_date_at("01", "20", at(2026, 10, 18)));
    }

    #[test]
    fn current_month_has_already_started() {
        // October 2026 began before the 18th
        assert!(!validate_expiry_date_at("10", "26", at(2026, 10, 18)));
        assert!(validate_expiry_date_at("11", "26", at(2026, 10, 18)));
    }

    #[test]
    fn month_start_boundary_is_exclusive() {
        let start = expiry_month_start("11", "26").expect("valid date");
        assert!(!validate_expiry_date_at("11", "26", start));
        let just_before = start - chrono::Duration::seconds(1);
        assert!(validate_expiry_date_at("11", "26", just_before));
    }

    #[test]
    fn month_overflow_rolls_into_next_year() {
        assert_eq!(expiry_month_start("13", "29"), expiry_month_start("1", "30"));
        assert_eq!(expiry_month_start("25", "29"), expiry_month_start("1", "31"));
    }

    #[test]
    fn month_underflow_rolls_into_previous_year() {
        assert_eq!(expiry_month_start("0", "30"), expiry_month_start("12", "29"));
        assert_eq!(expiry_month_start("-1", "30"), expiry_month_start("11", "29"));
    }

    #[test]
    fn lenient_numeric_prefix_parsing() {
        assert_eq!(parse_leading_int("07"), Some(7));
        assert_eq!(parse_leading_int(" 12ab"), Some(12));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("ab"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
    }

    #[test]
    fn non_numeric_input_is_not_a_date() {
        assert!(!validate_expiry_date_at("ab", "30", at(2026, 1, 1)));
        assert!(!validate_expiry_date_at("01", "", at(2026, 1, 1)));
    }

    #[test]
    fn absurd_years_do_not_panic() {
        assert!(expiry_month_start("1", "999999999999").is_none());
        assert!(!validate_expiry_date("1", "999999999999999999999"));
    }
}
