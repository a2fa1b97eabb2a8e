//! Numeric and date helpers shared by the evaluator and the calculator
//!
//! Both helpers are lenient: input comes straight from form controls, so
//! anything unreadable maps to `None` and the caller picks the neutral result.

use chrono::{DateTime, Datelike, NaiveDate};
use formbuilder_core::Value;

/// Read a value as a float using prefix semantics.
///
/// Leading whitespace is skipped and the longest numeric prefix is parsed,
/// so `"3kg"` reads as `3`. Returns `None` when no prefix parses or the
/// result is NaN.
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) if !n.is_nan() => Some(*n),
        Value::String(s) => parse_float_prefix(s),
        _ => None,
    }
}

/// Parse the longest float prefix of `input`
pub fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }

    if s[end..].starts_with("Infinity") {
        let sign = if s.starts_with('-') { -1.0 } else { 1.0 };
        return Some(sign * f64::INFINITY);
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when followed by at least one digit
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// Read a value as a calendar date.
///
/// Accepts `YYYY-MM-DD` (what date inputs produce) and RFC 3339
/// timestamps, in which case the date part is used.
pub fn parse_date(value: &Value) -> Option<NaiveDate> {
    let s = value.as_str()?.trim();
    if s.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// Whole years from `birth` to `today`.
///
/// Calendar years are subtracted, then one more is taken off when this
/// year's birthday has not happened yet. Future birth dates give a
/// negative result.
pub fn whole_years_between(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years
}
