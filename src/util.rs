// Small parsing and formatting helpers shared by the pipelines and the
// report output.
use crate::error::{AnalysisError, Result};
use chrono::NaiveDate;
use num_format::{Locale, ToFormattedString};

/// Parse a non-empty score field. Blank fields are filtered out by the
/// callers before this is reached, so anything unparsable here is fatal.
pub fn parse_score(raw: &str, column: &str, line: u64) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| AnalysisError::ParseFloat {
            column: column.to_string(),
            line,
            value: raw.to_string(),
        })
}

pub fn parse_date_safe(s: Option<&str>) -> Option<NaiveDate> {
    // Release dates are expected in `YYYY-MM-DD` format.
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// First four characters of a date field. Shorter fields come back whole and
/// simply never match a year in the window.
pub fn year_prefix(date: &str) -> &str {
    match date.char_indices().nth(4) {
        Some((end, _)) => &date[..end],
        None => date,
    }
}

/// Round to two decimal places, exact ties to the even digit.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round_ties_even() / 100.0
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimals with locale-aware thousands separators (`1,234.56`).
    let neg = n.is_sign_negative() && n != 0.0;
    let s = format!("{:.*}", decimals, n.abs());
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let int_val: u64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = parts.next() {
        res.push('.');
        res.push_str(frac);
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}
