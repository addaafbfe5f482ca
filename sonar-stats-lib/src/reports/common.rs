//! Value formatting shared across report generators.
//!
//! Every function here is total: unexpected input is passed through rather than rejected,
//! so a report can always be produced.

use crate::metrics::{MetricDef, MetricKind};
use std::borrow::Cow;

/// Shown for values that are absent.
pub const NOT_AVAILABLE: &str = "N/A";

/// Minutes in an eight hour working day.
const MINUTES_PER_DAY: i64 = 8 * 60;

const MINUTES_PER_HOUR: i64 = 60;

const RATING_LETTERS: [char; 5] = ['A', 'B', 'C', 'D', 'E'];

/// Map a quality gate status to its display label.
pub fn format_quality_gate(status: Option<&str>) -> &'static str {
    match status {
        Some(s) if s.eq_ignore_ascii_case("OK") => "PASSED",
        Some(s) if s.eq_ignore_ascii_case("ERROR") => "FAILED",
        Some(s) if s.eq_ignore_ascii_case("WARN") => "WARNING",
        _ => "UNKNOWN",
    }
}

/// Format a decimal value as a percentage with one fractional digit.
///
/// Rounding is half-up on the shortest decimal form of the value, so `12.25` becomes `12.3%`
/// even though the nearest binary value lies just below the midpoint.
pub fn format_percentage(value: Option<&str>) -> Cow<'_, str> {
    let Some(value) = value.filter(|v| *v != NOT_AVAILABLE) else {
        return Cow::Borrowed(NOT_AVAILABLE);
    };

    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Cow::Owned(format!("{}%", round_one_decimal_half_up(n))),
        _ => Cow::Borrowed(value),
    }
}

fn round_one_decimal_half_up(n: f64) -> String {
    let repr = n.abs().to_string();
    let (whole, fraction) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
    let mut fraction = fraction.bytes();
    let mut tenths = fraction.next().unwrap_or(b'0');
    let round_up = fraction.next().is_some_and(|digit| digit >= b'5');

    let mut whole = whole.as_bytes().to_vec();
    if round_up {
        if tenths == b'9' {
            tenths = b'0';
            increment_digits(&mut whole);
        } else {
            tenths += 1;
        }
    }

    let sign = if n.is_sign_negative() { "-" } else { "" };
    format!("{sign}{}.{}", String::from_utf8_lossy(&whole), char::from(tenths))
}

/// Add one to a string of ASCII decimal digits.
fn increment_digits(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

/// Format an effort in minutes as whole days, hours, or minutes.
///
/// Days are eight hour working days. Each tier uses truncating division, so 500 minutes is
/// reported as `1d`.
pub fn format_duration(minutes: Option<&str>) -> Cow<'_, str> {
    let Some(value) = minutes.filter(|v| *v != NOT_AVAILABLE) else {
        return Cow::Borrowed(NOT_AVAILABLE);
    };

    let Ok(mins) = value.parse::<i64>() else {
        return Cow::Borrowed(value);
    };

    let days = mins / MINUTES_PER_DAY;
    let hours = mins / MINUTES_PER_HOUR;
    if days > 0 {
        Cow::Owned(format!("{days}d"))
    } else if hours > 0 {
        Cow::Owned(format!("{hours}h"))
    } else {
        Cow::Owned(format!("{mins}m"))
    }
}

/// Format a rating such as `1.0` as its letter grade (`A` through `E`).
pub fn format_rating(value: Option<&str>) -> Cow<'_, str> {
    let Some(value) = value.filter(|v| *v != NOT_AVAILABLE) else {
        return Cow::Borrowed(NOT_AVAILABLE);
    };

    let letter = value.trim().parse::<f64>().ok().and_then(|n| {
        RATING_LETTERS
            .iter()
            .zip(1_u8..)
            .find(|&(_, grade)| f64::from(grade) == n)
            .map(|(letter, _)| *letter)
    });

    letter.map_or(Cow::Borrowed(value), |c| Cow::Owned(c.to_string()))
}

/// Format a metric value for the table view.
///
/// Counts default to `0` when absent; every other kind keeps `N/A` (or `UNKNOWN` for the
/// quality gate) so a missing value is distinguishable from a measured zero.
pub fn format_table_value<'a>(def: &MetricDef, value: Option<&'a str>) -> Cow<'a, str> {
    match def.kind {
        MetricKind::QualityGate => Cow::Borrowed(format_quality_gate(value)),
        MetricKind::Percentage => format_percentage(value),
        MetricKind::Duration => format_duration(value),
        MetricKind::Rating => format_rating(value),
        MetricKind::Count => Cow::Borrowed(value.unwrap_or_else(|| def.kind.table_default())),
    }
}

/// Escape a value for CSV output.
///
/// The value is wrapped in double quotes if it contains a comma, a double quote, or a newline,
/// with internal double quotes doubled. Anything else is returned unchanged.
pub fn escape_csv(s: &str) -> Cow<'_, str> {
    if s.contains('"') {
        Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
    } else if s.contains(',') || s.contains('\n') {
        Cow::Owned(format!("\"{s}\""))
    } else {
        Cow::Borrowed(s)
    }
}

/// Shorten `text` to at most `width` characters, marking the cut with `...`.
pub fn truncate(text: &str, width: usize) -> Cow<'_, str> {
    if text.chars().count() <= width {
        return Cow::Borrowed(text);
    }

    if width < 3 {
        return Cow::Owned(text.chars().take(width).collect());
    }

    let mut result: String = text.chars().take(width - 3).collect();
    result.push_str("...");
    Cow::Owned(result)
}
