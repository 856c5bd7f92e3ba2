//! Scalar coercions applied to resolved wire values.
//!
//! Every function takes `Option<&Value>` where `None` means the key was absent.
//! Absent and `null` values always produce the type default; a value that is
//! present but cannot be interpreted produces the caller's fallback.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;

/// Text coercion: `null` and structured values become "", scalars are stringified
pub fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Whole-number coercion with `parseInt`-style prefix parsing for text
pub fn integer(value: Option<&Value>, fallback: i64) -> i64 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(fallback),
        Some(Value::String(s)) => leading_integer(s).unwrap_or(fallback),
        Some(_) => fallback,
    }
}

/// Decimal coercion with `parseFloat`-style prefix parsing for text
pub fn decimal(value: Option<&Value>, fallback: f64) -> f64 {
    match value {
        None | Some(Value::Null) => 0.0,
        Some(Value::Number(n)) => n.as_f64().filter(|f| f.is_finite()).unwrap_or(fallback),
        Some(Value::String(s)) => leading_decimal(s).unwrap_or(fallback),
        Some(_) => fallback,
    }
}

/// `true`, `1` and `"true"` are true; everything else is false
pub fn flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64() == Some(1.0),
        Some(Value::String(s)) => s.trim() == "true",
        _ => false,
    }
}

/// Normalize a timestamp to RFC 3339 UTC; unrecognized text is kept verbatim
pub fn timestamp(value: Option<&Value>) -> String {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(from_epoch)
            .map(format_utc)
            .unwrap_or_else(|| n.to_string()),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            parse_datetime(trimmed)
                .map(format_utc)
                .unwrap_or_else(|| trimmed.to_string())
        }
        _ => String::new(),
    }
}

/// Numbers below this are treated as epoch seconds, above as milliseconds
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

fn from_epoch(raw: i64) -> Option<DateTime<Utc>> {
    if raw.abs() < EPOCH_MILLIS_THRESHOLD {
        DateTime::from_timestamp(raw, 0)
    } else {
        DateTime::from_timestamp_millis(raw)
    }
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn format_utc(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse an optionally signed run of digits at the start of `s`
pub fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let digits_start = usize::from(s.starts_with(['-', '+']));
    let end = s[digits_start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(s.len(), |i| i + digits_start);
    if end == digits_start {
        return None;
    }
    s[..end].parse().ok()
}

/// Parse an optionally signed decimal number at the start of `s`
pub fn leading_decimal(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let mut end = usize::from(s.starts_with(['-', '+']));
    let mut seen_digit = false;
    let mut seen_dot = false;
    for c in s[end..].chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return None;
    }
    s[..end].trim_end_matches('.').parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_coercion() {
        assert_eq!(text(None), "");
        assert_eq!(text(Some(&Value::Null)), "");
        assert_eq!(text(Some(&json!("Pad Thai"))), "Pad Thai");
        assert_eq!(text(Some(&json!(42))), "42");
        assert_eq!(text(Some(&json!(true))), "true");
        assert_eq!(text(Some(&json!({"nested": 1}))), "");
        assert_eq!(text(Some(&json!(["a"]))), "");
    }

    #[test]
    fn test_integer_absent_is_zero_but_garbage_uses_fallback() {
        assert_eq!(integer(None, 30), 0);
        assert_eq!(integer(Some(&Value::Null), 30), 0);
        assert_eq!(integer(Some(&json!("soon")), 30), 30);
        assert_eq!(integer(Some(&json!("")), 30), 30);
        assert_eq!(integer(Some(&json!([])), 30), 30);
    }

    #[test]
    fn test_integer_parses_textual_prefixes() {
        assert_eq!(integer(Some(&json!("45")), 30), 45);
        assert_eq!(integer(Some(&json!(" 45 min")), 30), 45);
        assert_eq!(integer(Some(&json!("-3")), 30), -3);
        assert_eq!(integer(Some(&json!(12.9)), 30), 12);
    }

    #[test]
    fn test_decimal_coercion() {
        assert_eq!(decimal(None, 9.0), 0.0);
        assert_eq!(decimal(Some(&json!(4.5)), 0.0), 4.5);
        assert_eq!(decimal(Some(&json!("12.50 USD")), 0.0), 12.5);
        assert_eq!(decimal(Some(&json!(".5")), 0.0), 0.5);
        assert_eq!(decimal(Some(&json!("7.")), 0.0), 7.0);
        assert_eq!(decimal(Some(&json!("free")), 1.0), 1.0);
    }

    #[test]
    fn test_flag_coercion() {
        assert!(flag(Some(&json!(true))));
        assert!(flag(Some(&json!(1))));
        assert!(flag(Some(&json!("true"))));
        assert!(!flag(Some(&json!(false))));
        assert!(!flag(Some(&json!(0))));
        assert!(!flag(Some(&json!(2))));
        assert!(!flag(Some(&json!("yes"))));
        assert!(!flag(Some(&Value::Null)));
        assert!(!flag(None));
    }

    #[test]
    fn test_timestamp_formats() {
        assert_eq!(
            timestamp(Some(&json!("2024-03-01T10:15:00+02:00"))),
            "2024-03-01T08:15:00Z"
        );
        assert_eq!(
            timestamp(Some(&json!("2024-03-01 10:15:00"))),
            "2024-03-01T10:15:00Z"
        );
        assert_eq!(timestamp(Some(&json!("2024-03-01"))), "2024-03-01T00:00:00Z");
        assert_eq!(timestamp(Some(&json!(1_709_287_200_000_i64))), "2024-03-01T10:00:00Z");
        assert_eq!(timestamp(Some(&json!(1_709_287_200_i64))), "2024-03-01T10:00:00Z");
    }

    #[test]
    fn test_timestamp_keeps_unrecognized_text() {
        assert_eq!(timestamp(Some(&json!("last tuesday"))), "last tuesday");
        assert_eq!(timestamp(Some(&Value::Null)), "");
        assert_eq!(timestamp(None), "");
    }

    #[test]
    fn test_leading_number_helpers() {
        assert_eq!(leading_integer("+12abc"), Some(12));
        assert_eq!(leading_integer("-"), None);
        assert_eq!(leading_integer("abc"), None);
        assert_eq!(leading_decimal("-1.25.3"), Some(-1.25));
        assert_eq!(leading_decimal("."), None);
    }
}
