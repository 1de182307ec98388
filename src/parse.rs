//! Lenient parsing for the loosely-typed fields of vehicle records.
//!
//! Prices arrive as decimal strings and dates as ISO-ish strings of several
//! shapes. Nothing here fails: a value that cannot be read becomes `0.0` or
//! the Unix epoch and a [`ParseWarning`] is logged, so one bad record never
//! aborts a filtering or aggregation pass.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Non-fatal problem found while reading a vehicle field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    Price { raw: String },
    Timestamp { raw: String },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::Price { raw } => write!(f, "unparsable price {:?}, using 0", raw),
            ParseWarning::Timestamp { raw } => {
                write!(f, "unparsable timestamp {:?}, using epoch", raw)
            }
        }
    }
}

impl ParseWarning {
    fn log(&self) {
        tracing::warn!(warning = %self, "vehicle field parse warning");
    }
}

/// Formats tried, in order, for timestamps without an offset.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Formats tried for timestamps carrying a short offset such as `+00`.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

/// Reads the longest leading decimal number, so `"1200.50 obo"` is `1200.5`.
///
/// `None` when the trimmed input does not start with a number.
pub fn try_price(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let len = numeric_prefix_len(trimmed.as_bytes());
    if len == 0 {
        return None;
    }
    trimmed[..len]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Byte length of `[+-]digits[.digits][(e|E)[+-]digits]` at the start of
/// `bytes`, or 0 when no digit is present in the mantissa.
fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let whole = digits_from(end);
    end += whole;

    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits_from(end + 1);
        if whole > 0 || fraction > 0 {
            end += 1 + fraction;
        }
    }
    if whole == 0 && fraction == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits_from(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }
    end
}

/// Parse a price, falling back to `0.0` with a logged warning.
pub fn price_or_zero(raw: &str) -> f64 {
    match try_price(raw) {
        Some(value) => value,
        None => {
            ParseWarning::Price {
                raw: raw.to_string(),
            }
            .log();
            0.0
        }
    }
}

/// Strict timestamp parse.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS[.fff][+zz]` as emitted by Postgres,
/// offset-less ISO timestamps (read as UTC) and bare dates (midnight UTC).
pub fn try_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(trimmed, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(Utc.from_utc_datetime(&parsed));
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

/// Parse a timestamp, falling back to the Unix epoch with a logged warning.
pub fn timestamp_or_epoch(raw: &str) -> DateTime<Utc> {
    match try_timestamp(raw) {
        Some(value) => value,
        None => {
            ParseWarning::Timestamp {
                raw: raw.to_string(),
            }
            .log();
            DateTime::UNIX_EPOCH
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn price_accepts_decimal_strings() {
        assert_eq!(try_price("1500"), Some(1500.0));
        assert_eq!(try_price(" 249.99 "), Some(249.99));
        assert_eq!(try_price("-20"), Some(-20.0));
        assert_eq!(try_price("1.5e3"), Some(1500.0));
    }

    #[test]
    fn price_reads_leading_number() {
        assert_eq!(try_price("1200.50 obo"), Some(1200.5));
        assert_eq!(try_price("500 USD"), Some(500.0));
        assert_eq!(try_price("12,000"), Some(12.0));
        assert_eq!(try_price(".5k"), Some(0.5));
        assert_eq!(try_price("7."), Some(7.0));
        assert_eq!(try_price("3e"), Some(3.0));
        assert_eq!(try_price("2e+x"), Some(2.0));
        assert_eq!(price_or_zero("  80 firm"), 80.0);
    }

    #[test]
    fn price_rejects_garbage() {
        assert_eq!(try_price(""), None);
        assert_eq!(try_price("$500"), None);
        assert_eq!(try_price("NaN"), None);
        assert_eq!(try_price("inf"), None);
        assert_eq!(try_price("Infinity"), None);
        assert_eq!(try_price("-"), None);
        assert_eq!(try_price("."), None);
        assert_eq!(try_price("1e999"), None);
        assert_eq!(price_or_zero("n/a"), 0.0);
    }

    #[test]
    fn timestamp_shapes() {
        let rfc = try_timestamp("2024-03-05T10:15:00Z").unwrap();
        assert_eq!(rfc.hour(), 10);

        let offset = try_timestamp("2024-03-05T10:15:00-02:00").unwrap();
        assert_eq!(offset.hour(), 12);

        let postgres = try_timestamp("2024-03-05 10:15:00.123+00").unwrap();
        assert_eq!(postgres.minute(), 15);

        let naive = try_timestamp("2024-03-05T10:15:00").unwrap();
        assert_eq!(naive.hour(), 10);

        let date = try_timestamp("2024-03-05").unwrap();
        assert_eq!(date.hour(), 0);
        assert_eq!(date.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn malformed_timestamp_falls_back_to_epoch() {
        assert!(try_timestamp("yesterday").is_none());
        assert_eq!(timestamp_or_epoch("yesterday"), DateTime::UNIX_EPOCH);
        assert_eq!(timestamp_or_epoch("2024-13-40"), DateTime::UNIX_EPOCH);
    }
}
