//! Value formatting shared by the card renderers.

use chrono::{DateTime, FixedOffset};
use serde_json::Value;

/// Shown for a missing timestamp.
pub const NOT_SPECIFIED: &str = "Не указано";

/// Epoch values above this are milliseconds.
const MILLIS_THRESHOLD: f64 = 10_000_000_000.0;

const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Format an epoch timestamp (seconds or milliseconds, number or numeric
/// string) as `dd.mm.YYYY HH:MM` in `tz`.
///
/// Anything that is not a number comes back as its own text.
pub fn format_timestamp(value: &Value, tz: &FixedOffset) -> String {
    let raw = match value {
        Value::Null => return NOT_SPECIFIED.to_string(),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    let Some(mut secs) = raw.filter(|v| v.is_finite()) else {
        return display_value(value).trim().to_string();
    };

    if secs > MILLIS_THRESHOLD {
        secs /= 1000.0;
    }

    epoch_to_datetime(secs).map_or_else(
        || display_value(value),
        |dt| dt.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string(),
    )
}

#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
fn epoch_to_datetime(secs: f64) -> Option<DateTime<chrono::Utc>> {
    DateTime::from_timestamp(secs.floor() as i64, 0)
}

/// Text form of a JSON scalar: strings unquoted, booleans capitalized,
/// everything else as JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Offset, Utc};
    use serde_json::json;

    use super::*;

    fn utc() -> FixedOffset {
        Utc.fix()
    }

    #[test]
    fn seconds_and_millis_agree() {
        let secs = format_timestamp(&json!(1_700_000_000), &utc());
        let millis = format_timestamp(&json!(1_700_000_000_000_i64), &utc());
        assert_eq!(secs, millis);
        assert_eq!(secs, "14.11.2023 22:13");
    }

    #[test]
    fn numeric_strings_are_parsed() {
        assert_eq!(format_timestamp(&json!(" 1700000000 "), &utc()), "14.11.2023 22:13");
    }

    #[test]
    fn offset_is_applied() {
        let msk = FixedOffset::east_opt(3 * 3600).unwrap();
        assert_eq!(format_timestamp(&json!(1_700_000_000), &msk), "15.11.2023 01:13");
    }

    #[test]
    fn null_and_garbage() {
        assert_eq!(format_timestamp(&Value::Null, &utc()), NOT_SPECIFIED);
        assert_eq!(format_timestamp(&json!("вчера"), &utc()), "вчера");
        assert_eq!(format_timestamp(&json!(true), &utc()), "True");
    }

    #[test]
    fn display_values() {
        assert_eq!(display_value(&json!("abc")), "abc");
        assert_eq!(display_value(&json!(12)), "12");
        assert_eq!(display_value(&json!(1.5)), "1.5");
        assert_eq!(display_value(&json!(false)), "False");
        assert_eq!(display_value(&json!(true)), "True");
    }
}
