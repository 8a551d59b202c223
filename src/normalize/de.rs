//! Lenient number deserializers. Upstreams send counters as integers,
//! floats or display strings (`"4,159"`, `"12345"`), sometimes in one payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Deserialize)]
#[serde(untagged)]
enum Flexible {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
}

impl Flexible {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Flexible::Unsigned(n) => Some(*n as f64),
            Flexible::Signed(n) => Some(*n as f64),
            Flexible::Float(n) => Some(*n),
            Flexible::Text(s) => parse_display_number(s),
        }
    }

    fn as_u64(&self) -> Option<u64> {
        match self {
            Flexible::Unsigned(n) => Some(*n),
            Flexible::Signed(n) => u64::try_from(*n).ok(),
            other => other
                .as_f64()
                .filter(|n| n.is_finite() && *n >= 0.0)
                .map(|n| n.round() as u64),
        }
    }
}

/// `"4,159"` and `" 12 "` parse; `"-"`, `""` and `"N/A"` do not.
pub fn parse_display_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse().ok()
}

/// A JSON value read as a number, accepting numeric strings.
pub fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_display_number(s),
        _ => None,
    }
}

pub fn opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Flexible> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|v| v.as_u64()))
}

pub fn u64_or_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_u64(deserializer)?.unwrap_or(0))
}

pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Flexible> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|v| v.as_f64()))
}

pub fn opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_u64(deserializer)?.and_then(|n| u32::try_from(n).ok()))
}

/// Millisecond epoch timestamp.
pub fn opt_timestamp_ms<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Flexible> = Option::deserialize(deserializer)?;
    Ok(raw
        .and_then(|v| v.as_f64())
        .and_then(|ms| DateTime::from_timestamp_millis(ms as i64)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "opt_u64")]
        count: Option<u64>,
        #[serde(default, deserialize_with = "opt_f64")]
        mmr: Option<f64>,
        #[serde(default, deserialize_with = "u64_or_zero")]
        wins: u64,
        #[serde(default, deserialize_with = "opt_timestamp_ms")]
        at: Option<DateTime<Utc>>,
    }

    fn row(value: Value) -> Row {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_accepts_every_number_spelling() {
        assert_eq!(row(json!({"count": 12})).count, Some(12));
        assert_eq!(row(json!({"count": "12"})).count, Some(12));
        assert_eq!(row(json!({"count": "1,234"})).count, Some(1234));
        assert_eq!(row(json!({"count": 12.0})).count, Some(12));
        assert_eq!(row(json!({"mmr": "4,159"})).mmr, Some(4159.0));
        assert_eq!(row(json!({"mmr": 3012.5})).mmr, Some(3012.5));
    }

    #[test]
    fn test_unusable_values_become_none() {
        assert_eq!(row(json!({"count": "-"})).count, None);
        assert_eq!(row(json!({"count": -3})).count, None);
        assert_eq!(row(json!({"count": null})).count, None);
        assert_eq!(row(json!({})).count, None);
        assert_eq!(row(json!({"wins": "N/A"})).wins, 0);
    }

    #[test]
    fn test_timestamp_ms() {
        let at = row(json!({"at": 1_700_000_000_000u64})).at.unwrap();
        assert_eq!(at.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_value_as_f64() {
        assert_eq!(value_as_f64(&json!(3200)), Some(3200.0));
        assert_eq!(value_as_f64(&json!("3,200")), Some(3200.0));
        assert_eq!(value_as_f64(&json!(true)), None);
    }
}
