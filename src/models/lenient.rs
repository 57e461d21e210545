//! Lenient field decoding
//!
//! Plan records come from hand-entered or AI-generated JSON. Numeric fields
//! that are missing, null, or not numbers decode as zero instead of failing
//! the whole plan.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberRepr {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Decode a number, a numeric string, or anything else as 0
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NumberRepr::deserialize(deserializer)? {
        NumberRepr::Number(n) => n,
        NumberRepr::Text(s) => s.trim().parse().unwrap_or(0.0),
        NumberRepr::Other(_) => 0.0,
    })
}

/// Decode a duration in minutes: a number, or text such as "30 min"
pub fn minutes<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NumberRepr::deserialize(deserializer)? {
        NumberRepr::Number(n) => n,
        NumberRepr::Text(s) => parse_leading_minutes(&s),
        NumberRepr::Other(_) => 0.0,
    })
}

/// Decode a number or numeric string; anything else is "not set"
pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NumberRepr::deserialize(deserializer)? {
        NumberRepr::Number(n) => Some(n),
        NumberRepr::Text(s) => s.trim().parse().ok(),
        NumberRepr::Other(_) => None,
    })
}

/// Decode an optional positive count (sets, reps); anything else is absent
pub fn count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NumberRepr::deserialize(deserializer)? {
        NumberRepr::Number(n) if n >= 1.0 && n <= u32::MAX as f64 => Some(n as u32),
        NumberRepr::Text(s) => s.trim().parse::<u32>().ok().filter(|n| *n > 0),
        _ => None,
    })
}

/// Read the integer prefix of the first word ("30 min" -> 30, "abc" -> 0)
pub fn parse_leading_minutes(text: &str) -> f64 {
    let word = text.split_whitespace().next().unwrap_or("");
    let (sign, digits) = match word.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, word.strip_prefix('+').unwrap_or(word)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end]
        .parse::<f64>()
        .map(|n| sign * n)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "number")]
        value: f64,
        #[serde(default, deserialize_with = "minutes")]
        duration: f64,
        #[serde(default, deserialize_with = "count")]
        sets: Option<u32>,
    }

    fn probe(json: &str) -> Probe {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parse_leading_minutes() {
        assert_eq!(parse_leading_minutes("30 min"), 30.0);
        assert_eq!(parse_leading_minutes("12.5 minutes"), 12.0);
        assert_eq!(parse_leading_minutes("  5"), 5.0);
        assert_eq!(parse_leading_minutes("-3 min"), -3.0);
        assert_eq!(parse_leading_minutes("min"), 0.0);
        assert_eq!(parse_leading_minutes(""), 0.0);
    }

    #[test]
    fn test_number_accepts_numbers_and_numeric_text() {
        assert_eq!(probe(r#"{"value": 320}"#).value, 320.0);
        assert_eq!(probe(r#"{"value": "12.5"}"#).value, 12.5);
        assert_eq!(probe(r#"{"value": -4}"#).value, -4.0);
    }

    #[test]
    fn test_number_degrades_to_zero() {
        assert_eq!(probe(r#"{"value": null}"#).value, 0.0);
        assert_eq!(probe(r#"{"value": "lots"}"#).value, 0.0);
        assert_eq!(probe(r#"{"value": [1, 2]}"#).value, 0.0);
        assert_eq!(probe(r#"{}"#).value, 0.0);
    }

    #[test]
    fn test_minutes_from_text() {
        assert_eq!(probe(r#"{"duration": "30 min"}"#).duration, 30.0);
        assert_eq!(probe(r#"{"duration": 15}"#).duration, 15.0);
        assert_eq!(probe(r#"{"duration": true}"#).duration, 0.0);
    }

    #[test]
    fn test_count_requires_positive() {
        assert_eq!(probe(r#"{"sets": 3}"#).sets, Some(3));
        assert_eq!(probe(r#"{"sets": null}"#).sets, None);
        assert_eq!(probe(r#"{"sets": 0}"#).sets, None);
        assert_eq!(probe(r#"{"sets": "4"}"#).sets, Some(4));
        assert_eq!(probe(r#"{}"#).sets, None);
    }
}
