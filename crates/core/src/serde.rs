//! Serde helper functions for profile payloads.
//!
//! The backend and the QR payload both use empty strings for "not set", and
//! dates may arrive either as bare `YYYY-MM-DD` or as full timestamps. These
//! helpers normalize both into `Option`s.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Blank or missing strings become `None`.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Blank or missing dates become `None`; anything else must parse.
///
/// Accepts `YYYY-MM-DD` as well as timestamps that start with a date
/// (`1990-05-01T00:00:00.000Z`); the time part is discarded.
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if !s.trim().is_empty() => parse_calendar_date(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {s}"))),
        _ => Ok(None),
    }
}

/// Missing or `null` strings become empty.
pub fn deserialize_string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.unwrap_or_default())
}

/// Deserialize an identifier that may be a JSON string or number.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// Parses the calendar date at the start of `value`.
///
/// Returns `None` when the first ten characters are not a valid `YYYY-MM-DD`.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        bio: Option<String>,
        #[serde(default, deserialize_with = "deserialize_optional_date")]
        born: Option<NaiveDate>,
    }

    #[derive(Debug, Deserialize)]
    struct Padded {
        #[serde(default, deserialize_with = "deserialize_string_or_empty")]
        note: String,
    }

    #[derive(Debug, Deserialize)]
    struct Keyed {
        #[serde(deserialize_with = "deserialize_id")]
        id: String,
    }

    fn row(raw: &str) -> Row {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_blank_strings_are_unset() {
        assert_eq!(row(r#"{"bio": ""}"#).bio, None);
        assert_eq!(row(r#"{"bio": " \t "}"#).bio, None);
        assert_eq!(row(r#"{"bio": null}"#).bio, None);
        assert_eq!(row("{}").bio, None);
    }

    #[test]
    fn test_strings_are_kept_verbatim() {
        assert_eq!(row(r#"{"bio": " Pilot "}"#).bio.as_deref(), Some(" Pilot "));
    }

    #[test]
    fn test_dates_accept_bare_and_timestamp() {
        let expected = NaiveDate::from_ymd_opt(1984, 11, 30);
        assert_eq!(row(r#"{"born": "1984-11-30"}"#).born, expected);
        assert_eq!(row(r#"{"born": "1984-11-30T22:15:00.000Z"}"#).born, expected);
        assert_eq!(row(r#"{"born": ""}"#).born, None);
    }

    #[test]
    fn test_unparsable_date_is_rejected() {
        let parsed = serde_json::from_str::<Row>(r#"{"born": "30/11/1984"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_null_or_missing_string_is_empty() {
        let padded: Padded = serde_json::from_str(r#"{"note": null}"#).unwrap();
        assert_eq!(padded.note, "");
        let padded: Padded = serde_json::from_str("{}").unwrap();
        assert_eq!(padded.note, "");
        let padded: Padded = serde_json::from_str(r#"{"note": "hi"}"#).unwrap();
        assert_eq!(padded.note, "hi");
    }

    #[test]
    fn test_ids_from_text_or_number() {
        let keyed: Keyed = serde_json::from_str(r#"{"id": "u-17"}"#).unwrap();
        assert_eq!(keyed.id, "u-17");
        let keyed: Keyed = serde_json::from_str(r#"{"id": 17}"#).unwrap();
        assert_eq!(keyed.id, "17");
    }

    #[test]
    fn test_parse_calendar_date_rejects_short_input() {
        assert_eq!(parse_calendar_date("1984-11"), None);
        assert_eq!(parse_calendar_date(""), None);
        assert_eq!(
            parse_calendar_date("  2001-02-03  "),
            NaiveDate::from_ymd_opt(2001, 2, 3)
        );
    }
}
