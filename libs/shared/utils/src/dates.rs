use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid calendar date: {0}")]
pub struct DateParseError(pub String);

/// Reads a calendar day from either `YYYY-MM-DD` or an RFC 3339 timestamp.
/// For a timestamp the time of day is dropped and the date is taken as written.
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    let timestamp = DateTime::parse_from_rfc3339(trimmed)
        .map_err(|_| DateParseError(trimmed.to_string()))?;
    debug!("Read {} as a timestamp, keeping its date only", trimmed);

    Ok(timestamp.date_naive())
}

/// `dd/mm/yyyy`, as the pt-BR locale prints dates.
pub fn format_pt_br(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn deserialize_calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw).map_err(serde::de::Error::custom)
}

pub fn deserialize_optional_calendar_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => parse_calendar_date(&raw)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}
