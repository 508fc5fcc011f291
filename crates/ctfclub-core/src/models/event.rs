use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::RepositoryError;

/// Display status of an event, either derived from time or set by an admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub enum EventStatus {
    Upcoming,
    Active,
    Past,
}

impl EventStatus {
    pub const ALL: [EventStatus; 3] = [EventStatus::Upcoming, EventStatus::Active, EventStatus::Past];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Active => "active",
            EventStatus::Past => "past",
        }
    }

    /// Label for the card's primary button
    pub fn call_to_action(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "Register Now",
            EventStatus::Active => "Join Now",
            EventStatus::Past => "View Results",
        }
    }

    /// Only upcoming events open a registration dialog.
    pub fn accepts_registration(&self) -> bool {
        matches!(self, EventStatus::Upcoming)
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upcoming" => Ok(EventStatus::Upcoming),
            "active" => Ok(EventStatus::Active),
            "past" => Ok(EventStatus::Past),
            other => Err(format!("unknown event status '{}'", other)),
        }
    }
}

/// A competition as the rest of the crate sees it. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    #[cfg_attr(feature = "ts", ts(type = "string"))]
    pub starts_at: DateTime<Utc>,
    #[cfg_attr(feature = "ts", ts(type = "string | null"))]
    pub ends_at: Option<DateTime<Utc>>,
    pub status_override: Option<EventStatus>,
    pub registration_link: Option<String>,
}

impl Event {
    /// "Mar 01, 2026"
    pub fn formatted_date(&self) -> String {
        self.starts_at.format("%b %d, %Y").to_string()
    }

    /// "18:00"
    pub fn formatted_time(&self) -> String {
        self.starts_at.format("%H:%M").to_string()
    }

    /// "Mar 01, 2026 @ 06:00 PM", or "TBD" without an end time
    pub fn formatted_end(&self) -> String {
        match self.ends_at {
            Some(end) => end.format("%b %d, %Y @ %I:%M %p").to_string(),
            None => "TBD".to_string(),
        }
    }
}

/// Row of the `ctf_events` table as it comes over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub registration_link: Option<String>,
}

/// Parse a backend timestamp. RFC 3339 first, then naive forms read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    // Postgres text output uses a space separator and a short offset
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl EventRecord {
    /// Map a wire record to an `Event`. Missing id, title or start date is a decode failure.
    pub fn into_event(self) -> Result<Event, RepositoryError> {
        let id = non_empty(self.id)
            .ok_or_else(|| RepositoryError::Decode("event record without id".to_string()))?;

        let title = non_empty(self.title)
            .ok_or_else(|| RepositoryError::Decode(format!("event {} has no title", id)))?;

        let raw_date = self
            .date
            .ok_or_else(|| RepositoryError::Decode(format!("event {} has no date", id)))?;
        let starts_at = parse_timestamp(&raw_date).ok_or_else(|| {
            RepositoryError::Decode(format!("event {} has unparseable date '{}'", id, raw_date))
        })?;

        let ends_at = match non_empty(self.end_date) {
            Some(raw) => Some(parse_timestamp(&raw).ok_or_else(|| {
                RepositoryError::Decode(format!("event {} has unparseable end date '{}'", id, raw))
            })?),
            None => None,
        };

        let status_override = match non_empty(self.status) {
            Some(raw) => match raw.parse::<EventStatus>() {
                Ok(status) => Some(status),
                Err(e) => {
                    tracing::warn!(event = %id, error = %e, "Ignoring status override");
                    None
                }
            },
            None => None,
        };

        Ok(Event {
            id,
            title,
            description: self.description.unwrap_or_default(),
            starts_at,
            ends_at,
            status_override,
            registration_link: non_empty(self.registration_link),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(json: &str) -> EventRecord {
        serde_json::from_str(json).expect("fixture should parse")
    }

    #[test]
    fn test_into_event_full_record() {
        let event = record(
            r#"{"id":"e1","title":"Quantum Break","description":"Crypto-heavy jeopardy CTF",
                "date":"2026-03-01T18:00:00+00:00","status":null,"registration_link":"https://ctf.example/qb",
                "created_at":"2025-12-01T00:00:00+00:00"}"#,
        )
        .into_event()
        .expect("valid record");

        assert_eq!(event.id, "e1");
        assert_eq!(event.title, "Quantum Break");
        assert_eq!(event.starts_at, Utc.with_ymd_and_hms(2026, 3, 1, 18, 0, 0).unwrap());
        assert_eq!(event.status_override, None);
        assert_eq!(event.ends_at, None);
        assert_eq!(event.registration_link.as_deref(), Some("https://ctf.example/qb"));
    }

    #[test]
    fn test_into_event_override_and_blank_link() {
        let event = record(
            r#"{"id":"e2","title":"Pwn Night","date":"2025-01-10","status":"Past","registration_link":"  "}"#,
        )
        .into_event()
        .expect("valid record");

        assert_eq!(event.status_override, Some(EventStatus::Past));
        assert_eq!(event.description, "");
        assert_eq!(event.registration_link, None);
        assert_eq!(event.starts_at, Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_unknown_override_is_ignored() {
        let event = record(r#"{"id":"e3","title":"Web Warmup","date":"2026-02-01T10:00:00Z","status":"cancelled"}"#)
            .into_event()
            .expect("valid record");
        assert_eq!(event.status_override, None);
    }

    #[test]
    fn test_missing_required_fields() {
        assert!(matches!(
            record(r#"{"title":"No id","date":"2026-02-01"}"#).into_event(),
            Err(RepositoryError::Decode(_))
        ));
        assert!(matches!(
            record(r#"{"id":"e4","title":"","date":"2026-02-01"}"#).into_event(),
            Err(RepositoryError::Decode(_))
        ));
        assert!(matches!(
            record(r#"{"id":"e5","title":"No date"}"#).into_event(),
            Err(RepositoryError::Decode(_))
        ));
        assert!(matches!(
            record(r#"{"id":"e6","title":"Bad date","date":"next tuesday"}"#).into_event(),
            Err(RepositoryError::Decode(_))
        ));
    }

    #[test]
    fn test_parse_timestamp_variants() {
        let expected = Utc.with_ymd_and_hms(2026, 3, 1, 18, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2026-03-01T18:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2026-03-01T20:00:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2026-03-01 18:00:00+00"), Some(expected));
        assert_eq!(parse_timestamp("2026-03-01T18:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2026-03-01T18:00:00.000"), Some(expected));
        assert_eq!(parse_timestamp("garbage"), None);
    }

    #[test]
    fn test_status_strings() {
        assert_eq!("UPCOMING".parse::<EventStatus>(), Ok(EventStatus::Upcoming));
        assert_eq!(EventStatus::Active.to_string(), "active");
        assert!("soon".parse::<EventStatus>().is_err());
        assert_eq!(EventStatus::Past.call_to_action(), "View Results");
        assert!(EventStatus::Upcoming.accepts_registration());
        assert!(!EventStatus::Active.accepts_registration());
    }

    #[test]
    fn test_formatted_date_time() {
        let event = record(r#"{"id":"e1","title":"Quantum Break","date":"2026-03-01T18:05:00Z"}"#)
            .into_event()
            .expect("valid record");
        assert_eq!(event.formatted_date(), "Mar 01, 2026");
        assert_eq!(event.formatted_time(), "18:05");
        assert_eq!(event.formatted_end(), "TBD");
    }
}
