//! Agenda entry type and its JSON wire format.
//!
//! Entries serialize as `{"date": "YYYY-MM-DD", "time": "HH:MM - HH:MM",
//! "task": "...", "type": "study"|"break"}` so a persisted agenda reloads
//! verbatim. The in-memory type keeps the start/end times as proper
//! time-of-day values.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Kind of agenda entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Study,
    Break,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Study => "study",
            EntryKind::Break => "break",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "study" => Some(EntryKind::Study),
            "break" => Some(EntryKind::Break),
            _ => None,
        }
    }
}

/// One scheduled slot in the agenda. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaEntry {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub label: String,
    pub kind: EntryKind,
}

impl AgendaEntry {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// The `"HH:MM - HH:MM"` range used on the wire.
    pub fn time_range(&self) -> String {
        format!(
            "{} - {}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

#[derive(Serialize)]
struct WireEntry<'a> {
    date: NaiveDate,
    time: String,
    task: &'a str,
    #[serde(rename = "type")]
    kind: EntryKind,
}

#[derive(Deserialize)]
struct WireEntryOwned {
    date: NaiveDate,
    time: String,
    task: String,
    #[serde(rename = "type")]
    kind: EntryKind,
}

impl Serialize for AgendaEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireEntry {
            date: self.date,
            time: self.time_range(),
            task: &self.label,
            kind: self.kind,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AgendaEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireEntryOwned::deserialize(deserializer)?;
        let (start, end) = parse_time_range(&wire.time)
            .ok_or_else(|| serde::de::Error::custom(format!("bad time range: {}", wire.time)))?;
        Ok(AgendaEntry {
            date: wire.date,
            start,
            end,
            label: wire.task,
            kind: wire.kind,
        })
    }
}

fn parse_time_range(range: &str) -> Option<(NaiveTime, NaiveTime)> {
    let (start, end) = range.split_once(" - ")?;
    Some((
        NaiveTime::parse_from_str(start, "%H:%M").ok()?,
        NaiveTime::parse_from_str(end, "%H:%M").ok()?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> AgendaEntry {
        AgendaEntry {
            date: NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            label: "Math: Chapter 4".to_string(),
            kind: EntryKind::Study,
        }
    }

    #[test]
    fn wire_format_shape() {
        let json = serde_json::to_value(entry()).unwrap();
        assert_eq!(json["date"], "2026-08-06");
        assert_eq!(json["time"], "09:00 - 10:00");
        assert_eq!(json["task"], "Math: Chapter 4");
        assert_eq!(json["type"], "study");
    }

    #[test]
    fn wire_roundtrip() {
        let original = entry();
        let json = serde_json::to_string(&original).unwrap();
        let decoded: AgendaEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn rejects_bad_time_range() {
        let json = r#"{"date":"2026-08-06","time":"9am to 10am","task":"x","type":"study"}"#;
        assert!(serde_json::from_str::<AgendaEntry>(json).is_err());
    }

    #[test]
    fn duration_minutes() {
        assert_eq!(entry().duration_minutes(), 60);
    }
}
