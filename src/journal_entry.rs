use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::EntryError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default = "unknown")]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default = "unknown")]
    pub country: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

fn unknown() -> String {
    "Unknown".to_string()
}

impl Default for Location {
    fn default() -> Self {
        Location {
            city: unknown(),
            state: String::new(),
            country: unknown(),
            lat: None,
            lon: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl JournalEntry {
    pub fn new(
        title: String,
        content: String,
        location: Option<Location>,
    ) -> Result<Self, EntryError> {
        Self::created_at(Local::now(), title, content, location)
    }

    /// Builds an entry stamped with `now`; the id is the millisecond timestamp,
    /// so two entries created within the same millisecond share an id.
    pub fn created_at(
        now: DateTime<Local>,
        title: String,
        content: String,
        location: Option<Location>,
    ) -> Result<Self, EntryError> {
        if content.trim().is_empty() {
            return Err(EntryError::EmptyContent);
        }

        let timestamp = now.timestamp_millis();
        Ok(JournalEntry {
            id: timestamp.to_string(),
            title: title.trim().to_string(),
            content,
            date: now.format("%Y-%m-%d").to_string(),
            timestamp,
            location,
        })
    }

    pub fn apply(&mut self, update: &EntryUpdate) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(content) = &update.content {
            self.content = content.clone();
        }
    }
}

/// Partial edit of the mutable fields of an entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl EntryUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 30, 0).unwrap()
    }

    #[test]
    fn id_and_date_derive_from_creation_time() {
        let now = fixed_now();
        let entry =
            JournalEntry::created_at(now, "Day one".into(), "Learned traits".into(), None)
                .unwrap();

        assert_eq!(entry.timestamp, now.timestamp_millis());
        assert_eq!(entry.id, now.timestamp_millis().to_string());
        assert_eq!(entry.date, "2024-03-09");
        assert_eq!(entry.title, "Day one");
    }

    #[test]
    fn same_millisecond_means_same_id() {
        let now = fixed_now();
        let a = JournalEntry::created_at(now, "a".into(), "one".into(), None).unwrap();
        let b = JournalEntry::created_at(now, "b".into(), "two".into(), None).unwrap();
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn only_id_is_required_when_reading() {
        let entry: JournalEntry = serde_json::from_str(r#"{"id":"7","title":"bare"}"#).unwrap();
        assert_eq!(entry.content, "");
        assert_eq!(entry.date, "");
        assert_eq!(entry.timestamp, 0);
        assert!(serde_json::from_str::<JournalEntry>(r#"{"title":"no id"}"#).is_err());
    }

    #[test]
    fn blank_content_is_rejected() {
        let err = JournalEntry::created_at(fixed_now(), "t".into(), "   \n".into(), None)
            .unwrap_err();
        assert!(matches!(err, EntryError::EmptyContent));
    }

    #[test]
    fn sparse_json_fills_defaults() {
        let entry: JournalEntry = serde_json::from_str(
            r#"{"id":"1","content":"c","date":"2024-01-01","timestamp":1,"location":{"lat":51.5}}"#,
        )
        .unwrap();

        assert_eq!(entry.title, "");
        let location = entry.location.unwrap();
        assert_eq!(location.city, "Unknown");
        assert_eq!(location.country, "Unknown");
        assert_eq!(location.state, "");
        assert_eq!(location.lat, Some(51.5));
        assert_eq!(location.lon, None);
    }

    #[test]
    fn apply_touches_only_given_fields() {
        let mut entry =
            JournalEntry::created_at(fixed_now(), "old".into(), "body".into(), None).unwrap();
        let id = entry.id.clone();
        let timestamp = entry.timestamp;

        entry.apply(&EntryUpdate {
            title: Some("new".into()),
            content: None,
        });

        assert_eq!(entry.title, "new");
        assert_eq!(entry.content, "body");
        assert_eq!(entry.id, id);
        assert_eq!(entry.timestamp, timestamp);
    }

    #[test]
    fn update_payload_omits_absent_fields() {
        let update = EntryUpdate {
            title: None,
            content: Some("edited".into()),
        };
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"content":"edited"}"#
        );
    }
}
