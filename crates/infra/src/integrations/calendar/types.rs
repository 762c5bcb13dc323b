/// Wire types for the calendar events API
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct EventListDto {
    #[serde(default)]
    pub items: Vec<EventDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EventDto {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    pub start: EventTimeDto,
    pub end: EventTimeDto,
}

/// Timed events carry `dateTime`; all-day events carry only `date`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct EventTimeDto {
    #[serde(rename = "dateTime", default)]
    pub date_time: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_timed_event() {
        let json = r#"{
            "id": "ev1",
            "summary": "Daily Standup",
            "start": { "dateTime": "2024-01-01T10:00:00Z" },
            "end": { "dateTime": "2024-01-01T10:15:00Z" }
        }"#;

        let event: EventDto = serde_json::from_str(json).expect("should deserialize");

        assert_eq!(event.summary.as_deref(), Some("Daily Standup"));
        assert_eq!(event.start.date_time.as_deref(), Some("2024-01-01T10:00:00Z"));
        assert_eq!(event.start.date, None);
    }

    #[test]
    fn deserializes_all_day_event() {
        let json = r#"{
            "id": "ev2",
            "start": { "date": "2024-01-01" },
            "end": { "date": "2024-01-02" }
        }"#;

        let event: EventDto = serde_json::from_str(json).expect("should deserialize");

        assert_eq!(event.summary, None);
        assert_eq!(event.start.date.as_deref(), Some("2024-01-01"));
        assert_eq!(event.start.date_time, None);
    }
}
