/// Calendar API client implementing the event source
use async_trait::async_trait;
use reqwest::Method;
use timeweave_core::sync::ports::EventSource;
use timeweave_domain::{CalendarEventRecord, Result, SyncWindow, TimeweaveError};
use tracing::debug;
use uuid::Uuid;

use crate::http::HttpClient;

use super::types::{EventDto, EventListDto};

/// Client for a Google-style calendar events API.
pub struct CalendarClient {
    http_client: HttpClient,
    base_url: String,
    token: String,
}

impl CalendarClient {
    pub fn new(
        http_client: HttpClient,
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self { http_client, base_url: base_url.into(), token: token.into() }
    }
}

fn to_record(event: EventDto) -> CalendarEventRecord {
    let is_all_day = event.start.date.is_some();
    let start = event.start.date_time.or(event.start.date).unwrap_or_default();
    let end = event.end.date_time.or(event.end.date).unwrap_or_default();

    CalendarEventRecord {
        // Some providers omit ids on recurring instances; synthesize one so
        // the classification batch can still address the item.
        id: event.id.unwrap_or_else(|| Uuid::now_v7().to_string()),
        summary: event.summary,
        start,
        end,
        is_all_day,
    }
}

#[async_trait]
impl EventSource for CalendarClient {
    async fn list_events(
        &self,
        window: &SyncWindow,
        calendar_id: &str,
    ) -> Result<Vec<CalendarEventRecord>> {
        let url = format!("{}/calendars/{}/events", self.base_url, calendar_id);
        let request = self
            .http_client
            .request(Method::GET, &url)
            .header("Authorization", format!("Bearer {}", self.token))
            .query(&[
                ("timeMin", window.start.to_rfc3339()),
                ("timeMax", window.end.to_rfc3339()),
                ("singleEvents", "true".to_string()),
                ("orderBy", "startTime".to_string()),
                ("fields", "items(id,summary,start,end)".to_string()),
            ]);

        let response = self.http_client.send(request).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(match status.as_u16() {
                401 | 403 => TimeweaveError::Auth(format!("calendar auth failed ({status})")),
                _ => TimeweaveError::Network(format!("calendar API error ({status}): {body}")),
            });
        }

        let listing: EventListDto = response.json().await.map_err(|e| {
            TimeweaveError::InvalidInput(format!("failed to parse calendar response: {e}"))
        })?;

        debug!(count = listing.items.len(), calendar_id, "fetched calendar events");
        Ok(listing.items.into_iter().map(to_record).collect())
    }
}
