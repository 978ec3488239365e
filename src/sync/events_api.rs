use crate::calendar::{Event, EventId, NewEvent};
use crate::storage::config::ApiConfig;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventsApi: Send + Sync {
    async fn list_events(&self) -> Result<Vec<Event>, ApiError>;

    async fn create_event(&self, event: &NewEvent) -> Result<Event, ApiError>;

    async fn update_event(&self, event: &Event) -> Result<Event, ApiError>;

    async fn delete_event(&self, id: EventId) -> Result<(), ApiError>;
}

pub struct HttpEventsClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpEventsClient {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/events", self.base_url)
    }

    fn event_url(&self, id: EventId) -> String {
        format!("{}/events/{}", self.base_url, id)
    }

    // The delete route has always been served without the `/events` segment.
    fn delete_url(&self, id: EventId) -> String {
        format!("{}/{}", self.base_url, id)
    }

    async fn parse_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        operation: &str,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            tracing::error!("Failed to {}. Status: {}, Body: {}", operation, status, body);
            return Err(ApiError::RequestError(format!("Status {}: {}", status, body)));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::ParseError(e.to_string()))
    }
}

impl Default for HttpEventsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventsApi for HttpEventsClient {
    async fn list_events(&self) -> Result<Vec<Event>, ApiError> {
        let url = self.collection_url();
        tracing::info!("Fetching events from {}", url);

        let response = self.client.get(&url).send().await?;
        tracing::info!("Fetch events response status: {}", response.status());

        let events: Vec<Event> = Self::parse_json(response, "fetch events").await?;
        tracing::info!("Fetched {} events successfully", events.len());
        Ok(events)
    }

    async fn create_event(&self, event: &NewEvent) -> Result<Event, ApiError> {
        let url = self.collection_url();
        tracing::info!("Creating event: {} starting {}", event.title, event.date_start);
        tracing::debug!("POST {} with payload: {:?}", url, event);

        let response = self.client.post(&url).json(event).send().await?;
        tracing::info!("Create event response status: {}", response.status());

        let created: Event = Self::parse_json(response, "create event").await?;
        tracing::info!("Event created successfully with ID: {}", created.id);
        Ok(created)
    }

    async fn update_event(&self, event: &Event) -> Result<Event, ApiError> {
        let url = self.event_url(event.id);
        tracing::info!("Updating event {}: {}", event.id, event.title);
        tracing::debug!("PUT {} with payload: {:?}", url, event);

        let response = self.client.put(&url).json(event).send().await?;
        tracing::info!("Update event response status: {}", response.status());

        let updated: Event = Self::parse_json(response, "update event").await?;
        tracing::info!("Event {} updated successfully", updated.id);
        Ok(updated)
    }

    async fn delete_event(&self, id: EventId) -> Result<(), ApiError> {
        let url = self.delete_url(id);
        tracing::info!("Deleting event {}", id);

        let response = self.client.delete(&url).send().await?;

        // Any response counts as success; only transport failures are errors.
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Delete of event {} answered with status {}", id, status);
        }

        Ok(())
    }
}
