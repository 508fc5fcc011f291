//! API client for the club's managed backend.
//!
//! This module provides the `ApiClient` struct for listing events and
//! writing registrations and contact messages.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::models::{ContactMessage, Event, EventRecord, RegistrationRequest};
use crate::repository::{ContactRepository, EventRepository};

use super::RepositoryError;

// ============================================================================
// Constants
// ============================================================================

/// Path prefix for table endpoints
const REST_PATH: &str = "rest/v1";

/// Table holding competitions
const EVENTS_TABLE: &str = "ctf_events";

/// Table receiving sign-ups
const REGISTRATIONS_TABLE: &str = "registrations";

/// Table receiving contact page messages
const CONTACT_TABLE: &str = "contact_messages";

/// API client for the managed backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl ApiClient {
    /// Create a new API client from loaded configuration
    pub fn new(config: &Config) -> Result<Self, RepositoryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| RepositoryError::Unknown(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}/{}", self.base_url, REST_PATH, table)
    }

    fn auth_headers(&self) -> Result<header::HeaderMap, RepositoryError> {
        let invalid = |e: header::InvalidHeaderValue| {
            RepositoryError::Unknown(format!("anon key is not a valid header value: {}", e))
        };
        let mut headers = header::HeaderMap::new();
        headers.insert("apikey", header::HeaderValue::from_str(&self.anon_key).map_err(invalid)?);
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", self.anon_key)).map_err(invalid)?,
        );
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, RepositoryError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(RepositoryError::from_status(status, &body))
        }
    }

    /// `GET` for the full event list, newest first.
    fn events_request(&self) -> Result<reqwest::RequestBuilder, RepositoryError> {
        let url = self.table_url(EVENTS_TABLE);
        debug!(url = %url, "GET");
        Ok(self
            .client
            .get(&url)
            .headers(self.auth_headers()?)
            .query(&[("select", "*"), ("order", "date.desc")]))
    }

    /// `POST` of one row as a single-element array. The backend is asked not to echo it back.
    fn insert_request<B: Serialize + ?Sized>(
        &self,
        table: &str,
        row: &B,
    ) -> Result<reqwest::RequestBuilder, RepositoryError> {
        let url = self.table_url(table);
        debug!(url = %url, "POST");
        Ok(self
            .client
            .post(&url)
            .headers(self.auth_headers()?)
            .header("Prefer", "return=minimal")
            .json(&[row]))
    }

    async fn insert<B: Serialize + ?Sized>(&self, table: &str, row: &B) -> Result<(), RepositoryError> {
        let response = self.insert_request(table, row)?.send().await?;
        Self::check_response(response).await?;
        Ok(())
    }

    /// Decode a list response body. Anything but a JSON array fails the whole fetch.
    fn parse_events(text: &str) -> Result<Vec<Event>, RepositoryError> {
        let rows: Vec<serde_json::Value> = serde_json::from_str(text)
            .map_err(|e| RepositoryError::Decode(format!("event list is not a JSON array: {}", e)))?;
        Ok(Self::decode_events(rows))
    }

    /// Map raw JSON rows to events, skipping rows that fail to map.
    fn decode_events(rows: Vec<serde_json::Value>) -> Vec<Event> {
        let total = rows.len();
        let events: Vec<Event> = rows
            .into_iter()
            .enumerate()
            .filter_map(|(index, row)| {
                let mapped = serde_json::from_value::<EventRecord>(row)
                    .map_err(|e| RepositoryError::Decode(e.to_string()))
                    .and_then(EventRecord::into_event);
                match mapped {
                    Ok(event) => Some(event),
                    Err(e) => {
                        warn!(index, error = %e, "Skipping malformed event record");
                        None
                    }
                }
            })
            .collect();

        if events.len() < total {
            warn!(kept = events.len(), total, "Some event records were skipped");
        }
        events
    }
}

#[async_trait]
impl EventRepository for ApiClient {
    async fn fetch_events(&self) -> Result<Vec<Event>, RepositoryError> {
        let response = self.events_request()?.send().await?;
        let response = Self::check_response(response).await?;
        let text = response.text().await?;

        let events = Self::parse_events(&text)?;
        info!(count = events.len(), "Events fetched");
        Ok(events)
    }

    async fn submit_registration(&self, request: &RegistrationRequest) -> Result<(), RepositoryError> {
        self.insert(REGISTRATIONS_TABLE, request).await?;
        info!(event = %request.event_id(), "Registration stored");
        Ok(())
    }
}

#[async_trait]
impl ContactRepository for ApiClient {
    async fn submit_contact_message(&self, message: &ContactMessage) -> Result<(), RepositoryError> {
        self.insert(CONTACT_TABLE, message).await?;
        info!("Contact message stored");
        Ok(())
    }
}
