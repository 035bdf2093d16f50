use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::error::ensure_success;
use super::{EventPersistence, ServiceError};
use crate::model::{IdToken, NewEvent};

const SERVICE: &str = "event service";

/// Event API client: `POST {api_url}/events` with a bearer token.
#[derive(Debug, Clone)]
pub struct HttpEventService {
    client: Client,
    api_url: String,
}

impl HttpEventService {
    pub fn new(client: Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }
}

#[async_trait]
impl EventPersistence for HttpEventService {
    async fn create_event(&self, event: &NewEvent, token: &IdToken) -> Result<(), ServiceError> {
        debug!(name = %event.name, date = %event.date, "events: creating");
        let response = self
            .client
            .post(format!("{}/events", self.api_url))
            .bearer_auth(token.as_str())
            .json(event)
            .send()
            .await?;
        ensure_success(SERVICE, response).await?;
        Ok(())
    }
}
