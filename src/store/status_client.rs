use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::DataSourceStatus;
use crate::impact::{StatusLookup, StatusLookupError};

#[derive(Deserialize)]
struct StatusResponse {
    status: String,
}

/// HTTP client for the external calculation service's status endpoint.
/// Timeout lives here; the completion check above it defines none of its own.
pub struct CalculationStatusClient {
    http: reqwest::Client,
    base_url: String,
}

impl CalculationStatusClient {
    pub fn new(base_url: impl Into<String>, request_timeout_secs: u64) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(request_timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { http, base_url: base_url.into() }
    }
}

#[async_trait]
impl StatusLookup for CalculationStatusClient {
    async fn get_status(
        &self,
        auth_token: &str,
        data_source_id: Uuid,
    ) -> Result<DataSourceStatus, StatusLookupError> {
        let url = format!("{}/v1/data-sources/{}/status", self.base_url, data_source_id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(auth_token)
            .send()
            .await
            .map_err(|e| StatusLookupError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%data_source_id, http_status = status.as_u16(), "status lookup rejected");
            return Err(StatusLookupError::Upstream(status.as_u16()));
        }

        let body: StatusResponse = response
            .json()
            .await
            .map_err(|e| StatusLookupError::InvalidBody(e.to_string()))?;

        Ok(DataSourceStatus(body.status))
    }
}
