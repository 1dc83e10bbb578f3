use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{info, warn};

use crate::domain::notes::{NoteRequest, NoteResponse};
use crate::errors::AppError;

#[async_trait]
pub trait NoteRelay: Send + Sync {
    async fn write_note(&self, request: &NoteRequest) -> Result<NoteResponse, AppError>;
}

/// Posts notes to a single flomo incoming-webhook URL.
#[derive(Debug, Clone)]
pub struct FlomoClient {
    api_url: String,
    http: reqwest::Client,
}

impl FlomoClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl NoteRelay for FlomoClient {
    async fn write_note(&self, request: &NoteRequest) -> Result<NoteResponse, AppError> {
        if self.api_url.is_empty() {
            return Err(AppError::configuration("flomo api url is not configured"));
        }
        if request.content.trim().is_empty() {
            return Err(AppError::validation("invalid_content", "invalid content"));
        }

        let response = self
            .http
            .post(self.api_url.as_str())
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "flomo webhook unreachable");
                AppError::transport(None, err.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "flomo webhook returned failure status");
            return Err(AppError::transport(
                Some(status.as_u16()),
                format!("request failed with status {status}"),
            ));
        }

        let body: Value = response.json().await.map_err(|err| {
            AppError::transport(
                Some(status.as_u16()),
                format!("failed to decode response body: {err}"),
            )
        })?;

        info!(status = status.as_u16(), "flomo webhook responded");
        Ok(NoteResponse::from_body(&body))
    }
}
