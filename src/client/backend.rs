use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};

use crate::error::GenerationError;
use crate::web::models::{ErrorBody, GenerationRequest, GenerationResult};

/// Where the chat client sends a finished turn for generation.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

/// Talks to the generation service over HTTP.
pub struct HttpBackend {
    url: String,
    client: Client,
}

impl HttpBackend {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl GenerationBackend for HttpBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        debug!("Posting prompt to {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let body: GenerationResult = response
                .json()
                .await
                .map_err(|e| GenerationError::Transport(format!("Malformed response: {}", e)))?;
            return Ok(body.response);
        }

        let text = response.text().await.unwrap_or_default();

        // The service reports runtime failures as 500 {"detail": ...}
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            if let Ok(body) = serde_json::from_str::<ErrorBody>(&text) {
                return Err(GenerationError::Runtime(body.detail));
            }
        }

        Err(GenerationError::Transport(format!(
            "{} for url: {}: {}",
            status,
            self.url,
            text.trim()
        )))
    }
}
