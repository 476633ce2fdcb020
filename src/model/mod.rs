use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GenerationError;
use crate::web::models::GenerateOptions;

/// Single-shot text generation against a model runtime.
#[async_trait]
pub trait ModelRuntime: Send + Sync {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: &'a GenerateOptions,
}

#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

// A wrapper for the Ollama generate API
pub struct OllamaRuntime {
    base_url: String,
    client: Client,
}

impl OllamaRuntime {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!("Using Ollama runtime at: {}", base_url);

        Self {
            base_url,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl ModelRuntime for OllamaRuntime {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<String, GenerationError> {
        let url = format!("{}/api/generate", self.base_url);

        // Streaming is off: the runtime answers once with the full text
        let payload = OllamaGenerateRequest {
            model,
            prompt,
            stream: false,
            options,
        };
        debug!("Sending request to {} with options {:?}", url, options);

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| GenerationError::Runtime(format!("Model runtime unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GenerationError::Runtime(runtime_error_message(
                status.as_u16(),
                &error_text,
            )));
        }

        let body: OllamaGenerateResponse = response.json().await.map_err(|e| {
            GenerationError::Runtime(format!("Failed to read runtime response: {}", e))
        })?;

        info!("Response length: {} characters", body.response.len());
        Ok(body.response)
    }
}

// Ollama reports failures as {"error": "..."}; anything else is passed on raw
fn runtime_error_message(status: u16, body: &str) -> String {
    let reported = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string));

    match reported {
        Some(message) => message,
        None if body.trim().is_empty() => format!("Model runtime returned status {}", status),
        None => body.trim().to_string(),
    }
}
