use log::{error, info};
use std::sync::Arc;
use uuid::Uuid;

use crate::dedup::remove_repetition;
use crate::error::GenerationError;
use crate::model::ModelRuntime;
use crate::web::models::{GenerationRequest, GenerationResult};

/// Turns a generation request into cleaned model output.
///
/// Holds no per-request state, so one instance is shared by every worker.
/// Parameters are passed to the runtime as given; if the runtime rejects one,
/// that failure is returned rather than corrected here.
pub struct GenerationService {
    runtime: Arc<dyn ModelRuntime>,
}

impl GenerationService {
    pub fn new(runtime: Arc<dyn ModelRuntime>) -> Self {
        Self { runtime }
    }

    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        let request_id = Uuid::new_v4();
        info!("[{}] Generating response with model: {}", request_id, request.model);
        info!("[{}] Prompt: {}", request_id, request.prompt);
        info!(
            "[{}] Options: temperature={}, top_p={}, max_tokens={}",
            request_id, request.temperature, request.top_p, request.max_tokens
        );

        match self
            .runtime
            .generate(&request.model, &request.prompt, &request.options())
            .await
        {
            Ok(raw) => {
                let response = remove_repetition(&raw);
                info!(
                    "[{}] Response generated successfully ({} -> {} characters)",
                    request_id,
                    raw.len(),
                    response.len()
                );
                Ok(GenerationResult { response })
            }
            Err(e) => {
                error!("[{}] Error generating response: {}", request_id, e);
                Err(e)
            }
        }
    }
}
