//! Chat session state and the per-turn request loop.
//!
//! A [`ChatClient`] owns one session. `submit_prompt` takes `&mut self`, so a
//! session can never have two generations in flight, and parameter changes
//! made through [`ChatClient::session_mut`] only reach the next turn.

pub mod backend;
pub mod replay;

use log::{info, warn};
use std::time::Duration;
use thiserror::Error;

use crate::web::models::{
    ChatMessage, GenerationRequest, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
    DEFAULT_TOP_P,
};
use backend::GenerationBackend;
use replay::{replay, Renderer};

/// Models offered to the user.
pub const AVAILABLE_MODELS: [&str; 3] = ["deepseek-r1:7b", "llama2", "mistral"];

pub const SAMPLING_RANGE: (f64, f64) = (0.1, 1.0);
pub const MAX_TOKENS_RANGE: (u32, u32) = (64, 1024);
pub const MAX_TOKENS_STEP: u32 = 64;

#[derive(Debug, Error, PartialEq)]
pub enum SettingError {
    #[error("Unknown model '{0}', expected one of: {models}", models = AVAILABLE_MODELS.join(", "))]
    UnknownModel(String),

    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: String,
        min: String,
        max: String,
    },

    #[error("max_tokens must be a multiple of {step}, got {0}", step = MAX_TOKENS_STEP)]
    Step(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    transcript: Vec<ChatMessage>,
    model: String,
    temperature: f64,
    top_p: f64,
    max_tokens: u32,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            transcript: Vec::new(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl SessionState {
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn top_p(&self) -> f64 {
        self.top_p
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn set_model(&mut self, model: &str) -> Result<(), SettingError> {
        if !AVAILABLE_MODELS.contains(&model) {
            return Err(SettingError::UnknownModel(model.to_string()));
        }
        self.model = model.to_string();
        Ok(())
    }

    pub fn set_temperature(&mut self, value: f64) -> Result<(), SettingError> {
        self.temperature = check_sampling("temperature", value)?;
        Ok(())
    }

    pub fn set_top_p(&mut self, value: f64) -> Result<(), SettingError> {
        self.top_p = check_sampling("top_p", value)?;
        Ok(())
    }

    pub fn set_max_tokens(&mut self, value: u32) -> Result<(), SettingError> {
        let (min, max) = MAX_TOKENS_RANGE;
        if !(min..=max).contains(&value) {
            return Err(SettingError::OutOfRange {
                name: "max_tokens",
                value: value.to_string(),
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        if value % MAX_TOKENS_STEP != 0 {
            return Err(SettingError::Step(value));
        }
        self.max_tokens = value;
        Ok(())
    }

    /// Snapshot of the current parameters for one turn.
    pub fn request_for(&self, prompt: &str) -> GenerationRequest {
        GenerationRequest {
            prompt: prompt.to_string(),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
        }
    }

    fn push(&mut self, message: ChatMessage) {
        self.transcript.push(message);
    }
}

fn check_sampling(name: &'static str, value: f64) -> Result<f64, SettingError> {
    let (min, max) = SAMPLING_RANGE;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(SettingError::OutOfRange {
            name,
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        })
    }
}

pub struct ChatClient<B> {
    backend: B,
    session: SessionState,
    replay_delay: Duration,
}

impl<B: GenerationBackend> ChatClient<B> {
    pub fn new(backend: B, replay_delay: Duration) -> Self {
        Self {
            backend,
            session: SessionState::default(),
            replay_delay,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    /// Runs one chat turn: records the prompt, asks the backend, reveals the
    /// reply and records it. Failures become an `Error: ...` reply shown as
    /// is. Returns `false` when the prompt is blank and nothing happened.
    pub async fn submit_prompt(&mut self, prompt: &str, renderer: &mut dyn Renderer) -> bool {
        if prompt.trim().is_empty() {
            return false;
        }

        self.session.push(ChatMessage::user(prompt));
        let request = self.session.request_for(prompt);
        info!(
            "Sending prompt to {} (temperature={}, top_p={}, max_tokens={})",
            request.model, request.temperature, request.top_p, request.max_tokens
        );

        let reply = match self.backend.generate(&request).await {
            Ok(text) => replay(&text, renderer, self.replay_delay).await,
            Err(e) => {
                warn!("Generation failed: {}", e);
                let message = format!("Error: {}", e);
                renderer.render(&message, false);
                message
            }
        };

        self.session.push(ChatMessage::assistant(reply));
        true
    }
}
