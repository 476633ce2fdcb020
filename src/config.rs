use log::warn;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_RUNTIME_URL: &str = "http://localhost:11434";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000/api/generate";
pub const DEFAULT_REPLAY_DELAY_MS: u64 = 50;

/// Settings for the generation service binary.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub runtime_url: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: parse_var("PORT", DEFAULT_PORT),
            runtime_url: env::var("OLLAMA_HOST")
                .unwrap_or_else(|_| DEFAULT_RUNTIME_URL.to_string()),
        }
    }
}

/// Settings for the terminal chat client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub backend_url: String,
    pub replay_delay: Duration,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self {
            backend_url: env::var("BACKEND_URL")
                .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string()),
            replay_delay: Duration::from_millis(parse_var(
                "REPLAY_DELAY_MS",
                DEFAULT_REPLAY_DELAY_MS,
            )),
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, using {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}
