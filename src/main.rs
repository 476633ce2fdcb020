use actix_web::{middleware::Logger, web::Data, App, HttpServer};
use dotenv::dotenv;
use log::info;
use std::sync::Arc;

use local_llm_chat::config::ServerConfig;
use local_llm_chat::model::OllamaRuntime;
use local_llm_chat::service::GenerationService;
use local_llm_chat::web::{routes, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    info!("Starting generation service on {}:{}", config.host, config.port);

    // The runtime client is stateless, so every worker shares it
    let runtime = Arc::new(OllamaRuntime::new(config.runtime_url.clone()));
    let app_state = Data::new(AppState {
        service: GenerationService::new(runtime),
    });

    // Start web server
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(routes::cors())
            .app_data(app_state.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
