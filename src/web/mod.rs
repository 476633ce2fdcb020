pub mod handlers;
pub mod models;
pub mod routes;

use crate::service::GenerationService;

// App state structure
pub struct AppState {
    pub service: GenerationService,
}
