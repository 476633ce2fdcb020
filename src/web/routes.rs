use actix_cors::Cors;
use actix_web::web;

use crate::web::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(handlers::json_error_handler))
            .route("/generate", web::post().to(handlers::generate)),
    )
    .route("/health", web::get().to(handlers::health_check));
}

// Any origin, method and header; there is no auth to protect
pub fn cors() -> Cors {
    Cors::permissive()
}
