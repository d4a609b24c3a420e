use crate::errors::AppError;
use crate::routes::quiz_routes::configure_quiz_routes;
use actix_web::web;
use tracing::warn;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).configure(configure_quiz_routes);
}

/// Malformed bodies are validation failures, answered in the API's error shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        warn!("Rejected body for {}: {}", req.path(), err);
        AppError::Validation(format!("Invalid input: {}", err)).into()
    })
}
