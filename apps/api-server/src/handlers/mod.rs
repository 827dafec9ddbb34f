//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/posts")
                .route("", web::get().to(posts::list_posts))
                .route("", web::post().to(posts::create_post))
                .route("/{id}", web::get().to(posts::get_post))
                .route("/{id}", web::put().to(posts::update_post))
                .route("/{id}", web::delete().to(posts::delete_post)),
        );
}

/// Malformed JSON bodies become RFC 7807 `400` responses.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}
