//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;


use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/logout", web::post().to(auth::logout))
                    .route("/token/refresh", web::post().to(auth::refresh))
                    .route("/profile", web::get().to(auth::profile))
                    .route("/profile", web::delete().to(auth::delete_profile)),
            )
            // Post routes; `/mine` must precede `/{id}`
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/mine", web::get().to(posts::list_mine))
                    .route("/{id}", web::get().to(posts::retrieve))
                    .route("/{id}", web::put().to(posts::replace))
                    .route("/{id}", web::patch().to(posts::partial_update))
                    .route("/{id}", web::delete().to(posts::destroy)),
            ),
    );
}
