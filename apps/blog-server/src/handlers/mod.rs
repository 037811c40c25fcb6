//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;


use actix_web::web;

use crate::middleware::error::AppError;
use crate::middleware::rate_limit::RateLimitMiddleware;
use crate::state::AppState;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("", web::post().to(posts::create_post))
                    .route("/{id}", web::get().to(posts::get_post))
                    .route("/{id}", web::put().to(posts::update_post))
                    .route("/{id}", web::delete().to(posts::delete_post)),
            )
            // Session routes
            .service(
                web::scope("/auth")
                    .service(
                        web::resource("/login")
                            .wrap(RateLimitMiddleware::new(
                                state.login_limiter.clone(),
                                state.trust_proxy_headers,
                            ))
                            .route(web::post().to(auth::login)),
                    )
                    .route("/logout", web::post().to(auth::logout))
                    .route("/session", web::get().to(auth::session_status)),
            ),
    );
}
