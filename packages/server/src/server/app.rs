//! Application setup and server configuration.

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, patch, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes;

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub deps: ServerDeps,
    /// Present in production wiring; used by the health check.
    pub db_pool: Option<PgPool>,
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps, db_pool: Option<PgPool>, allowed_origins: Vec<String>) -> Router {
    let state = AxumAppState { deps, db_pool };

    let cors = if allowed_origins.is_empty() {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PATCH])
            .allow_headers([CONTENT_TYPE])
    };

    Router::new()
        .route("/health", get(routes::health_handler))
        // Users
        .route("/users", post(routes::register_user_handler))
        .route("/users/:id", get(routes::get_user_handler))
        // Pets and their lifecycle
        .route("/pets", post(routes::create_pet_handler))
        .route("/pets/:id", get(routes::get_pet_handler))
        .route("/pets/:id", patch(routes::update_pet_details_handler))
        .route("/pets/:id/status", post(routes::transition_pet_handler))
        .route("/pets/:id/transitions", get(routes::describe_pet_handler))
        .route("/pets/:id/events", get(routes::pet_events_handler))
        // Adoption workflow
        .route("/adoptions", post(routes::request_adoption_handler))
        .route("/adoptions/:id", get(routes::get_adoption_handler))
        .route("/adoptions/:id/approve", post(routes::approve_adoption_handler))
        .route("/adoptions/:id/complete", post(routes::complete_adoption_handler))
        .route("/adoptions/:id/reject", post(routes::reject_adoption_handler))
        // Custody workflow
        .route("/custody", post(routes::start_custody_handler))
        .route("/custody/:id", get(routes::get_custody_handler))
        .route("/custody/:id/end", post(routes::end_custody_handler))
        // Escrows
        .route("/escrows/:id", get(routes::get_escrow_handler))
        .route("/escrows/:id/fund", post(routes::fund_escrow_handler))
        .route("/escrows/:id/release", post(routes::release_escrow_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
