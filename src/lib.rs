pub mod adapters;
pub mod config;
pub mod domain;
pub mod infra;
pub mod services;
pub mod signature;

use {
    axum::{
        Router,
        extract::DefaultBodyLimit,
        http::{HeaderValue, Method, header::CONTENT_TYPE},
        routing::{get, post},
    },
    std::sync::Arc,
    tower_http::{
        cors::{AllowOrigin, CorsLayer},
        timeout::TimeoutLayer,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<config::Config>,
    pub store: infra::memory::OrderStore,
    pub gateway: Arc<dyn domain::gateway::PaymentGateway>,
}

/// Assemble the full HTTP surface. The callback route is mounted wherever
/// the config says the provider will deliver to.
pub fn router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/health", get(adapters::orders_api::health_handler))
        .route("/api/packages", get(adapters::orders_api::list_packages_handler))
        .route("/api/orders", post(adapters::orders_api::create_order_handler))
        .route(
            "/api/orders/{order_id}/status",
            get(adapters::orders_api::order_status_handler),
        )
        .route(
            &state.config.tripay.callback_path,
            post(adapters::tripay_webhook::tripay_callback_handler),
        )
        .layer(DefaultBodyLimit::max(64 * 1024)) // 64 KB — Tripay callbacks are <2 KB
        .layer(TimeoutLayer::new(state.config.http_timeout))
        .layer(cors)
        .with_state(state)
}
