use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod handlers;
mod mail;
mod middleware;

use config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub http: reqwest::Client,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().expect("Failed to load configuration");

    // One shared HTTP client; providers get a handle instead of
    // building their own.
    let state = AppState {
        config,
        http: reqwest::Client::new(),
    };

    // Build application router
    let app = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/threads", get(handlers::api::list_threads))
        .route("/api/threads/:id", get(handlers::api::get_thread))
        .route("/api/messages/send", post(handlers::api::send_message))
        .route("/api/messages/:id", get(handlers::api::get_message))
        .route("/api/labels", get(handlers::api::list_labels))
        .route("/api/profile", get(handlers::api::get_profile))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::verify_api_key,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // Customize this for production security
        .with_state(state);

    // Run server
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr_str = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr_str).await.unwrap();

    tracing::info!("listening on {}", addr_str);
    axum::serve(listener, app).await.unwrap();
}
