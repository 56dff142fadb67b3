use std::sync::Arc;

use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::todo::{TodoState, create_todo_router};

#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: Config) -> anyhow::Result<()> {
    let server_address = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    tracing::info!("To-do server running on http://{}", server_address);

    let state = Arc::new(TodoState::new());
    let app = create_app(state);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Builds the application router around a shared store: the to-do API,
/// a health probe, request tracing, and permissive CORS.
pub fn create_app(state: Arc<TodoState>) -> Router {
    Router::new()
        .route("/health", get(health_check_handler))
        .merge(create_todo_router(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

#[tracing::instrument]
pub async fn health_check_handler() -> &'static str {
    "OK"
}
