//! REST API router and configuration.

use std::sync::Arc;

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{ask_handler, health_handler, ApiState};
use crate::config::ServerConfig;
use crate::query::QueryExecutor;
use crate::web::create_web_ui_router;

/// Create the application router.
///
/// Endpoints:
/// - POST /ask    - Answer a question (form field `question`)
/// - GET  /health - Liveness probe
/// - GET  /       - Question page
pub fn create_rest_router(executor: Arc<QueryExecutor>, config: &ServerConfig) -> Router {
    let state = Arc::new(ApiState::new(executor));

    let router = Router::new()
        .route("/ask", post(ask_handler))
        .route("/health", get(health_handler))
        .merge(create_web_ui_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
            .allow_origin(Any);

        router.layer(cors)
    } else {
        router
    }
}

/// Bind the configured address and serve until the process is stopped.
pub async fn serve(executor: Arc<QueryExecutor>, config: &ServerConfig) -> crate::error::Result<()> {
    let router = create_rest_router(executor, config);
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;

    tracing::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
