//! Web UI route handlers.

use axum::{routing::get, Router};

use crate::web::static_files::serve_index;

/// Create the web UI router.
///
/// Routes:
/// - GET / - Question page
pub fn create_web_ui_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(serve_index))
}
