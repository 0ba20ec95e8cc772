//! REST API request handlers.

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AskqlError, QueryError};
use crate::query::{QueryExecutor, QueryOutcome, Row, NOT_UNDERSTOOD_MESSAGE};

/// Message used in every 500 envelope.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";

/// Application state shared across handlers.
pub struct ApiState {
    /// Executor answering questions.
    pub executor: Arc<QueryExecutor>,
}

impl ApiState {
    /// Create new API state.
    pub fn new(executor: Arc<QueryExecutor>) -> Self {
        Self { executor }
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Form body of `POST /ask`.
#[derive(Debug, Clone, Deserialize)]
pub struct AskForm {
    #[serde(default)]
    pub question: Option<String>,
}

/// Successful answer.
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse {
    pub data: Vec<Row>,
}

/// Error envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Liveness response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

// ============================================================================
// Envelope Mapping
// ============================================================================

/// Map an executor result to its status code and JSON envelope.
pub fn outcome_response(result: crate::error::Result<QueryOutcome>) -> Response {
    match result {
        Ok(QueryOutcome::Rows(rows)) => {
            (StatusCode::OK, Json(DataResponse { data: rows })).into_response()
        }
        Ok(QueryOutcome::NotUnderstood) => bad_request(NOT_UNDERSTOOD_MESSAGE),
        Err(AskqlError::Query(QueryError::EmptyQuestion)) => {
            bad_request(QueryError::EmptyQuestion.to_string())
        }
        Err(e) => {
            tracing::error!(error = %e, "Error handling /ask request");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(INTERNAL_ERROR_MESSAGE).with_details(e.fault_message())),
            )
                .into_response()
        }
    }
}

fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message))).into_response()
}

// ============================================================================
// Handler Functions
// ============================================================================

/// POST /ask - Answer a question sent as the `question` form field.
///
/// Accepts `application/x-www-form-urlencoded` and `multipart/form-data`.
pub async fn ask_handler(State(state): State<Arc<ApiState>>, request: Request) -> Response {
    let question = read_question(request).await.unwrap_or_default();

    let question = question.trim();
    if question.is_empty() {
        return bad_request(QueryError::EmptyQuestion.to_string());
    }

    outcome_response(state.executor.ask(question).await)
}

/// The `question` field of a form body. Unreadable bodies yield `None`.
async fn read_question(request: Request) -> Option<String> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.to_ascii_lowercase().starts_with("multipart/form-data"));

    if !is_multipart {
        return match Form::<AskForm>::from_request(request, &()).await {
            Ok(Form(form)) => form.question,
            Err(rejection) => {
                tracing::debug!(%rejection, "Unreadable /ask form body");
                None
            }
        };
    }

    let mut multipart = match Multipart::from_request(request, &()).await {
        Ok(multipart) => multipart,
        Err(rejection) => {
            tracing::debug!(%rejection, "Unreadable /ask multipart body");
            return None;
        }
    };

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("question") => {
                return field.text().await.ok();
            }
            Ok(Some(_)) => continue,
            Ok(None) => return None,
            Err(e) => {
                tracing::debug!(error = %e, "Malformed /ask multipart body");
                return None;
            }
        }
    }
}

/// GET /health - Liveness probe; checks no dependencies.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
