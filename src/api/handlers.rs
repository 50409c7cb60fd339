//! HTTP request handlers

use super::types::{ErrorResponse, EventRequest, EventResponse, VersionResponse};
use super::AppState;
use crate::runtime::CollectingSink;
use crate::state_machine::IncomingEvent;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Inbound events from the chat transport
        .route("/api/events", post(post_event))
        // Version
        .route("/version", get(get_version))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================
// Events
// ============================================================

async fn post_event(
    State(state): State<AppState>,
    Json(mut req): Json<EventRequest>,
) -> Result<Json<EventResponse>, AppError> {
    req.user_id = req.user_id.trim().to_string();
    let user_id = req.user_id.as_str();
    if user_id.is_empty() {
        return Err(AppError::BadRequest("user_id must not be empty".to_string()));
    }
    if !state.allowed_users.contains(user_id) {
        tracing::info!(user_id = %user_id, "Rejected user outside allow list");
        return Err(AppError::Forbidden(format!("User {user_id} is not allowed")));
    }

    let sink = CollectingSink::new();
    let incoming = IncomingEvent::from(req);
    let outcome = state.controller.handle(incoming, &sink).await;
    tracing::debug!(outcome = ?outcome, "Event handled");

    let (replies, deleted_messages) = sink.into_parts();
    Ok(Json(EventResponse {
        replies,
        deleted_messages,
    }))
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    Forbidden(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
