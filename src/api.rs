//! HTTP routes
//!
//! Provides handlers for:
//! - POST /sendTransactions?send_mode=<u8>&comment=<text> - pay a batch of destinations
//! - GET /health - liveness plus the custodial wallet address
//!
//! Every response body is JSON, errors included.

use crate::error::Error;
use crate::transfer::TransferOrchestrator;
use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

/// Query parameters of `POST /sendTransactions`
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SendTransactionsQuery {
    pub send_mode: Option<String>,
    pub comment: Option<String>,
}

impl SendTransactionsQuery {
    /// Pick the known parameters out of decoded query pairs
    ///
    /// When a key repeats, its first value is used.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "send_mode" => &mut query.send_mode,
                "comment" => &mut query.comment,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }
}

pub fn router(orchestrator: Arc<TransferOrchestrator>) -> Router {
    Router::new()
        .route(
            "/sendTransactions",
            post(send_transactions_handler).fallback(method_not_allowed),
        )
        .route("/health", get(health_handler).fallback(method_not_allowed))
        .fallback(not_found)
        .with_state(orchestrator)
}

/// Handler for POST /sendTransactions
///
/// Query and body rejections are turned into `{"error": ...}` responses here
/// instead of axum's plain-text defaults.
pub async fn send_transactions_handler(
    State(orchestrator): State<Arc<TransferOrchestrator>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let query = match query {
        Ok(Query(pairs)) => SendTransactionsQuery::from_pairs(pairs),
        Err(rejection) => {
            let e = Error::MalformedRequest(rejection.body_text());
            tracing::warn!("sendTransactions rejected: {}", e);
            return e.into_response();
        }
    };
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::warn!("sendTransactions body rejected: {}", rejection.body_text());
            return json_error(rejection.status(), rejection.body_text());
        }
    };

    match orchestrator
        .send_transactions(query.send_mode.as_deref(), query.comment.as_deref(), &body)
        .await
    {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            tracing::warn!("sendTransactions rejected: {}", e);
            e.into_response()
        }
    }
}

/// Handler for GET /health
pub async fn health_handler(
    State(orchestrator): State<Arc<TransferOrchestrator>>,
) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "wallet": orchestrator.wallet_address(),
    }))
}

async fn method_not_allowed() -> Response {
    json_error(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
}

async fn not_found() -> Response {
    json_error(StatusCode::NOT_FOUND, "not found")
}

fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

impl Error {
    /// HTTP status reported for this error
    ///
    /// Upstream outages map to 5xx so callers can tell them apart from bad
    /// requests; everything else is a 400.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::ChainUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::SubmissionTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        json_error(self.status_code(), self.to_string())
    }
}
