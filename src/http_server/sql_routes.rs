//! Guarded SQL Routes
//!
//! The gateway handler: binds transport requests to (statement, intent)
//! pairs, runs the classifier, dispatches approved statements to the
//! execution adapter, and maps every outcome to a JSON envelope.
//!
//! Read statements arrive as a percent-encoded path segment; write
//! statements arrive as the `query` field of a JSON body. The seed
//! endpoint bypasses classification entirely (its SQL is fixed, not
//! user-supplied).

use std::sync::Arc;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::classifier::{classify, Classification, Intent, PERMITTED_TABLE};
use crate::observability::Logger;
use crate::store::{Row, Store};

// ==================
// Shared State
// ==================

/// Gateway state shared across handlers; owns the store handle.
pub struct GatewayState {
    pub store: Store,
}

impl GatewayState {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// The SQL text to execute on the write channel.
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RowsResponse {
    pub rows: Vec<Row>,
}

#[derive(Debug, Serialize)]
pub struct WriteResponse {
    pub ok: bool,
    #[serde(rename = "affectedRows")]
    pub affected_rows: usize,
    #[serde(rename = "insertId")]
    pub insert_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub ok: bool,
    pub inserted: usize,
    #[serde(rename = "insertId")]
    pub insert_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

// ==================
// Routes
// ==================

/// Create the guarded SQL routes (nested under /api/v1 by the server).
pub fn sql_routes(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route("/sql/{*stmt}", get(read_sql_handler))
        // A read needs at least one path segment of SQL text; a bare
        // GET /sql is off the surface entirely.
        .route("/sql", post(write_sql_handler).get(missing_statement_handler))
        .route("/seed", post(seed_handler))
        .with_state(state)
}

async fn missing_statement_handler() -> ApiError {
    api_error(StatusCode::NOT_FOUND, "Not found.")
}

// ==================
// Classification Mapping
// ==================

/// Maps a non-approved classification to its response. `Forbidden` is a
/// distinct 403; the other rejections are client errors.
fn classification_error(classification: Classification, intent: Intent) -> ApiError {
    match classification {
        Classification::Forbidden => api_error(StatusCode::FORBIDDEN, "Forbidden statement."),
        Classification::WrongIntent => {
            let message = match intent {
                Intent::Read => "Only SELECT statements may be submitted on the read endpoint.",
                Intent::Write => "Only INSERT statements may be submitted on the write endpoint.",
            };
            api_error(StatusCode::BAD_REQUEST, message)
        }
        Classification::OutOfScope => api_error(
            StatusCode::BAD_REQUEST,
            format!("Statement must reference the '{}' table.", PERMITTED_TABLE),
        ),
        // Approved never reaches this function.
        Classification::Approved => api_error(StatusCode::INTERNAL_SERVER_ERROR, "unreachable"),
    }
}

fn gate(text: &str, intent: Intent) -> Result<(), ApiError> {
    let classification = classify(text, intent);
    if classification == Classification::Approved {
        return Ok(());
    }
    Logger::warn(
        "STATEMENT_REJECTED",
        &[
            ("classification", &format!("{:?}", classification)),
            ("statement", text),
        ],
    );
    Err(classification_error(classification, intent))
}

// ==================
// Handlers
// ==================

/// Read channel: statement text from a percent-decoded path segment.
///
/// Malformed path encoding is a client error distinct from
/// classification failure.
async fn read_sql_handler(
    State(state): State<Arc<GatewayState>>,
    stmt: Result<Path<String>, PathRejection>,
) -> Result<Json<RowsResponse>, ApiError> {
    let Path(text) = stmt.map_err(|rejection| {
        api_error(
            StatusCode::BAD_REQUEST,
            format!("Malformed statement path: {}", rejection.body_text()),
        )
    })?;

    gate(&text, Intent::Read)?;

    let rows = state.store.execute_read(&text).map_err(|e| {
        Logger::error("STATEMENT_FAILED", &[("error", &e.to_string())]);
        api_error(StatusCode::BAD_REQUEST, e.to_string())
    })?;

    Logger::info("STATEMENT_EXECUTED", &[("rows", &rows.len().to_string())]);
    Ok(Json(RowsResponse { rows }))
}

/// Write channel: statement text from the `query` field of a JSON body.
///
/// An unparseable body or a missing/blank field is a client error
/// distinct from classification failure.
async fn write_sql_handler(
    State(state): State<Arc<GatewayState>>,
    body: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<WriteResponse>, ApiError> {
    // Rejection status is preserved: unparseable JSON stays 400, an
    // over-limit body stays 413.
    let Json(request) = body.map_err(|rejection| {
        api_error(
            rejection.status(),
            format!("Invalid request body: {}", rejection.body_text()),
        )
    })?;

    let text = match request.query {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "Request body must include a non-empty 'query' field.",
            ))
        }
    };

    gate(&text, Intent::Write)?;

    let outcome = state.store.execute_write(&text, &[]).map_err(|e| {
        Logger::error("STATEMENT_FAILED", &[("error", &e.to_string())]);
        api_error(StatusCode::BAD_REQUEST, e.to_string())
    })?;

    Logger::info(
        "STATEMENT_EXECUTED",
        &[("affected", &outcome.affected.to_string())],
    );
    Ok(Json(WriteResponse {
        ok: true,
        affected_rows: outcome.affected,
        insert_id: outcome.insert_id,
    }))
}

/// Operational affordance: inserts the fixed sample records. Not part of
/// the guarded-SQL contract, so no classification runs.
async fn seed_handler(
    State(state): State<Arc<GatewayState>>,
) -> Result<Json<SeedResponse>, ApiError> {
    let outcome = state.store.seed().map_err(|e| {
        Logger::error("SEED_FAILED", &[("error", &e.to_string())]);
        api_error(StatusCode::BAD_REQUEST, e.to_string())
    })?;

    Logger::info(
        "SEED_COMPLETE",
        &[("inserted", &outcome.affected.to_string())],
    );
    Ok(Json(SeedResponse {
        ok: true,
        inserted: outcome.affected,
        insert_id: outcome.insert_id,
    }))
}
