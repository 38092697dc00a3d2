// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP server for the Shala studio backend.
//!
//! Exposes the assignment-creation workflow as JSON endpoints over axum.
//! With `--store-url` the server talks to the hosted row API; without it,
//! an in-memory store backs the process, for local development.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use shala_api::{
    AdjustmentApiRequest, ApiError, ConflictCheckRequest, CreateAssignmentApiRequest,
    FillShortfallRequest, ShortfallRequest, UpdateAssignmentStatusRequest,
};
use shala_core::AssignmentService;
use shala_store::{RestConfig, Store};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Shala Server - HTTP server for the studio scheduling backend.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the hosted data store. If not provided, uses an
    /// in-memory store.
    #[arg(long)]
    store_url: Option<String>,

    /// API key for the hosted data store.
    #[arg(long)]
    api_key: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The assignment service over the configured store backend.
    service: Arc<AssignmentService<Store>>,
    /// Cancelled on shutdown; in-flight creations observe it between
    /// round-trips.
    shutdown: CancellationToken,
}

/// Maps an API error to its HTTP status and JSON body.
fn error_response(err: &ApiError) -> Response {
    let status = match err {
        ApiError::InvalidInput { .. } | ApiError::DomainRuleViolation { .. } => {
            StatusCode::BAD_REQUEST
        }
        ApiError::AccessDenied { .. } => StatusCode::FORBIDDEN,
        ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
        ApiError::ConflictBlocked { .. } => StatusCode::CONFLICT,
        ApiError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
        ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let body = serde_json::json!({
        "success": false,
        "error": err.to_string(),
    });
    (status, Json(body)).into_response()
}

async fn handle_create_assignment(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<CreateAssignmentApiRequest>,
) -> Response {
    match shala_api::create_assignment(state.service.as_ref(), request, &state.shutdown).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn handle_update_assignment_status(
    AxumState(state): AxumState<AppState>,
    Path(assignment_id): Path<String>,
    Json(request): Json<UpdateAssignmentStatusRequest>,
) -> Response {
    match shala_api::update_assignment_status(state.service.as_ref(), &assignment_id, request)
        .await
    {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn handle_check_conflicts(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<ConflictCheckRequest>,
) -> Response {
    match shala_api::check_conflicts(state.service.as_ref(), request).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn handle_analyze_shortfall(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<ShortfallRequest>,
) -> Response {
    match shala_api::analyze_shortfall(state.service.as_ref(), request).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn handle_create_adjustment(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<AdjustmentApiRequest>,
) -> Response {
    match shala_api::create_adjustment(state.service.as_ref(), request).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn handle_fill_shortfall(
    AxumState(state): AxumState<AppState>,
    Json(request): Json<FillShortfallRequest>,
) -> Response {
    match shala_api::fill_shortfall(state.service.as_ref(), request).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn handle_health() -> Response {
    Json(serde_json::json!({ "status": "ok" })).into_response()
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/assignments", post(handle_create_assignment))
        .route(
            "/assignments/{assignment_id}/status",
            post(handle_update_assignment_status),
        )
        .route("/conflicts/check", post(handle_check_conflicts))
        .route("/shortfall/analyze", post(handle_analyze_shortfall))
        .route("/shortfall/fill", post(handle_fill_shortfall))
        .route("/adjustments", post(handle_create_adjustment))
        .route("/health", get(handle_health))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Shala Server");

    let store: Store = if let Some(base_url) = args.store_url.clone() {
        info!("Using hosted data store at: {}", base_url);
        Store::rest(RestConfig {
            base_url,
            api_key: args.api_key.clone(),
        })?
    } else {
        info!("Using in-memory store");
        Store::in_memory()
    };

    let app_state = AppState {
        service: Arc::new(AssignmentService::new(store)),
        shutdown: CancellationToken::new(),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
