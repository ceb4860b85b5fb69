//! HTTP server for the task leaderboard.
//!
//! This module implements the HTTP surface that:
//! - Accepts push-event webhooks from GitHub, validates signatures, and
//!   records detected task completions
//! - Serves the leaderboard and activity-feed read models
//! - Provides health checks for liveness probes
//!
//! # Endpoints
//!
//! - `POST /api/github-webhook` - Accepts GitHub push deliveries
//! - `GET /api/leaderboard?category=Name` - Ranked teams (default Global)
//! - `GET /api/activity` - Recent activity feed
//! - `GET /health` - Returns 200 if server is running

use std::sync::Arc;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::store::{Store, StoreError};

pub mod activity;
pub mod health;
pub mod leaderboard;
pub mod webhook;

pub use activity::activity_handler;
pub use health::health_handler;
pub use leaderboard::leaderboard_handler;
pub use webhook::webhook_handler;

/// Shared application state.
///
/// This is passed to all handlers via Axum's `State` extractor. It carries
/// the persistence handle and the webhook secret; nothing else is shared
/// across requests, so correctness under concurrent deliveries rests on the
/// store's own constraints.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Persistence handle threaded through every component.
    store: Arc<dyn Store>,

    /// Webhook secret for HMAC-SHA256 signature verification.
    ///
    /// `None` means no secret was configured; verification then fails
    /// closed rather than being skipped.
    webhook_secret: Option<Vec<u8>>,
}

impl AppState {
    /// Creates a new `AppState` with the given store and webhook secret.
    pub fn new(store: Arc<dyn Store>, webhook_secret: Option<Vec<u8>>) -> Self {
        AppState {
            inner: Arc::new(AppStateInner {
                store,
                webhook_secret,
            }),
        }
    }

    /// Returns the persistence handle.
    pub fn store(&self) -> &dyn Store {
        self.inner.store.as_ref()
    }

    /// Returns the webhook secret, if one was configured.
    pub fn webhook_secret(&self) -> Option<&[u8]> {
        self.inner.webhook_secret.as_deref()
    }
}

/// Error type shared by the read endpoints (leaderboard, activity).
#[derive(Debug, Error)]
pub enum ReadError {
    /// The store failed to service the read.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for ReadError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

/// Builds the axum Router with all endpoints.
pub fn build_router(app_state: AppState) -> axum::Router {
    use axum::routing::{get, post};

    axum::Router::new()
        .route("/api/github-webhook", post(webhook_handler))
        .route("/api/leaderboard", get(leaderboard_handler))
        .route("/api/activity", get(activity_handler))
        .route("/health", get(health_handler))
        .with_state(app_state)
}
