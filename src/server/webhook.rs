//! Webhook endpoint handler.
//!
//! Accepts GitHub push-event deliveries, validates signatures against the
//! raw body bytes, extracts task completions, and applies them to the store
//! within the request. The response enumerates every processed (team, task)
//! pair and its outcome.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, warn};

use super::AppState;
use crate::detect::aggregate_completions;
use crate::progress::{PairOutcome, apply_completions};
use crate::types::{Category, Sha};
use crate::webhooks::{PushEvent, verify_signature};

/// Header name for the GitHub signature.
const HEADER_SIGNATURE: &str = "x-hub-signature-256";

/// Errors that can occur when processing a webhook.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Missing signature header.
    #[error("missing signature")]
    MissingSignature,

    /// Signature did not verify (or no secret is configured).
    #[error("invalid signature")]
    InvalidSignature,

    /// Body was not valid JSON.
    #[error("invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebhookError::MissingSignature | WebhookError::InvalidSignature => {
                StatusCode::UNAUTHORIZED
            }
            WebhookError::InvalidJson(_) => StatusCode::BAD_REQUEST,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Webhook response body.
///
/// Deliveries that are authenticated but carry nothing to process (non-push
/// events, non-task branches) are acknowledged with a message rather than
/// rejected; they are expected traffic.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum WebhookResponse {
    Ignored {
        message: &'static str,
    },
    Processed {
        success: bool,
        processed: usize,
        results: Vec<PairOutcome>,
    },
}

/// Webhook handler.
///
/// # Request
///
/// - Method: POST
/// - Required header: `X-Hub-Signature-256` (HMAC-SHA256 of the payload)
/// - Body: JSON push-event payload with `ref` and `commits`
///
/// # Response
///
/// - 200 with `{"message": ...}` for non-push events and non-task branches
/// - 200 with `{"success": true, "processed": N, "results": [...]}` after
///   processing; each result is `{team, category, task, status}` with
///   status `completed`, `already_completed`, or `failed`
/// - 401 for missing/invalid signatures (before any parsing)
/// - 400 for unparseable JSON bodies
pub async fn webhook_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookResponse>, WebhookError> {
    let signature = headers
        .get(HEADER_SIGNATURE)
        .and_then(|v| v.to_str().ok())
        .ok_or(WebhookError::MissingSignature)?;

    // Verify against the raw bytes BEFORE any parsing. An unset secret
    // fails closed inside verify_signature.
    if !verify_signature(&body, signature, app_state.webhook_secret()) {
        warn!("invalid webhook signature");
        return Err(WebhookError::InvalidSignature);
    }

    let payload: serde_json::Value = serde_json::from_slice(&body)?;

    let Some(event) = PushEvent::from_value(&payload) else {
        debug!("ignoring non-push delivery");
        return Ok(Json(WebhookResponse::Ignored {
            message: "Not a push event",
        }));
    };

    let category = Category::from_ref(&event.git_ref);
    if !category.has_tasks() {
        debug!(git_ref = %event.git_ref, "ignoring push to non-task branch");
        return Ok(Json(WebhookResponse::Ignored {
            message: "Global category does not have tasks",
        }));
    }

    debug!(
        git_ref = %event.git_ref,
        category = %category,
        commits = event.commits.len(),
        "processing push delivery"
    );

    let completions = aggregate_completions(&event.commits, category);

    // By convention the stored commit hash is the delivery's first commit,
    // not necessarily the commit that caused a detection.
    let trigger_commit = event
        .commits
        .first()
        .filter(|c| !c.id.is_empty())
        .map(|c| Sha::new(c.id.as_str()));

    let results = apply_completions(
        app_state.store(),
        category,
        &completions,
        trigger_commit.as_ref(),
    );

    Ok(Json(WebhookResponse::Processed {
        success: true,
        processed: results.len(),
        results,
    }))
}
