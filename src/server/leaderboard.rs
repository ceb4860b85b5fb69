//! Leaderboard read endpoint.
//!
//! A pure read projection over the store; performs no mutation. Staleness
//! relative to in-flight webhook deliveries is acceptable and expected
//! under polling-based refresh.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::debug;

use super::{AppState, ReadError};
use crate::progress::{LeaderboardEntry, build_leaderboard};
use crate::types::Category;

/// Query parameters for the leaderboard endpoint.
#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    /// Category name; defaults to `Global`.
    pub category: Option<String>,
}

/// Leaderboard handler.
///
/// Returns teams ranked by tasks completed (descending) with ties broken by
/// earlier activity, for the requested category. Category names are matched
/// case-insensitively; an unknown name yields an empty array rather than an
/// error, since readers always expect a valid (possibly empty) list.
pub async fn leaderboard_handler(
    State(app_state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<Vec<LeaderboardEntry>>, ReadError> {
    let category = match params.category.as_deref() {
        None => Category::Global,
        Some(name) => match Category::parse(name) {
            Some(category) => category,
            None => {
                debug!(category = %name, "leaderboard request for unknown category");
                return Ok(Json(Vec::new()));
            }
        },
    };

    let rows = app_state.store().categories_named(category)?;
    Ok(Json(build_leaderboard(rows)))
}
