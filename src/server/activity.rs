//! Activity feed read endpoint.

use axum::Json;
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{AppState, ReadError};
use crate::types::Category;

/// How many recent activity entries the feed returns.
const ACTIVITY_FEED_LIMIT: usize = 50;

/// One activity feed entry as exposed over the API.
#[derive(Debug, Serialize)]
pub struct ActivityView {
    pub id: u64,
    pub category: Category,
    pub message: String,
    /// Numeric payload; carries the task number for completion entries.
    pub points: u8,
    pub timestamp: DateTime<Utc>,
    pub team: TeamRef,
}

/// The owning team, reduced to what the feed displays.
#[derive(Debug, Serialize)]
pub struct TeamRef {
    pub name: String,
}

/// Activity feed handler.
///
/// Returns the most recent activity entries, newest first.
pub async fn activity_handler(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<ActivityView>>, ReadError> {
    let entries = app_state.store().recent_activity(ACTIVITY_FEED_LIMIT)?;

    let views = entries
        .into_iter()
        .map(|(entry, team)| ActivityView {
            id: entry.id,
            category: entry.category,
            message: entry.message,
            points: entry.points,
            timestamp: entry.timestamp,
            team: TeamRef { name: team.name },
        })
        .collect();

    Ok(Json(views))
}
