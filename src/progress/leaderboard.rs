//! Leaderboard read projection.
//!
//! A pure transformation from stored (category row, team) pairs to the
//! ranked entries the dashboard consumes. Ranking is tasks-completed
//! descending, ties broken by earlier `last_active` (rewarding speed).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{CategoryRow, Team};
use crate::types::{TaskNumber, TeamId};

/// One ranked leaderboard row.
///
/// Serializes in the camelCase shape the dashboard API exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: TeamId,
    pub name: String,
    pub avatar: String,
    pub tasks_completed: u32,
    /// `milestones[i]` is true iff at least `i + 1` tasks are completed.
    pub milestones: [bool; 3],
    pub completion_percentage: u32,
    pub last_active: DateTime<Utc>,
}

/// Milestone vector for a completed-task count.
pub fn milestones(tasks_completed: u32) -> [bool; 3] {
    [tasks_completed >= 1, tasks_completed >= 2, tasks_completed >= 3]
}

/// Completion percentage, rounded and clamped to 0-100.
pub fn completion_percentage(tasks_completed: u32) -> u32 {
    if tasks_completed >= TaskNumber::COUNT {
        return 100;
    }
    // Rounded integer division keeps this off floating point:
    // 1 of 3 -> 33, 2 of 3 -> 67.
    (tasks_completed * 100 + TaskNumber::COUNT / 2) / TaskNumber::COUNT
}

/// Ranks category rows into leaderboard entries.
pub fn build_leaderboard(mut rows: Vec<(CategoryRow, Team)>) -> Vec<LeaderboardEntry> {
    rows.sort_by(|(a, _), (b, _)| {
        b.tasks_completed
            .cmp(&a.tasks_completed)
            .then(a.last_active.cmp(&b.last_active))
    });

    rows.into_iter()
        .map(|(row, team)| LeaderboardEntry {
            id: team.id,
            name: team.name,
            avatar: team.avatar,
            tasks_completed: row.tasks_completed,
            milestones: milestones(row.tasks_completed),
            completion_percentage: completion_percentage(row.tasks_completed),
            last_active: row.last_active,
        })
        .collect()
}
