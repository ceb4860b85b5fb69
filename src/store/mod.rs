//! Persistence interface consumed by the core.
//!
//! The core never talks to a concrete database; it threads a [`Store`]
//! handle through every component instead of holding ambient global state.
//! Correctness under concurrent deliveries rests on the store's uniqueness
//! constraints (unique team names, unique (team, category, task) triples),
//! not on in-process locking: the application-level existence check in the
//! updater is an early-exit optimization, and [`StoreError::UniqueViolation`]
//! is the final backstop when that check loses a race.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Category, Sha, TaskNumber, TeamId};

pub mod memory;

pub use memory::MemoryStore;

/// A team row: identity, unique name, display avatar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Opaque avatar URI (a data URL in practice).
    pub avatar: String,
}

/// Per-team progress within one category.
///
/// One row exists per (team, category) pair. `Global` rows aggregate the
/// counts of the three task-bearing categories for their team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRow {
    pub team_id: TeamId,
    pub name: Category,
    pub tasks_completed: u32,
    pub last_active: DateTime<Utc>,
}

/// A completion fact. Created exactly once per (team, category, task) and
/// never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub team_id: TeamId,
    pub category: Category,
    pub task: TaskNumber,
    /// The first commit of the triggering delivery, when it carried an id.
    pub commit_hash: Option<Sha>,
    pub recorded_at: DateTime<Utc>,
}

/// An append-only activity feed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: u64,
    pub team_id: TeamId,
    pub category: Category,
    pub message: String,
    /// Numeric payload; carries the task number for completion entries.
    pub points: u8,
    pub timestamp: DateTime<Utc>,
}

/// Errors surfaced by a store implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint rejected a write. The argument names the
    /// constraint (e.g. `"task.team_category_number"`).
    #[error("unique constraint violated: {0}")]
    UniqueViolation(&'static str),

    /// The store could not service the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// The persistence operations the core depends on.
///
/// Implementations must enforce two uniqueness constraints: team names, and
/// (team, category, task) triples in [`Store::record_task`]. Both report
/// violations as [`StoreError::UniqueViolation`] so callers can remap lost
/// races to idempotent outcomes.
pub trait Store: Send + Sync {
    /// Looks up a team by its unique name.
    fn team_by_name(&self, name: &str) -> Result<Option<Team>, StoreError>;

    /// Creates a team. Fails with `UniqueViolation` if the name is taken.
    fn create_team(&self, name: &str, avatar: &str) -> Result<Team, StoreError>;

    /// Whether a completion fact exists for (team, category, task).
    fn task_exists(
        &self,
        team: TeamId,
        category: Category,
        task: TaskNumber,
    ) -> Result<bool, StoreError>;

    /// Records a completion fact. Fails with `UniqueViolation` if the
    /// (team, category, task) triple is already recorded.
    fn record_task(&self, record: TaskRecord) -> Result<(), StoreError>;

    /// Increments the tasks-completed count for (team, category), creating
    /// the row with a count of 1 if absent. Also refreshes `last_active`.
    fn bump_category(
        &self,
        team: TeamId,
        name: Category,
        now: DateTime<Utc>,
    ) -> Result<CategoryRow, StoreError>;

    /// Appends an activity entry.
    fn append_activity(
        &self,
        team: TeamId,
        category: Category,
        message: &str,
        points: u8,
        timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// All category rows with the given name, each joined to its team.
    /// No ordering guarantee; read projections sort.
    fn categories_named(&self, name: Category) -> Result<Vec<(CategoryRow, Team)>, StoreError>;

    /// The most recent activity entries, newest first, joined to teams.
    fn recent_activity(&self, limit: usize) -> Result<Vec<(ActivityRecord, Team)>, StoreError>;
}
