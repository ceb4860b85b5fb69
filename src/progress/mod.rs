//! Progress recording and read models.
//!
//! This module owns the write path (the idempotent state updater) and the
//! read path (the leaderboard projection), plus avatar generation for
//! lazily created teams.

pub mod avatar;
pub mod leaderboard;
pub mod updater;

pub use avatar::generate_team_avatar;
pub use leaderboard::{LeaderboardEntry, build_leaderboard, completion_percentage, milestones};
pub use updater::{CompletionStatus, PairOutcome, apply_completions};
