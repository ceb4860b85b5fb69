//! Taskboard - a webhook-driven task completion leaderboard.
//!
//! Ingests GitHub push events, authenticates them with HMAC-SHA256,
//! extracts which teams completed which numbered tasks (from commit
//! messages and file paths), records each completion exactly once, and
//! serves leaderboard and activity read models.

pub mod detect;
pub mod progress;
pub mod server;
pub mod store;
pub mod types;
pub mod webhooks;
