//! Task extraction from push-event contents.
//!
//! This module is the pure-function layer that turns commits into candidate
//! (team, task) facts. Two independent, non-exclusive signals are evaluated
//! for every commit and unioned:
//!
//! - **Commit messages**: phrases like "Task 1 Done" or "Completed Task 2",
//!   credited to every team whose files the commit touches.
//! - **File paths**: structural `team<id>/<category>/task<N>` paths, which
//!   attribute themselves.
//!
//! The message signal deliberately credits *all* teams appearing in the same
//! commit. That over-attributes when one commit touches multiple teams'
//! paths for unrelated reasons, but it is the observed contract of the
//! system and is preserved as such.

pub mod aggregate;
pub mod message;
pub mod path;

pub use aggregate::{CompletionMap, aggregate_completions};
pub use message::detect_task_from_message;
pub use path::{PathDetection, detect_task_from_path, team_from_path};
