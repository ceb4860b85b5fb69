//! Core domain types for the task leaderboard.
//!
//! This module contains the fundamental types used throughout the
//! application, designed to encode invariants via the type system.

pub mod category;
pub mod ids;

// Re-export commonly used types at the module level
pub use category::Category;
pub use ids::{Sha, TaskNumber, TeamId};
