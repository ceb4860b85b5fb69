//! Task categories and the branch-to-category mapping.
//!
//! Progress is partitioned into three task-bearing categories (one per
//! branch) plus a synthetic `Global` aggregate that accumulates across all
//! three. Pushes to any branch that isn't `web`, `android`, or `core` map to
//! `Global`, which signals "no tasks on this branch" to the webhook flow.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named partition of team progress.
///
/// Serializes as the capitalized name (`"Web"`, `"Android"`, `"Core"`,
/// `"Global"`), which is also the form stored and exposed over the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Web,
    Android,
    Core,
    /// Synthetic aggregate of the three task-bearing categories.
    Global,
}

impl Category {
    /// The three categories that actually carry tasks.
    pub const TASK_BEARING: [Category; 3] = [Category::Web, Category::Android, Category::Core];

    /// Maps a git ref (e.g. `refs/heads/web`) to a category.
    ///
    /// The branch name after the `refs/heads/` prefix is matched
    /// case-insensitively; unrecognized branches map to [`Category::Global`].
    pub fn from_ref(git_ref: &str) -> Category {
        let branch = git_ref.strip_prefix("refs/heads/").unwrap_or(git_ref);
        Category::parse(branch).unwrap_or(Category::Global)
    }

    /// Parses a category name case-insensitively.
    ///
    /// Unlike [`Category::from_ref`] this returns `None` for unrecognized
    /// names, so callers can distinguish "Global" from "unknown".
    pub fn parse(name: &str) -> Option<Category> {
        if name.eq_ignore_ascii_case("web") {
            Some(Category::Web)
        } else if name.eq_ignore_ascii_case("android") {
            Some(Category::Android)
        } else if name.eq_ignore_ascii_case("core") {
            Some(Category::Core)
        } else if name.eq_ignore_ascii_case("global") {
            Some(Category::Global)
        } else {
            None
        }
    }

    /// Returns the capitalized display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Web => "Web",
            Category::Android => "Android",
            Category::Core => "Core",
            Category::Global => "Global",
        }
    }

    /// Whether this category carries tasks. `Global` does not; it only
    /// aggregates counts from the other three.
    pub fn has_tasks(&self) -> bool {
        !matches!(self, Category::Global)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
