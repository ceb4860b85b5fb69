//! Typed representation of GitHub push-event payloads.
//!
//! Only push events matter to the leaderboard; anything without `ref` and
//! `commits` is "not a push event" and is acknowledged as expected traffic
//! rather than rejected. Parsing is therefore lenient: unknown fields are
//! ignored and missing commit fields default to empty.

use serde::Deserialize;

/// A single commit within a push event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PushCommit {
    /// The commit SHA.
    #[serde(default)]
    pub id: String,

    /// The commit message.
    #[serde(default)]
    pub message: String,

    /// Paths added by this commit.
    #[serde(default)]
    pub added: Vec<String>,

    /// Paths modified by this commit.
    #[serde(default)]
    pub modified: Vec<String>,

    /// Paths removed by this commit.
    ///
    /// Carried for completeness; removals never count toward task detection.
    #[serde(default)]
    pub removed: Vec<String>,
}

impl PushCommit {
    /// Iterates over the added and modified paths of this commit.
    ///
    /// These are the paths task detection looks at; removed files are excluded.
    pub fn changed_files(&self) -> impl Iterator<Item = &str> {
        self.added
            .iter()
            .chain(self.modified.iter())
            .map(String::as_str)
    }
}

/// A GitHub push event: a ref plus the ordered list of pushed commits.
#[derive(Debug, Clone)]
pub struct PushEvent {
    /// The pushed ref (e.g. `refs/heads/web`).
    pub git_ref: String,

    /// The commits in this delivery, in push order.
    pub commits: Vec<PushCommit>,
}

/// Raw payload shape used to probe whether a delivery is a push event.
#[derive(Debug, Deserialize)]
struct RawPayload {
    #[serde(rename = "ref")]
    git_ref: Option<String>,
    commits: Option<Vec<PushCommit>>,
}

impl PushEvent {
    /// Extracts a push event from a parsed webhook payload.
    ///
    /// Returns `None` when the payload is not push-shaped (missing `ref` or
    /// `commits`, or commits of the wrong type). GitHub delivers many event
    /// kinds to the same endpoint, so this is a normal outcome.
    pub fn from_value(payload: &serde_json::Value) -> Option<PushEvent> {
        let raw: RawPayload = serde_json::from_value(payload.clone()).ok()?;
        Some(PushEvent {
            git_ref: raw.git_ref?,
            commits: raw.commits?,
        })
    }
}
