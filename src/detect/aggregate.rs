//! Per-delivery completion aggregation.
//!
//! Merges the two extraction signals across every commit of one webhook
//! delivery into a deduplicated map of team name to detected task numbers,
//! scoped to the single category resolved from the pushed branch.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{Category, TaskNumber};
use crate::webhooks::PushCommit;

use super::message::detect_task_from_message;
use super::path::{detect_task_from_path, team_from_path};

/// Detected completions for one delivery: team name to distinct task numbers.
///
/// BTree collections keep team order and task order deterministic, so the
/// updater processes task numbers ascending and the activity log comes out
/// in a stable order.
pub type CompletionMap = BTreeMap<String, BTreeSet<TaskNumber>>;

/// Aggregates task completions across all commits in one delivery.
///
/// Both signals run for every commit and their results are unioned:
///
/// - A message-detected task is credited to *every* team whose files appear
///   in that commit. A commit touching several teams' paths over-attributes
///   by design; see the module docs on [`crate::detect`].
/// - A path-detected triple is self-attributing but only counts when its
///   category matches the branch category.
///
/// A message detection with no team-shaped path in the same commit is
/// unattributable and silently dropped; that is intentional data loss, not
/// an error.
pub fn aggregate_completions(commits: &[PushCommit], category: Category) -> CompletionMap {
    let mut completions = CompletionMap::new();

    for commit in commits {
        // Signal 1: commit message, attributed to every team in the commit
        if let Some(task) = detect_task_from_message(&commit.message) {
            let teams: BTreeSet<&str> = commit.changed_files().filter_map(team_from_path).collect();
            for team in teams {
                completions.entry(team.to_string()).or_default().insert(task);
            }
        }

        // Signal 2: structural file paths, self-attributing
        for file in commit.changed_files() {
            if let Some(found) = detect_task_from_path(file) {
                if found.category == category {
                    completions
                        .entry(found.team.to_string())
                        .or_default()
                        .insert(found.task);
                }
            }
        }
    }

    completions
}
