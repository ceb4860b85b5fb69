//! Idempotent application of detected completions to the store.
//!
//! Each (team, task) pair is one logical unit: resolve the team, check for
//! an existing completion fact, and if absent record it plus its derived
//! updates (category counter, Global counter, activity entry). The check is
//! an early exit only; the store's unique index on (team, category, task)
//! is the correctness backstop, and a lost race surfaces as
//! [`StoreError::UniqueViolation`] which is folded into the same
//! `already_completed` outcome.
//!
//! Pairs are isolated from each other: a store failure on one pair is
//! logged, reported as `failed` for that pair, and processing continues.
//! Already-committed pairs are never rolled back.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::detect::CompletionMap;
use crate::store::{Store, StoreError, TaskRecord, Team};
use crate::types::{Category, Sha, TaskNumber};

use super::avatar::generate_team_avatar;

/// Outcome of applying one (team, task) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    /// The completion was recorded by this delivery.
    Completed,
    /// The completion was already on record; nothing changed.
    AlreadyCompleted,
    /// The store failed while processing this pair. Other pairs in the
    /// delivery are unaffected.
    Failed,
}

/// Per-pair result reported back to the webhook caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairOutcome {
    pub team: String,
    pub category: Category,
    pub task: TaskNumber,
    pub status: CompletionStatus,
}

/// Applies every aggregated completion against the store.
///
/// Teams are processed in name order and task numbers ascending (the
/// [`CompletionMap`] guarantees both), so activity entries come out in a
/// deterministic order. `trigger_commit` is the first commit of the
/// delivery and is stored on every new completion fact from it, which by
/// convention may differ from the commit that caused the detection.
pub fn apply_completions(
    store: &dyn Store,
    category: Category,
    completions: &CompletionMap,
    trigger_commit: Option<&Sha>,
) -> Vec<PairOutcome> {
    let mut outcomes = Vec::new();

    for (team_name, tasks) in completions {
        let team = match resolve_team(store, team_name) {
            Ok(team) => Some(team),
            Err(err) => {
                warn!(team = %team_name, error = %err, "failed to resolve team");
                None
            }
        };

        for &task in tasks {
            let status = match &team {
                Some(team) => apply_pair(store, team, category, task, trigger_commit),
                // Team resolution failed; every pair for it fails
                None => CompletionStatus::Failed,
            };
            outcomes.push(PairOutcome {
                team: team_name.clone(),
                category,
                task,
                status,
            });
        }
    }

    outcomes
}

/// Finds a team by name, creating it with a generated avatar if absent.
///
/// A lost creation race (another delivery created the team between the
/// lookup and the insert) is resolved by looking the name up again.
fn resolve_team(store: &dyn Store, name: &str) -> Result<Team, StoreError> {
    if let Some(team) = store.team_by_name(name)? {
        return Ok(team);
    }

    match store.create_team(name, &generate_team_avatar(name)) {
        Ok(team) => {
            info!(team = %name, "created team");
            Ok(team)
        }
        Err(StoreError::UniqueViolation(_)) => store.team_by_name(name)?.ok_or_else(|| {
            StoreError::Unavailable(format!("team {name} vanished after create conflict"))
        }),
        Err(err) => Err(err),
    }
}

/// Applies a single (team, task) pair, mapping store errors to `Failed`.
fn apply_pair(
    store: &dyn Store,
    team: &Team,
    category: Category,
    task: TaskNumber,
    trigger_commit: Option<&Sha>,
) -> CompletionStatus {
    match record_completion(store, team, category, task, trigger_commit) {
        Ok(status) => status,
        Err(err) => {
            warn!(
                team = %team.name,
                category = %category,
                task = %task,
                error = %err,
                "failed to record task completion"
            );
            CompletionStatus::Failed
        }
    }
}

fn record_completion(
    store: &dyn Store,
    team: &Team,
    category: Category,
    task: TaskNumber,
    trigger_commit: Option<&Sha>,
) -> Result<CompletionStatus, StoreError> {
    if store.task_exists(team.id, category, task)? {
        return Ok(CompletionStatus::AlreadyCompleted);
    }

    let now = Utc::now();
    let insert = store.record_task(TaskRecord {
        team_id: team.id,
        category,
        task,
        commit_hash: trigger_commit.cloned(),
        recorded_at: now,
    });

    match insert {
        Ok(()) => {}
        // Another delivery won the race; same idempotent outcome
        Err(StoreError::UniqueViolation(_)) => return Ok(CompletionStatus::AlreadyCompleted),
        Err(err) => return Err(err),
    }

    store.bump_category(team.id, category, now)?;
    store.bump_category(team.id, Category::Global, now)?;
    store.append_activity(
        team.id,
        category,
        &format!("Completed Task {}", task),
        task.get(),
        now,
    )?;

    info!(
        team = %team.name,
        category = %category,
        task = %task,
        commit = trigger_commit.map(Sha::short),
        "task completion recorded"
    );

    Ok(CompletionStatus::Completed)
}
