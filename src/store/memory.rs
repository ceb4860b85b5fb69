//! In-memory store implementation.
//!
//! Backs the binary and the test suite. All state lives behind a single
//! mutex; every trait method takes the lock, applies one logical operation,
//! and releases it, which gives the same isolation a database would provide
//! per statement. Uniqueness constraints are enforced on write, matching
//! the trait contract.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::types::{Category, TaskNumber, TeamId};

use super::{ActivityRecord, CategoryRow, Store, StoreError, TaskRecord, Team};

#[derive(Debug, Default)]
struct Inner {
    next_team_id: u64,
    next_activity_id: u64,
    teams: BTreeMap<TeamId, Team>,
    categories: BTreeMap<(TeamId, Category), CategoryRow>,
    tasks: BTreeMap<(TeamId, Category, TaskNumber), TaskRecord>,
    activity: Vec<ActivityRecord>,
}

/// A [`Store`] keeping everything in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    fn locked(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))
    }
}

impl Store for MemoryStore {
    fn team_by_name(&self, name: &str) -> Result<Option<Team>, StoreError> {
        let inner = self.locked()?;
        Ok(inner.teams.values().find(|t| t.name == name).cloned())
    }

    fn create_team(&self, name: &str, avatar: &str) -> Result<Team, StoreError> {
        let mut inner = self.locked()?;
        if inner.teams.values().any(|t| t.name == name) {
            return Err(StoreError::UniqueViolation("team.name"));
        }

        let id = TeamId(inner.next_team_id);
        inner.next_team_id += 1;
        let team = Team {
            id,
            name: name.to_string(),
            avatar: avatar.to_string(),
        };
        inner.teams.insert(id, team.clone());
        Ok(team)
    }

    fn task_exists(
        &self,
        team: TeamId,
        category: Category,
        task: TaskNumber,
    ) -> Result<bool, StoreError> {
        let inner = self.locked()?;
        Ok(inner.tasks.contains_key(&(team, category, task)))
    }

    fn record_task(&self, record: TaskRecord) -> Result<(), StoreError> {
        let mut inner = self.locked()?;
        let key = (record.team_id, record.category, record.task);
        if inner.tasks.contains_key(&key) {
            return Err(StoreError::UniqueViolation("task.team_category_number"));
        }
        inner.tasks.insert(key, record);
        Ok(())
    }

    fn bump_category(
        &self,
        team: TeamId,
        name: Category,
        now: DateTime<Utc>,
    ) -> Result<CategoryRow, StoreError> {
        let mut inner = self.locked()?;
        let row = inner
            .categories
            .entry((team, name))
            .and_modify(|row| {
                row.tasks_completed += 1;
                row.last_active = now;
            })
            .or_insert(CategoryRow {
                team_id: team,
                name,
                tasks_completed: 1,
                last_active: now,
            });
        Ok(row.clone())
    }

    fn append_activity(
        &self,
        team: TeamId,
        category: Category,
        message: &str,
        points: u8,
        timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut inner = self.locked()?;
        let id = inner.next_activity_id;
        inner.next_activity_id += 1;
        inner.activity.push(ActivityRecord {
            id,
            team_id: team,
            category,
            message: message.to_string(),
            points,
            timestamp,
        });
        Ok(())
    }

    fn categories_named(&self, name: Category) -> Result<Vec<(CategoryRow, Team)>, StoreError> {
        let inner = self.locked()?;
        Ok(inner
            .categories
            .values()
            .filter(|row| row.name == name)
            .filter_map(|row| {
                inner
                    .teams
                    .get(&row.team_id)
                    .map(|team| (row.clone(), team.clone()))
            })
            .collect())
    }

    fn recent_activity(&self, limit: usize) -> Result<Vec<(ActivityRecord, Team)>, StoreError> {
        let inner = self.locked()?;
        Ok(inner
            .activity
            .iter()
            .rev()
            .filter_map(|entry| {
                inner
                    .teams
                    .get(&entry.team_id)
                    .map(|team| (entry.clone(), team.clone()))
            })
            .take(limit)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sha;

    fn task_record(team: TeamId, category: Category, n: u32) -> TaskRecord {
        TaskRecord {
            team_id: team,
            category,
            task: TaskNumber::new(n).unwrap(),
            commit_hash: Some(Sha::new("abc123")),
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn team_names_are_unique() {
        let store = MemoryStore::new();
        store.create_team("team1", "avatar").unwrap();

        let err = store.create_team("team1", "other-avatar").unwrap_err();
        assert_eq!(err, StoreError::UniqueViolation("team.name"));
    }

    #[test]
    fn team_lookup_by_name() {
        let store = MemoryStore::new();
        let created = store.create_team("team1", "avatar").unwrap();

        assert_eq!(store.team_by_name("team1").unwrap(), Some(created));
        assert_eq!(store.team_by_name("team2").unwrap(), None);
    }

    #[test]
    fn task_records_are_unique_per_triple() {
        let store = MemoryStore::new();
        let team = store.create_team("team1", "a").unwrap();

        store.record_task(task_record(team.id, Category::Web, 1)).unwrap();
        assert!(store
            .task_exists(team.id, Category::Web, TaskNumber::new(1).unwrap())
            .unwrap());

        let err = store
            .record_task(task_record(team.id, Category::Web, 1))
            .unwrap_err();
        assert_eq!(err, StoreError::UniqueViolation("task.team_category_number"));

        // Same task number in a different category is a different fact
        store.record_task(task_record(team.id, Category::Core, 1)).unwrap();
    }

    #[test]
    fn bump_category_creates_then_increments() {
        let store = MemoryStore::new();
        let team = store.create_team("team1", "a").unwrap();

        let t1 = Utc::now();
        let row = store.bump_category(team.id, Category::Web, t1).unwrap();
        assert_eq!(row.tasks_completed, 1);
        assert_eq!(row.last_active, t1);

        let t2 = t1 + chrono::Duration::seconds(5);
        let row = store.bump_category(team.id, Category::Web, t2).unwrap();
        assert_eq!(row.tasks_completed, 2);
        assert_eq!(row.last_active, t2);
    }

    #[test]
    fn categories_named_joins_teams() {
        let store = MemoryStore::new();
        let a = store.create_team("team-a", "x").unwrap();
        let b = store.create_team("team-b", "y").unwrap();
        let now = Utc::now();

        store.bump_category(a.id, Category::Web, now).unwrap();
        store.bump_category(b.id, Category::Web, now).unwrap();
        store.bump_category(b.id, Category::Core, now).unwrap();

        let web = store.categories_named(Category::Web).unwrap();
        assert_eq!(web.len(), 2);
        assert!(web.iter().any(|(_, t)| t.name == "team-a"));
        assert!(web.iter().any(|(_, t)| t.name == "team-b"));

        assert_eq!(store.categories_named(Category::Android).unwrap().len(), 0);
    }

    #[test]
    fn recent_activity_is_newest_first_and_limited() {
        let store = MemoryStore::new();
        let team = store.create_team("team1", "a").unwrap();
        let now = Utc::now();

        for n in 1..=3u8 {
            store
                .append_activity(
                    team.id,
                    Category::Web,
                    &format!("Completed Task {}", n),
                    n,
                    now,
                )
                .unwrap();
        }

        let recent = store.recent_activity(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].0.message, "Completed Task 3");
        assert_eq!(recent[1].0.message, "Completed Task 2");
        assert_eq!(recent[0].1.name, "team1");
    }
}
