//! Task detection from changed file paths.
//!
//! File paths carry two kinds of signal:
//!
//! - A leading `team<id>/` segment attributes a commit to a team. This is
//!   how message-based detections find out *who* completed the task.
//! - A full `team<id>/<category>/task<N>...` path is a self-attributing
//!   detection: team, category, and task number all come from the path.

use crate::types::{Category, TaskNumber};

/// A self-attributed detection extracted from a single file path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathDetection<'a> {
    /// The team segment as it appears in the path (original case preserved).
    pub team: &'a str,
    /// The category named by the second path segment.
    pub category: Category,
    /// The task number from the third segment's `task<N>` prefix.
    pub task: TaskNumber,
}

/// Extracts the team name from a path's leading segment.
///
/// Matches segments like `team1/`, `team-alpha/`, `TeamX/`: the prefix
/// `team` (case-insensitive) followed by one or more alphanumeric,
/// underscore, or hyphen characters, then a slash. The returned slice keeps
/// the path's original casing, so `Team1` and `team1` are distinct teams.
///
/// # Examples
///
/// ```
/// use taskboard::detect::team_from_path;
///
/// assert_eq!(team_from_path("team1/web/login.tsx"), Some("team1"));
/// assert_eq!(team_from_path("team-alpha/android/task2.kt"), Some("team-alpha"));
/// assert_eq!(team_from_path("docs/readme.md"), None);
/// assert_eq!(team_from_path("team1"), None); // no trailing slash
/// ```
pub fn team_from_path(path: &str) -> Option<&str> {
    let (first, _) = path.split_once('/')?;
    if is_team_segment(first) { Some(first) } else { None }
}

/// Whether a path segment is team-shaped: `team` + one or more
/// `[A-Za-z0-9_-]` characters.
fn is_team_segment(segment: &str) -> bool {
    let Some(prefix) = segment.get(..4) else {
        return false;
    };
    if !prefix.eq_ignore_ascii_case("team") {
        return false;
    }
    let id = &segment[4..];
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Detects a task completion from a file path's structure.
///
/// Matches `team<id>/<category>/task<N>...` where `<category>` is `web`,
/// `android`, or `core` (case-insensitive) and `<N>` is 1-3. Anything after
/// the digits is ignored, so `team1/web/task1_solution.js` matches.
///
/// The caller is responsible for checking the detection's category against
/// the branch context; a path pointing at a different category than the
/// pushed branch does not count.
///
/// # Examples
///
/// ```
/// use taskboard::detect::detect_task_from_path;
/// use taskboard::types::{Category, TaskNumber};
///
/// let found = detect_task_from_path("team1/web/task1_solution.js").unwrap();
/// assert_eq!(found.team, "team1");
/// assert_eq!(found.category, Category::Web);
/// assert_eq!(found.task, TaskNumber::new(1).unwrap());
///
/// assert!(detect_task_from_path("team1/web/notes.md").is_none());
/// assert!(detect_task_from_path("team1/docs/task1.md").is_none());
/// ```
pub fn detect_task_from_path(path: &str) -> Option<PathDetection<'_>> {
    let (team, rest) = path.split_once('/')?;
    if !is_team_segment(team) {
        return None;
    }

    let (category_segment, rest) = rest.split_once('/')?;
    let category = Category::parse(category_segment).filter(Category::has_tasks)?;

    let task_prefix = rest.get(..4)?;
    if !task_prefix.eq_ignore_ascii_case("task") {
        return None;
    }
    let digits_end = rest[4..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(rest.len(), |i| 4 + i);
    if digits_end == 4 {
        return None;
    }
    let n: u32 = rest[4..digits_end].parse().ok()?;
    let task = TaskNumber::new(n)?;

    Some(PathDetection {
        team,
        category,
        task,
    })
}
