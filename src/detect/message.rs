//! Task detection from commit messages.
//!
//! This is one of the two extraction signals: a pure parser that scans
//! free-text commit messages for task-completion phrases.

use crate::types::TaskNumber;

/// Words that mark a task as completed in a commit message.
const COMPLETION_WORDS: &[&str] = &["done", "complete", "completed", "finished"];

/// Detects a completed task number from a commit message.
///
/// # Parsing Rules
///
/// Three patterns are tried in order, all case-insensitive, with optional
/// whitespace between tokens and no word-boundary requirement:
///
/// 1. `task <N> <completion-word>` (e.g. "Task 1 Done - login")
/// 2. `<completion-word> task <N>` (e.g. "Completed Task 2")
/// 3. bare `task <N>` (e.g. "task 3")
///
/// The first pattern that matches wins. Its number is accepted only in the
/// 1-3 range; an out-of-range number means no detection for the whole
/// message (it does not fall through to later patterns).
///
/// # Examples
///
/// ```
/// use taskboard::detect::detect_task_from_message;
/// use taskboard::types::TaskNumber;
///
/// assert_eq!(detect_task_from_message("Task 1 Done - login"), TaskNumber::new(1));
/// assert_eq!(detect_task_from_message("Completed Task 2"), TaskNumber::new(2));
/// assert_eq!(detect_task_from_message("task 5 done"), None);
/// assert_eq!(detect_task_from_message("refactor build scripts"), None);
/// ```
pub fn detect_task_from_message(message: &str) -> Option<TaskNumber> {
    let lower = message.to_ascii_lowercase();

    let n = task_then_completion(&lower)
        .or_else(|| completion_then_task(&lower))
        .or_else(|| bare_task(&lower))?;

    TaskNumber::new(n)
}

/// Pattern 1: `task <N> <completion-word>`. Returns the first match by
/// position in the message.
fn task_then_completion(lower: &str) -> Option<u32> {
    for (pos, _) in lower.match_indices("task") {
        if let Some((n, rest)) = read_number(&lower[pos + 4..]) {
            let rest = rest.trim_start();
            if COMPLETION_WORDS.iter().any(|w| rest.starts_with(w)) {
                return Some(n);
            }
        }
    }
    None
}

/// Pattern 2: `<completion-word> task <N>`. Returns the leftmost match
/// across all completion words.
fn completion_then_task(lower: &str) -> Option<u32> {
    let mut earliest: Option<(usize, u32)> = None;

    for word in COMPLETION_WORDS {
        for (pos, _) in lower.match_indices(word) {
            let rest = lower[pos + word.len()..].trim_start();
            let Some(rest) = rest.strip_prefix("task") else {
                continue;
            };
            if let Some((n, _)) = read_number(rest) {
                if earliest.is_none_or(|(p, _)| pos < p) {
                    earliest = Some((pos, n));
                }
                // match_indices yields ascending positions, so later
                // occurrences of this word cannot improve on this one
                break;
            }
        }
    }

    earliest.map(|(_, n)| n)
}

/// Pattern 3: bare `task <N>`.
fn bare_task(lower: &str) -> Option<u32> {
    for (pos, _) in lower.match_indices("task") {
        if let Some((n, _)) = read_number(&lower[pos + 4..]) {
            return Some(n);
        }
    }
    None
}

/// Reads optional whitespace followed by one or more ASCII digits.
///
/// Returns the parsed number and the remaining text. Numbers too large for
/// `u32` return `None`, which downstream range checks would reject anyway.
fn read_number(text: &str) -> Option<(u32, &str)> {
    let text = text.trim_start();
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    if end == 0 {
        return None;
    }
    let n = text[..end].parse().ok()?;
    Some((n, &text[end..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn detect(message: &str) -> Option<u8> {
        detect_task_from_message(message).map(TaskNumber::get)
    }

    // ==================== Pattern 1: task N <word> ====================

    #[test]
    fn task_number_then_completion_word() {
        assert_eq!(detect("Task 1 Done - login"), Some(1));
        assert_eq!(detect("task 2 complete"), Some(2));
        assert_eq!(detect("TASK 3 FINISHED"), Some(3));
    }

    #[test]
    fn whitespace_between_tokens_is_optional() {
        assert_eq!(detect("task1done"), Some(1));
        assert_eq!(detect("task  2   completed"), Some(2));
        assert_eq!(detect("task\n3\ndone"), Some(3));
    }

    // ==================== Pattern 2: <word> task N ====================

    #[test]
    fn completion_word_then_task_number() {
        assert_eq!(detect("Completed Task 2"), Some(2));
        assert_eq!(detect("finished task 1 at last"), Some(1));
        assert_eq!(detect("Done task3"), Some(3));
    }

    // ==================== Pattern 3: bare task N ====================

    #[test]
    fn bare_task_reference() {
        assert_eq!(detect("task 2"), Some(2));
        assert_eq!(detect("progress on task 3 continues"), Some(3));
    }

    // ==================== Range handling ====================

    #[test]
    fn out_of_range_is_no_detection() {
        assert_eq!(detect("task 5 done"), None);
        assert_eq!(detect("task 0 done"), None);
        assert_eq!(detect("Completed Task 12"), None);
        assert_eq!(detect("task 99999999999999999999 done"), None);
    }

    #[test]
    fn first_match_wins_even_when_out_of_range() {
        // Pattern 1 matches "task 5 done" first; its out-of-range number
        // suppresses the whole message rather than falling through to the
        // valid bare reference later.
        assert_eq!(detect("task 5 done, see also task 2"), None);
    }

    // ==================== Misc behavior ====================

    #[test]
    fn no_task_keyword_means_no_detection() {
        assert_eq!(detect(""), None);
        assert_eq!(detect("fix flaky CI"), None);
        assert_eq!(detect("done with the 2 refactors"), None);
    }

    #[test]
    fn substring_matches_are_allowed() {
        // No word boundaries: "multitask 1 done" still detects.
        assert_eq!(detect("multitask 1 done"), Some(1));
    }

    #[test]
    fn leftmost_completion_word_wins_in_pattern_two() {
        // "finished task 2" appears before "done task 5"; the leftmost
        // occurrence decides, so detection yields 2.
        assert_eq!(detect("finished task 2 but done task 5"), Some(2));
    }

    #[test]
    fn task_without_number_is_ignored() {
        assert_eq!(detect("task done"), None);
        assert_eq!(detect("task force assembled"), None);
    }

    proptest! {
        /// Arbitrary text never panics.
        #[test]
        fn arbitrary_text_never_panics(message: String) {
            let _ = detect_task_from_message(&message);
        }

        /// Every detection is within the valid task range.
        #[test]
        fn detections_are_always_in_range(message: String) {
            if let Some(task) = detect_task_from_message(&message) {
                prop_assert!((1..=3).contains(&task.get()));
            }
        }

        /// The canonical completion phrasings always detect.
        #[test]
        fn canonical_phrasings_detect(
            n in 1u32..=3,
            word in prop_oneof![
                Just("done"), Just("complete"), Just("completed"), Just("finished")
            ]
        ) {
            let forward = format!("task {} {}", n, word);
            let reversed = format!("{} task {}", word, n);
            prop_assert_eq!(detect_task_from_message(&forward), TaskNumber::new(n));
            prop_assert_eq!(detect_task_from_message(&reversed), TaskNumber::new(n));
        }
    }
}
