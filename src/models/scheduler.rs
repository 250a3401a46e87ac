//! Difficulty-indexed spaced repetition scheduler.
//!
//! Review intervals come from a fixed per-difficulty table rather than an
//! adaptive easiness factor:
//! - Each difficulty level has an ordered sequence of day gaps, indexed by
//!   the number of completed reviews
//! - Once the review count runs past the table, the interval saturates at
//!   the last (longest) entry
//! - "Hard" words are re-shown almost immediately and grow intervals slower
//!   than "easy" words
//!
//! Every function here is pure: `now` is always an explicit parameter and
//! caller-owned words are never mutated or retained.

use super::{Difficulty, VocabularyWord};
use chrono::{DateTime, Duration, Utc};
use std::cmp::Ordering;

/// Review interval rows in days, one per difficulty, each covering 8 stages.
const INTERVALS_EASY: [i64; 8] = [1, 3, 7, 14, 30, 60, 120, 240];
const INTERVALS_MEDIUM: [i64; 8] = [1, 2, 5, 10, 21, 45, 90, 180];
const INTERVALS_HARD: [i64; 8] = [1, 1, 3, 7, 14, 30, 60, 120];

fn intervals(difficulty: Difficulty) -> &'static [i64; 8] {
    match difficulty {
        Difficulty::Easy => &INTERVALS_EASY,
        Difficulty::Medium => &INTERVALS_MEDIUM,
        Difficulty::Hard => &INTERVALS_HARD,
    }
}

/// Days until the next review for a word at the given difficulty and review
/// count. Saturates at the last table entry, capping interval growth.
pub fn interval_days(difficulty: Difficulty, review_count: u32) -> i64 {
    let row = intervals(difficulty);
    let index = (review_count as usize).min(row.len() - 1);
    row[index]
}

/// Absolute timestamp of the next review: `now` plus the table interval.
pub fn compute_next_review_at(
    difficulty: Difficulty,
    review_count: u32,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    now + Duration::days(interval_days(difficulty, review_count))
}

/// Words due for review: never reviewed, or scheduled at or before `now`.
/// A filter only — study order is [`prioritize`]'s job.
pub fn select_due<'a>(words: &'a [VocabularyWord], now: DateTime<Utc>) -> Vec<&'a VocabularyWord> {
    words
        .iter()
        .filter(|word| match word.next_review_at {
            None => true,
            Some(next) => next <= now,
        })
        .collect()
}

/// Sorts words into study order: never-reviewed words first, then earlier
/// due dates; difficulty weight (hard > medium > easy) breaks ties. The sort
/// is stable, so words equal under both criteria keep their input order.
pub fn prioritize(mut words: Vec<&VocabularyWord>) -> Vec<&VocabularyWord> {
    words.sort_by(|a, b| match (a.next_review_at, b.next_review_at) {
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x
            .cmp(&y)
            .then_with(|| b.difficulty.weight().cmp(&a.difficulty.weight())),
        (None, None) => b.difficulty.weight().cmp(&a.difficulty.weight()),
    });
    words
}

/// Applies a review outcome: bumps the review count, records the new
/// difficulty, and schedules the next review from the interval table.
/// Returns a new word value; the input is left untouched and the caller
/// decides how to persist the result.
pub fn apply_review(
    word: &VocabularyWord,
    new_difficulty: Difficulty,
    now: DateTime<Utc>,
) -> VocabularyWord {
    let new_review_count = word.review_count + 1;

    VocabularyWord {
        difficulty: new_difficulty,
        review_count: new_review_count,
        last_reviewed_at: Some(now),
        next_review_at: Some(compute_next_review_at(new_difficulty, new_review_count, now)),
        ..word.clone()
    }
}

/// Number of words currently due, for progress displays.
pub fn due_count(words: &[VocabularyWord], now: DateTime<Utc>) -> usize {
    select_due(words, now).len()
}

/// Words currently marked hard, used for the "review difficult words"
/// fallback when nothing is due.
pub fn hard_items(words: &[VocabularyWord]) -> Vec<&VocabularyWord> {
    words
        .iter()
        .filter(|word| word.difficulty == Difficulty::Hard)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn word(id: &str, difficulty: Difficulty) -> VocabularyWord {
        VocabularyWord::new(id, "list-1", id.to_string(), "def", difficulty)
    }

    fn word_due_at(id: &str, difficulty: Difficulty, next: DateTime<Utc>) -> VocabularyWord {
        let mut w = word(id, difficulty);
        w.review_count = 1;
        w.last_reviewed_at = Some(next - Duration::days(1));
        w.next_review_at = Some(next);
        w
    }

    #[test]
    fn test_interval_table_lookup() {
        assert_eq!(interval_days(Difficulty::Easy, 0), 1);
        assert_eq!(interval_days(Difficulty::Easy, 2), 7);
        assert_eq!(interval_days(Difficulty::Medium, 3), 10);
        assert_eq!(interval_days(Difficulty::Hard, 1), 1);
    }

    #[test]
    fn test_interval_saturates_past_table_end() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let last = interval_days(difficulty, 7);
            assert_eq!(interval_days(difficulty, 8), last);
            assert_eq!(interval_days(difficulty, 100), last);
            assert_eq!(interval_days(difficulty, u32::MAX), last);
        }
        assert_eq!(interval_days(Difficulty::Easy, 50), 240);
    }

    #[test]
    fn test_select_due_absent_or_past() {
        let now = t0();
        let never = word("never", Difficulty::Medium);
        let overdue = word_due_at("overdue", Difficulty::Easy, now - Duration::days(2));
        let exactly_now = word_due_at("now", Difficulty::Easy, now);
        let future = word_due_at("future", Difficulty::Hard, now + Duration::days(3));

        let words = vec![never, overdue, exactly_now, future];
        let due = select_due(&words, now);

        let ids: Vec<&str> = due.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["never", "overdue", "now"]);
    }

    #[test]
    fn test_select_due_empty_input() {
        assert!(select_due(&[], t0()).is_empty());
    }

    #[test]
    fn test_prioritize_never_reviewed_first() {
        let now = t0();
        let scheduled_early = word_due_at("early", Difficulty::Hard, now - Duration::days(5));
        let never = word("never", Difficulty::Easy);
        let scheduled_late = word_due_at("late", Difficulty::Hard, now - Duration::days(1));

        let words = vec![scheduled_early.clone(), never.clone(), scheduled_late.clone()];
        let ordered = prioritize(words.iter().collect());

        let ids: Vec<&str> = ordered.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["never", "early", "late"]);
    }

    #[test]
    fn test_prioritize_hard_before_easy_among_unreviewed() {
        let easy = word("easy", Difficulty::Easy);
        let hard = word("hard", Difficulty::Hard);
        let medium = word("medium", Difficulty::Medium);

        let words = vec![easy.clone(), medium.clone(), hard.clone()];
        let ordered = prioritize(words.iter().collect());

        let ids: Vec<&str> = ordered.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["hard", "medium", "easy"]);
    }

    #[test]
    fn test_prioritize_difficulty_breaks_exact_timestamp_ties() {
        let due = t0();
        let easy = word_due_at("easy", Difficulty::Easy, due);
        let hard = word_due_at("hard", Difficulty::Hard, due);

        let words = vec![easy, hard];
        let ordered = prioritize(words.iter().collect());
        assert_eq!(ordered[0].id, "hard");
        assert_eq!(ordered[1].id, "easy");
    }

    #[test]
    fn test_prioritize_is_stable() {
        let a = word("a", Difficulty::Medium);
        let b = word("b", Difficulty::Medium);
        let c = word("c", Difficulty::Medium);

        let words = vec![a, b, c];
        let ordered = prioritize(words.iter().collect());

        let ids: Vec<&str> = ordered.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_apply_review_increments_and_reschedules() {
        let now = t0();
        let original = word("w1", Difficulty::Medium);

        let updated = apply_review(&original, Difficulty::Hard, now);

        assert_eq!(updated.review_count, 1);
        assert_eq!(updated.difficulty, Difficulty::Hard);
        assert_eq!(updated.last_reviewed_at, Some(now));
        // hard row, stage 1: one day out
        assert_eq!(updated.next_review_at, Some(now + Duration::days(1)));

        // input untouched
        assert_eq!(original.review_count, 0);
        assert!(original.next_review_at.is_none());
        assert_eq!(original.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_second_review_uses_new_difficulty_row() {
        let now = t0();
        let first = apply_review(&word("w1", Difficulty::Medium), Difficulty::Hard, now);

        let t1 = now + Duration::days(1);
        let second = apply_review(&first, Difficulty::Easy, t1);

        assert_eq!(second.review_count, 2);
        assert_eq!(second.difficulty, Difficulty::Easy);
        // easy row, stage 2: seven days out
        assert_eq!(second.next_review_at, Some(t1 + Duration::days(7)));
    }

    #[test]
    fn test_due_count_matches_select_due() {
        let now = t0();
        let words = vec![
            word("a", Difficulty::Medium),
            word_due_at("b", Difficulty::Easy, now + Duration::days(1)),
            word_due_at("c", Difficulty::Hard, now - Duration::days(1)),
        ];
        assert_eq!(due_count(&words, now), select_due(&words, now).len());
        assert_eq!(due_count(&words, now), 2);
    }

    #[test]
    fn test_hard_items_filters_by_difficulty() {
        let words = vec![
            word("a", Difficulty::Hard),
            word("b", Difficulty::Easy),
            word("c", Difficulty::Hard),
        ];
        let hard = hard_items(&words);
        let ids: Vec<&str> = hard.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
