//! Study session management for spaced repetition practice.
//! Walks a bounded queue of due words, one at a time, feeding learner
//! outcomes back through the scheduler.

use super::{Difficulty, VocabularyWord, scheduler};
use chrono::{DateTime, Utc};

/// Words presented per sitting. A product choice, not a scheduling rule;
/// callers may pass their own cap.
pub const DEFAULT_SESSION_LIMIT: usize = 10;

/// A single study sitting over a prioritized queue of words.
///
/// The session never persists anything: [`grade_current`] hands the updated
/// word back, and the caller must store it before building the next session,
/// or the same stale due date gets reviewed twice.
///
/// [`grade_current`]: StudySession::grade_current
pub struct StudySession {
    words: Vec<VocabularyWord>,
    current_index: usize,
    show_definition: bool,
}

impl StudySession {
    /// Builds a session queue from whatever is due: select, prioritize, cap.
    pub fn start(words: &[VocabularyWord], now: DateTime<Utc>, limit: usize) -> Self {
        let due = scheduler::select_due(words, now);
        let mut queue: Vec<VocabularyWord> = scheduler::prioritize(due)
            .into_iter()
            .cloned()
            .collect();
        queue.truncate(limit);

        Self {
            words: queue,
            current_index: 0,
            show_definition: false,
        }
    }

    /// Fallback queue of hard words, for when nothing is currently due.
    pub fn start_difficult(words: &[VocabularyWord], limit: usize) -> Self {
        let hard = scheduler::hard_items(words);
        let mut queue: Vec<VocabularyWord> = scheduler::prioritize(hard)
            .into_iter()
            .cloned()
            .collect();
        queue.truncate(limit);

        Self {
            words: queue,
            current_index: 0,
            show_definition: false,
        }
    }

    pub fn current_word(&self) -> Option<&VocabularyWord> {
        self.words.get(self.current_index)
    }

    pub fn toggle_definition(&mut self) {
        self.show_definition = !self.show_definition;
    }

    pub fn showing_definition(&self) -> bool {
        self.show_definition
    }

    /// Grades the current word and advances the queue. Returns the updated
    /// word for the caller to persist; `None` when the session is finished.
    pub fn grade_current(
        &mut self,
        difficulty: Difficulty,
        now: DateTime<Utc>,
    ) -> Option<VocabularyWord> {
        let word = self.words.get(self.current_index)?;
        let updated = scheduler::apply_review(word, difficulty, now);

        self.current_index += 1;
        self.show_definition = false;

        Some(updated)
    }

    /// Moves past the current word without reviewing it.
    pub fn skip_current(&mut self) {
        if self.current_index < self.words.len() {
            self.current_index += 1;
            self.show_definition = false;
        }
    }

    pub fn total_count(&self) -> usize {
        self.words.len()
    }

    pub fn completed_count(&self) -> usize {
        self.current_index
    }

    pub fn remaining_count(&self) -> usize {
        self.words.len() - self.current_index
    }

    pub fn is_finished(&self) -> bool {
        self.current_index >= self.words.len()
    }

    pub fn progress_message(&self) -> String {
        format!(
            "Word {} of {}",
            (self.current_index + 1).min(self.words.len()),
            self.words.len()
        )
    }
}

/// Counts for the study progress display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StudyStats {
    pub total: usize,
    pub due: usize,
    pub difficult: usize,
    pub mastered: usize,
}

impl StudyStats {
    /// A word counts as mastered only when it is neither due nor hard, so
    /// the three buckets never double-count a word.
    pub fn compute(words: &[VocabularyWord], now: DateTime<Utc>) -> Self {
        let due = scheduler::due_count(words, now);
        let difficult = scheduler::hard_items(words).len();

        let due_ids: Vec<&str> = scheduler::select_due(words, now)
            .iter()
            .map(|w| w.id.as_str())
            .collect();
        let mastered = words
            .iter()
            .filter(|w| w.difficulty != Difficulty::Hard && !due_ids.contains(&w.id.as_str()))
            .count();

        Self {
            total: words.len(),
            due,
            difficult,
            mastered,
        }
    }
}
