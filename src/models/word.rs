//! A vocabulary word with its review history.
//!
//! Timestamps are serialized as epoch milliseconds; absent timestamps stay
//! absent (a word with no `next_review_at` has never been reviewed and is
//! always due — that is distinct from an epoch-zero timestamp).

use super::Difficulty;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VocabularyWord {
    pub id: String,
    pub list_id: String,
    pub term: String,
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub difficulty: Difficulty,
    pub review_count: u32,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_reviewed_at: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub next_review_at: Option<DateTime<Utc>>,
}

impl VocabularyWord {
    /// Creates a fresh word: zero reviews, no timestamps, due immediately.
    pub fn new(
        id: impl Into<String>,
        list_id: impl Into<String>,
        term: impl Into<String>,
        definition: impl Into<String>,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            id: id.into(),
            list_id: list_id.into(),
            term: term.into(),
            definition: definition.into(),
            notes: None,
            difficulty,
            review_count: 0,
            last_reviewed_at: None,
            next_review_at: None,
        }
    }
}
