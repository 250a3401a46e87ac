//! Database operations for the vocabulary trainer
//!
//! Handles SQLite database initialization, CRUD operations for vocabulary
//! lists and words, and review-schedule persistence. Rows are validated on
//! the way out so the scheduler can assume well-formed input.

use crate::error::{Error, Result};
use crate::models::{Difficulty, VocabularyList, VocabularyWord};
use chrono::{DateTime, Duration, Utc};
use rusqlite::{Connection, params};

/// Initializes the SQLite database with required tables
///
/// Creates tables for vocabulary lists, words, and app state. Timestamps are
/// stored as epoch milliseconds; the two review timestamps are NULL until the
/// first review. Sets the current date to now if not already initialized.
pub fn init_database(path: &str) -> Result<Connection> {
    let conn = Connection::open(path)?;
    init_schema(&conn)?;
    Ok(conn)
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS lists (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT,
            created_at INTEGER NOT NULL
        )",
        (),
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS words (
            id TEXT PRIMARY KEY,
            list_id TEXT NOT NULL,
            term TEXT NOT NULL,
            definition TEXT NOT NULL,
            notes TEXT,
            difficulty TEXT NOT NULL,
            review_count INTEGER NOT NULL DEFAULT 0,
            last_reviewed_at INTEGER,
            next_review_at INTEGER,
            FOREIGN KEY (list_id) REFERENCES lists(id),
            UNIQUE(list_id, term)
        )",
        (),
    )?;

    // App state holds the simulated current date, so scheduling can be
    // exercised across days without waiting for them.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO app_state (key, value) VALUES ('current_date', ?1)",
        params![Utc::now().timestamp_millis().to_string()],
    )?;

    Ok(())
}

/// Retrieves the current simulated date from the database
pub fn get_current_date(conn: &Connection) -> Result<DateTime<Utc>> {
    let stored: String = conn.query_row(
        "SELECT value FROM app_state WHERE key = 'current_date'",
        [],
        |row| row.get(0),
    )?;

    let millis = stored.parse::<i64>().unwrap_or(0);
    Ok(DateTime::from_timestamp_millis(millis).unwrap_or_default())
}

/// Advances the simulated date by 24 hours (for exercising the scheduler)
pub fn advance_day(conn: &Connection) -> Result<()> {
    let next_day = get_current_date(conn)? + Duration::days(1);

    conn.execute(
        "UPDATE app_state SET value = ?1 WHERE key = 'current_date'",
        params![next_day.timestamp_millis().to_string()],
    )?;

    Ok(())
}

/// Creates a new vocabulary list
pub fn new_list(list: &VocabularyList, conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT INTO lists (id, name, description, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            list.id,
            list.name,
            list.description,
            list.created_at.timestamp_millis()
        ],
    )?;
    Ok(())
}

/// Retrieves all vocabulary lists
pub fn get_all_lists(conn: &Connection) -> Result<Vec<VocabularyList>> {
    let mut stmt = conn.prepare("SELECT id, name, description, created_at FROM lists")?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, Option<String>>(2)?,
            row.get::<_, i64>(3)?,
        ))
    })?;

    let mut lists = Vec::new();
    for row in rows {
        let (id, name, description, created_at) = row?;
        let created_at = DateTime::from_timestamp_millis(created_at).ok_or_else(|| {
            Error::MalformedRecord {
                id: id.clone(),
                reason: "list created_at timestamp out of range".to_string(),
            }
        })?;
        lists.push(VocabularyList {
            id,
            name,
            description,
            created_at,
        });
    }

    Ok(lists)
}

/// Adds a word to a list. Fails on a duplicate (list, term) pair.
pub fn add_word(word: &VocabularyWord, conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT INTO words (id, list_id, term, definition, notes, difficulty, review_count, last_reviewed_at, next_review_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            word.id,
            word.list_id,
            word.term,
            word.definition,
            word.notes,
            word.difficulty.as_str(),
            word.review_count,
            word.last_reviewed_at.map(|t| t.timestamp_millis()),
            word.next_review_at.map(|t| t.timestamp_millis()),
        ],
    )?;
    Ok(())
}

/// Persists a reviewed word: full row update keyed by id
pub fn update_word(word: &VocabularyWord, conn: &Connection) -> Result<()> {
    conn.execute(
        "UPDATE words
         SET list_id = ?1, term = ?2, definition = ?3, notes = ?4, difficulty = ?5,
             review_count = ?6, last_reviewed_at = ?7, next_review_at = ?8
         WHERE id = ?9",
        params![
            word.list_id,
            word.term,
            word.definition,
            word.notes,
            word.difficulty.as_str(),
            word.review_count,
            word.last_reviewed_at.map(|t| t.timestamp_millis()),
            word.next_review_at.map(|t| t.timestamp_millis()),
            word.id,
        ],
    )?;
    Ok(())
}

/// Deletes a word by id
pub fn delete_word(id: &str, conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM words WHERE id = ?1", params![id])?;
    Ok(())
}

/// Retrieves every stored word
pub fn get_all_words(conn: &Connection) -> Result<Vec<VocabularyWord>> {
    query_words("SELECT id, list_id, term, definition, notes, difficulty, review_count, last_reviewed_at, next_review_at FROM words", None, conn)
}

/// Retrieves the words belonging to one list
pub fn get_words_for_list(list_id: &str, conn: &Connection) -> Result<Vec<VocabularyWord>> {
    query_words(
        "SELECT id, list_id, term, definition, notes, difficulty, review_count, last_reviewed_at, next_review_at FROM words WHERE list_id = ?1",
        Some(list_id),
        conn,
    )
}

type WordRow = (
    String,
    String,
    String,
    String,
    Option<String>,
    String,
    i64,
    Option<i64>,
    Option<i64>,
);

fn query_words(sql: &str, list_id: Option<&str>, conn: &Connection) -> Result<Vec<VocabularyWord>> {
    let mut stmt = conn.prepare(sql)?;

    let map_row = |row: &rusqlite::Row| -> rusqlite::Result<WordRow> {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
            row.get(5)?,
            row.get(6)?,
            row.get(7)?,
            row.get(8)?,
        ))
    };

    let rows: Vec<rusqlite::Result<WordRow>> = match list_id {
        Some(id) => stmt.query_map(params![id], map_row)?.collect(),
        None => stmt.query_map([], map_row)?.collect(),
    };

    let mut words = Vec::new();
    for row in rows {
        words.push(word_from_row(row?)?);
    }
    Ok(words)
}

/// Converts a raw row into a word, failing fast on malformed data
fn word_from_row(raw: WordRow) -> Result<VocabularyWord> {
    let (id, list_id, term, definition, notes, difficulty, review_count, last_reviewed, next_review) =
        raw;

    let difficulty: Difficulty = difficulty.parse()?;

    if review_count < 0 {
        return Err(Error::MalformedRecord {
            id,
            reason: format!("negative review_count {review_count}"),
        });
    }

    let to_timestamp = |millis: Option<i64>, id: &str| -> Result<Option<DateTime<Utc>>> {
        millis
            .map(|m| {
                DateTime::from_timestamp_millis(m).ok_or_else(|| Error::MalformedRecord {
                    id: id.to_string(),
                    reason: format!("timestamp {m} out of range"),
                })
            })
            .transpose()
    };

    let last_reviewed_at = to_timestamp(last_reviewed, &id)?;
    let next_review_at = to_timestamp(next_review, &id)?;

    Ok(VocabularyWord {
        id,
        list_id,
        term,
        definition,
        notes,
        difficulty,
        review_count: review_count as u32,
        last_reviewed_at,
        next_review_at,
    })
}
