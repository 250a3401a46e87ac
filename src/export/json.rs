//! JSON import/export module for vocabulary lists.
//! Provides functionality to save and load a list together with its words.

use crate::error::Result;
use crate::models::{VocabularyList, VocabularyWord};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};

/// A vocabulary list bundled with its words, as stored on disk.
#[derive(Serialize, Deserialize)]
pub struct ListExport {
    pub list: VocabularyList,
    pub words: Vec<VocabularyWord>,
}

/// Exports a list and its words to a JSON file at the specified path.
/// Returns an error if file creation or writing fails.
pub fn export_list_to_path(
    list: &VocabularyList,
    words: &[VocabularyWord],
    path: &str,
) -> Result<()> {
    let export = ListExport {
        list: list.clone(),
        words: words.to_vec(),
    };

    let json_string = serde_json::to_string_pretty(&export)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    Ok(())
}

/// Imports a list with its words from a JSON file.
/// Returns an error if the file doesn't exist or contains invalid JSON;
/// difficulty values outside {easy, medium, hard} are rejected during
/// deserialization.
pub fn import_list(path: &str) -> Result<ListExport> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    let export: ListExport = serde_json::from_str(&contents)?;

    println!("List '{}' imported from '{}'", export.list.name, path);
    Ok(export)
}
