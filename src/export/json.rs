//! JSON backup module for flashcard collections.
//! Writes and reads the collection as a JSON object mapping id to record.

use crate::models::Flashcard;
use crate::Result;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Exports the cards to a JSON file at the specified path.
pub fn export_json_to_path(cards: &BTreeMap<i64, Flashcard>, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, cards)?;
    writer.flush()?;

    info!("Exported {} flashcards to '{}'", cards.len(), path.display());
    Ok(())
}

/// Imports cards from a JSON file, in id order.
/// Returns an error if the file doesn't exist or contains invalid JSON.
pub fn import_json(path: &Path) -> Result<Vec<Flashcard>> {
    let reader = BufReader::new(File::open(path)?);
    let cards: BTreeMap<i64, Flashcard> = serde_json::from_reader(reader)?;

    info!("Read {} flashcards from '{}'", cards.len(), path.display());
    Ok(cards.into_values().collect())
}
