//! SQLite storage for the flashcard application
//!
//! Handles database initialization, flashcard CRUD and the stored date
//! override used to simulate the passing of days.

use super::FlashcardRepository;
use crate::models::Flashcard;
use crate::models::review_date::{parse_date, serialize_date};
use crate::{Error, Result};
use chrono::{Days, NaiveDate};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;
use tracing::info;

const SELECT_COLUMNS: &str = "SELECT id, front, back, repetitions, easiness, interval, review_date FROM flashcards";

pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Opens (creating if needed) the database file at `path`
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        info!("Opened flashcard database: {}", path.display());
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        init_database(&conn)?;
        Ok(Self { conn })
    }

    /// Date stored by `advance_day`, if any
    pub fn date_override(&self) -> Result<Option<NaiveDate>> {
        let stored: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM app_state WHERE key = 'current_date'",
                [],
                |row| row.get(0),
            )
            .optional()?;

        stored.as_deref().map(parse_date).transpose()
    }

    /// The stored override, or `fallback` when none is set
    pub fn current_date(&self, fallback: NaiveDate) -> Result<NaiveDate> {
        Ok(self.date_override()?.unwrap_or(fallback))
    }

    /// Moves the simulated date one day past the current one
    pub fn advance_day(&self, fallback: NaiveDate) -> Result<NaiveDate> {
        let current = self.current_date(fallback)?;
        let next_day = current
            .checked_add_days(Days::new(1))
            .ok_or_else(|| Error::InvalidDate(format!("{current} + 1 day")))?;

        self.conn.execute(
            "INSERT INTO app_state (key, value) VALUES ('current_date', ?1)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![serialize_date(next_day)],
        )?;
        info!("Simulated date advanced to {}", next_day);

        Ok(next_day)
    }

    /// Drops the simulated date so the calendar date is used again
    pub fn reset_date(&self) -> Result<()> {
        self.conn
            .execute("DELETE FROM app_state WHERE key = 'current_date'", [])?;
        info!("Simulated date cleared");
        Ok(())
    }
}

/// Creates the flashcard and app state tables if they are missing
fn init_database(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS flashcards (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            front TEXT NOT NULL,
            back TEXT NOT NULL,
            repetitions INTEGER NOT NULL DEFAULT 0,
            easiness REAL NOT NULL DEFAULT 2.5,
            interval INTEGER NOT NULL DEFAULT 0,
            review_date TEXT NOT NULL
        )",
        (),
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

fn flashcard_from_row(row: &Row) -> rusqlite::Result<Flashcard> {
    let raw_date: String = row.get(6)?;
    let review_date = parse_date(&raw_date)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?;

    Ok(Flashcard {
        id: row.get(0)?,
        front: row.get(1)?,
        back: row.get(2)?,
        repetitions: row.get(3)?,
        easiness: row.get(4)?,
        interval: row.get(5)?,
        review_date,
    })
}

impl FlashcardRepository for SqliteRepository {
    fn load_all(&self) -> Result<Vec<Flashcard>> {
        let mut stmt = self.conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id"))?;
        let cards = stmt
            .query_map([], flashcard_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(cards)
    }

    fn get(&self, id: i64) -> Result<Flashcard> {
        self.conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                params![id],
                flashcard_from_row,
            )
            .optional()?
            .ok_or(Error::NotFound(id))
    }

    fn save(&mut self, card: &Flashcard) -> Result<Flashcard> {
        self.conn.execute(
            "INSERT INTO flashcards (front, back, repetitions, easiness, interval, review_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                card.front,
                card.back,
                card.repetitions,
                card.easiness,
                card.interval,
                serialize_date(card.review_date)
            ],
        )?;

        let saved = Flashcard {
            id: self.conn.last_insert_rowid(),
            ..card.clone()
        };
        info!("Flashcard {} saved", saved.id);
        Ok(saved)
    }

    fn save_all(&mut self, cards: &[Flashcard]) -> Result<Vec<Flashcard>> {
        let tx = self.conn.transaction()?;
        let mut saved = Vec::with_capacity(cards.len());
        {
            let mut stmt = tx.prepare(
                "INSERT INTO flashcards (front, back, repetitions, easiness, interval, review_date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for card in cards {
                let id = stmt.insert(params![
                    card.front,
                    card.back,
                    card.repetitions,
                    card.easiness,
                    card.interval,
                    serialize_date(card.review_date)
                ])?;
                saved.push(Flashcard { id, ..card.clone() });
            }
        }
        // dropping tx without commit rolls back on the error paths above
        tx.commit()?;

        info!("Saved {} flashcards", saved.len());
        Ok(saved)
    }

    fn update(&mut self, card: &Flashcard) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE flashcards
             SET front = ?1, back = ?2, repetitions = ?3, easiness = ?4, interval = ?5, review_date = ?6
             WHERE id = ?7",
            params![
                card.front,
                card.back,
                card.repetitions,
                card.easiness,
                card.interval,
                serialize_date(card.review_date),
                card.id
            ],
        )?;

        if changed == 0 {
            return Err(Error::NotFound(card.id));
        }
        Ok(())
    }

    fn delete(&mut self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM flashcards WHERE id = ?1", params![id])?;

        if changed == 0 {
            return Err(Error::NotFound(id));
        }
        info!("Flashcard {} deleted", id);
        Ok(())
    }
}
