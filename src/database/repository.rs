//! Storage contract for flashcards.

use crate::Result;
use crate::models::Flashcard;

/// Persistence used by [`crate::App`].
///
/// Implementations report I/O failures as `Error::StorageUnavailable` and
/// missing ids as `Error::NotFound`. Retrying, if wanted, is up to the
/// implementation.
pub trait FlashcardRepository {
    fn load_all(&self) -> Result<Vec<Flashcard>>;

    fn get(&self, id: i64) -> Result<Flashcard>;

    /// Stores `card` as a new record and returns it with its assigned id.
    /// Any id already present on `card` is ignored.
    fn save(&mut self, card: &Flashcard) -> Result<Flashcard>;

    /// Stores all `cards` as new records, or none of them if any write fails.
    fn save_all(&mut self, cards: &[Flashcard]) -> Result<Vec<Flashcard>>;

    /// Overwrites every field of an existing record.
    fn update(&mut self, card: &Flashcard) -> Result<()>;

    fn delete(&mut self, id: i64) -> Result<()>;
}
