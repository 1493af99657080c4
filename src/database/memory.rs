//! In-memory repository, used by tests and by callers that keep cards elsewhere.

use super::FlashcardRepository;
use crate::models::Flashcard;
use crate::{Error, Result};
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct MemoryRepository {
    cards: BTreeMap<i64, Flashcard>,
    next_id: i64,
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self {
            cards: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlashcardRepository for MemoryRepository {
    fn load_all(&self) -> Result<Vec<Flashcard>> {
        Ok(self.cards.values().cloned().collect())
    }

    fn get(&self, id: i64) -> Result<Flashcard> {
        self.cards.get(&id).cloned().ok_or(Error::NotFound(id))
    }

    fn save(&mut self, card: &Flashcard) -> Result<Flashcard> {
        // ids are never handed out twice, even after deletes
        let saved = Flashcard {
            id: self.next_id,
            ..card.clone()
        };
        self.next_id += 1;
        self.cards.insert(saved.id, saved.clone());
        Ok(saved)
    }

    fn save_all(&mut self, cards: &[Flashcard]) -> Result<Vec<Flashcard>> {
        let staged: Vec<Flashcard> = cards
            .iter()
            .zip(self.next_id..)
            .map(|(card, id)| Flashcard { id, ..card.clone() })
            .collect();

        self.next_id += staged.len() as i64;
        self.cards
            .extend(staged.iter().map(|card| (card.id, card.clone())));
        Ok(staged)
    }

    fn update(&mut self, card: &Flashcard) -> Result<()> {
        match self.cards.get_mut(&card.id) {
            Some(stored) => {
                *stored = card.clone();
                Ok(())
            }
            None => Err(Error::NotFound(card.id)),
        }
    }

    fn delete(&mut self, id: i64) -> Result<()> {
        self.cards.remove(&id).map(|_| ()).ok_or(Error::NotFound(id))
    }
}
