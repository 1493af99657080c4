//! Flashcard operations exposed to the CLI and other front ends.
//! Loads records, runs them through the scheduler and persists the result.

use crate::database::FlashcardRepository;
use crate::models::{Flashcard, select_due, sm2};
use crate::Result;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::info;

/// Application facade over a flashcard repository
pub struct App<R: FlashcardRepository> {
    repo: R,
}

impl<R: FlashcardRepository> App<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn get_all_flashcards(&self) -> Result<BTreeMap<i64, Flashcard>> {
        let cards = self.repo.load_all()?;
        Ok(cards.into_iter().map(|card| (card.id, card)).collect())
    }

    /// Cards due on `today`, longest overdue first
    pub fn get_review_cards(&self, today: NaiveDate) -> Result<Vec<Flashcard>> {
        let cards = self.repo.load_all()?;
        Ok(select_due(&cards, today).into_iter().cloned().collect())
    }

    /// Creates a card that is due immediately
    pub fn save_flashcard(&mut self, front: &str, back: &str, today: NaiveDate) -> Result<Flashcard> {
        let card = self.repo.save(&Flashcard::new(front, back, today))?;
        info!("Created flashcard {} ('{}')", card.id, card.front);
        Ok(card)
    }

    /// Replaces front and back; scheduling state is kept
    pub fn modify_flashcard(&mut self, id: i64, front: &str, back: &str) -> Result<()> {
        let card = self.repo.get(id)?.with_content(front, back);
        self.repo.update(&card)?;
        info!("Modified flashcard {}", id);
        Ok(())
    }

    pub fn delete_flashcard(&mut self, id: i64) -> Result<()> {
        self.repo.delete(id)
    }

    /// Applies a review graded `quality` (0-5) on `today` and stores the result.
    ///
    /// Nothing is written when the grade is invalid or the card is missing.
    pub fn review_card(&mut self, id: i64, quality: u8, today: NaiveDate) -> Result<Flashcard> {
        let card = self.repo.get(id)?;
        let reviewed = sm2::schedule(&card, quality, today)?;
        self.repo.update(&reviewed)?;
        info!(
            "Reviewed flashcard {} with grade {}, next review {}",
            id, quality, reviewed.review_date
        );
        Ok(reviewed)
    }

    /// Saves each card as a new record, keeping its scheduling state.
    ///
    /// Every card is validated first; either all cards are stored or none.
    pub fn import_flashcards<I>(&mut self, cards: I) -> Result<Vec<Flashcard>>
    where
        I: IntoIterator<Item = Flashcard>,
    {
        let cards: Vec<Flashcard> = cards.into_iter().collect();
        for card in &cards {
            card.validate()?;
        }

        let imported = self.repo.save_all(&cards)?;
        info!("Imported {} flashcards", imported.len());
        Ok(imported)
    }
}
