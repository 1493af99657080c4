//! Review session management for spaced repetition practice.
//! Walks the due queue one card at a time; failed cards come back in a later round.

use crate::app::App;
use crate::database::FlashcardRepository;
use crate::models::sm2::PASSING_QUALITY;
use crate::models::{DueQueue, Flashcard};
use crate::Result;
use chrono::NaiveDate;
use std::collections::VecDeque;

/// Manages a review session with multiple rounds.
/// Cards graded below 3 are repeated after the rest of the current round.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    current_round: VecDeque<i64>,
    next_round: Vec<i64>,
    round_number: usize,
    reviewed: usize,
}

impl ReviewSession {
    /// Creates a session over a snapshot of the due queue.
    pub fn new(due: &DueQueue<'_>) -> Self {
        Self::from_ids(due.ids())
    }

    pub fn from_ids(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            current_round: ids.into_iter().collect(),
            next_round: Vec::new(),
            round_number: 1,
            reviewed: 0,
        }
    }

    pub fn current(&self) -> Option<i64> {
        self.current_round.front().copied()
    }

    /// Grades the current card and persists the result through `app`.
    ///
    /// On error the queue is left as it was so the same card can be retried.
    pub fn grade_current<R: FlashcardRepository>(
        &mut self,
        app: &mut App<R>,
        quality: u8,
        today: NaiveDate,
    ) -> Result<Option<Flashcard>> {
        let Some(id) = self.current() else {
            return Ok(None);
        };

        let reviewed = app.review_card(id, quality, today)?;
        self.current_round.pop_front();
        self.reviewed += 1;
        if quality < PASSING_QUALITY {
            self.next_round.push(id);
        }
        self.start_next_round_if_needed();

        Ok(Some(reviewed))
    }

    /// Drops the current card without grading it (e.g. deleted elsewhere).
    pub fn skip_current(&mut self) {
        self.current_round.pop_front();
        self.start_next_round_if_needed();
    }

    fn start_next_round_if_needed(&mut self) {
        if self.current_round.is_empty() && !self.next_round.is_empty() {
            self.current_round = self.next_round.drain(..).collect();
            self.round_number += 1;
        }
    }

    /// Cards still waiting, including those queued for a later round
    pub fn remaining(&self) -> usize {
        self.current_round.len() + self.next_round.len()
    }

    pub fn reviewed_count(&self) -> usize {
        self.reviewed
    }

    pub fn round(&self) -> usize {
        self.round_number
    }

    pub fn is_completed(&self) -> bool {
        self.remaining() == 0
    }

    pub fn phase_message(&self) -> String {
        if self.round_number == 1 {
            format!("Round {}: {} cards", self.round_number, self.remaining())
        } else {
            format!(
                "Round {} (Review): {} cards to retry",
                self.round_number,
                self.remaining()
            )
        }
    }
}
