//! Flashcard is a pair <front, back> together with its SM-2 memory state.
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Easiness factor given to every new card
pub const DEFAULT_EASINESS: f64 = 2.5;

/// Easiness factor never drops below this value
pub const MIN_EASINESS: f64 = 1.3;

/// Id carried by a card that has not been saved to a repository yet
pub const UNSAVED_ID: i64 = 0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: i64,
    pub front: String,
    pub back: String,
    /// Consecutive successful reviews since the last failure
    pub repetitions: u32,
    pub easiness: f64,
    /// Days until the next review
    pub interval: u32,
    #[serde(with = "crate::models::review_date::serde_format")]
    pub review_date: NaiveDate,
}

impl Flashcard {
    /// Creates an unsaved card that is due immediately on `today`.
    pub fn new(front: impl Into<String>, back: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            id: UNSAVED_ID,
            front: front.into(),
            back: back.into(),
            repetitions: 0,
            easiness: DEFAULT_EASINESS,
            interval: 0,
            review_date: today,
        }
    }

    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.review_date <= today
    }

    /// Checks the scheduling state: EF is finite and at least 1.3, and a
    /// card with successful repetitions has an interval of at least one day.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Error::InvalidRecord {
            id: self.id,
            reason,
        };

        if !self.easiness.is_finite() || self.easiness < MIN_EASINESS {
            return Err(invalid(format!(
                "easiness {} is below {}",
                self.easiness, MIN_EASINESS
            )));
        }
        if self.repetitions > 0 && self.interval == 0 {
            return Err(invalid(format!(
                "{} repetitions with a zero day interval",
                self.repetitions
            )));
        }
        Ok(())
    }

    /// Replaces front and back, leaving the scheduling state alone.
    pub fn with_content(mut self, front: impl Into<String>, back: impl Into<String>) -> Self {
        self.front = front.into();
        self.back = back.into();
        self
    }
}
