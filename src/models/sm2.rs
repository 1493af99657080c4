//! SM-2 (SuperMemo 2) spaced repetition algorithm implementation.
//!
//! The SM-2 algorithm calculates optimal review intervals based on recall quality:
//! - Each card has an easiness factor (EF) that adjusts based on performance
//! - EF is adjusted after every review, pass or fail, and has a minimum value of 1.3
//! - Quality grades 0-2: repetitions reset, card comes back tomorrow
//! - Quality grades 3-5: interval grows progressively (1 day → 6 days → EF multiplier)

use super::Flashcard;
use super::flashcard::MIN_EASINESS;
use crate::{Error, Result};
use chrono::{Days, NaiveDate};
use tracing::debug;

/// Highest valid quality grade
pub const MAX_QUALITY: u8 = 5;

/// Lowest grade that counts as a successful recall
pub const PASSING_QUALITY: u8 = 3;

/// Upper bound for a single interval (roughly a century)
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

/// Computes the card's state after a review graded `quality` on `today`.
///
/// quality: 0-5 (0 = complete blackout, 5 = perfect response).
/// The input card is not modified; the caller persists the returned copy.
pub fn schedule(card: &Flashcard, quality: u8, today: NaiveDate) -> Result<Flashcard> {
    if quality > MAX_QUALITY {
        return Err(Error::InvalidGrade(quality));
    }

    let easiness = next_easiness(card.easiness, quality);

    let (repetitions, interval) = if quality < PASSING_QUALITY {
        (0, 1)
    } else {
        let repetitions = card.repetitions.saturating_add(1);
        let interval = match repetitions {
            1 => 1,
            2 => 6,
            _ => grow_interval(card.interval, easiness),
        };
        (repetitions, interval)
    };

    let review_date = today
        .checked_add_days(Days::new(u64::from(interval)))
        .ok_or_else(|| Error::InvalidDate(format!("{today} + {interval} days")))?;

    debug!(
        "Card {} graded {}: EF {:.3} -> {:.3}, repetitions {}, interval {} days, due {}",
        card.id, quality, card.easiness, easiness, repetitions, interval, review_date
    );

    Ok(Flashcard {
        repetitions,
        easiness,
        interval,
        review_date,
        ..card.clone()
    })
}

/// EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)), floored at 1.3
fn next_easiness(easiness: f64, quality: u8) -> f64 {
    let miss = f64::from(MAX_QUALITY - quality);
    let updated = easiness + (0.1 - miss * (0.08 + miss * 0.02));
    // max() also replaces a NaN easiness with the floor
    updated.max(MIN_EASINESS)
}

/// round(previous * EF), kept within [1, MAX_INTERVAL_DAYS]
fn grow_interval(previous: u32, easiness: f64) -> u32 {
    let grown = (f64::from(previous) * easiness).round();
    grown.clamp(1.0, f64::from(MAX_INTERVAL_DAYS)) as u32
}
