//! Selection of the cards that are due for review.

use super::Flashcard;
use chrono::NaiveDate;

/// Cards due on a given day, oldest review date first.
///
/// Built by [`select_due`]. Iterating does not consume the queue, so it can
/// be walked as many times as needed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DueQueue<'a> {
    cards: Vec<&'a Flashcard>,
}

impl<'a> DueQueue<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a Flashcard> + '_ {
        self.cards.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn ids(&self) -> Vec<i64> {
        self.iter().map(|card| card.id).collect()
    }
}

impl<'a> IntoIterator for DueQueue<'a> {
    type Item = &'a Flashcard;
    type IntoIter = std::vec::IntoIter<&'a Flashcard>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}

/// Returns cards with `review_date <= today`, ordered by review date and then id.
pub fn select_due<'a, I>(cards: I, today: NaiveDate) -> DueQueue<'a>
where
    I: IntoIterator<Item = &'a Flashcard>,
{
    let mut due: Vec<&Flashcard> = cards.into_iter().filter(|card| card.is_due(today)).collect();
    due.sort_by_key(|card| (card.review_date, card.id));
    DueQueue { cards: due }
}
