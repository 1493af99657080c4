pub mod due;
pub mod flashcard;
pub mod review_date;
pub mod sm2;

pub use due::{DueQueue, select_due};
pub use flashcard::Flashcard;
