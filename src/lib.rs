pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod models;
pub mod session;

pub use app::App;
pub use config::Config;
pub use database::{FlashcardRepository, MemoryRepository, SqliteRepository};
pub use error::{Error, Result};
pub use models::{DueQueue, Flashcard, select_due};
pub use models::sm2::schedule;
pub use session::ReviewSession;
