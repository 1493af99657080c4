pub mod db;
pub mod memory;
pub mod repository;

pub use db::SqliteRepository;
pub use memory::MemoryRepository;
pub use repository::FlashcardRepository;
