//! soanki: flashcard deck and card persistence.
//!
//! Two collections (decks, cards) are serialized as JSON arrays into a
//! string key-value store, one fixed key per collection. All reads and
//! writes go through [`flashcards::FlashcardStorage`], which maintains the
//! denormalized deck card counts and the deck -> card cascade on delete.

pub mod flashcards;
pub mod storage;

pub use flashcards::{Card, Deck, FlashcardStorage, FlashcardStorageError, StudySession};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
