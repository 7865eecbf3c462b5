//! Flashcard decks, cards, and study sessions.
//!
//! This module provides:
//! - Deck CRUD with a denormalized per-deck card count
//! - Card CRUD with cascade delete when the owning deck goes away
//! - Single-pass shuffled study sessions recording 1-5 difficulty ratings

pub mod models;
pub mod session;
pub mod storage;

pub use models::*;
pub use session::{StudySession, StudySessionError};
pub use storage::{FlashcardStorage, FlashcardStorageError};
