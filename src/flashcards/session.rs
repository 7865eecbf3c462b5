//! Single-pass study sessions.
//!
//! A session takes one shuffled pass over a deck's cards. Each rating
//! overwrites the card's difficulty, bumps its review count, and stamps
//! `last_reviewed`; finishing the pass stamps the deck's `last_studied`.
//! There is no interval scheduling here, every card in the deck is shown
//! exactly once per session.

use rand::seq::SliceRandom;
use thiserror::Error;
use uuid::Uuid;

use super::models::{now_millis, Card, MAX_DIFFICULTY, MIN_DIFFICULTY};
use super::storage::{FlashcardStorage, FlashcardStorageError};

#[derive(Error, Debug)]
pub enum StudySessionError {
    #[error(transparent)]
    Storage(#[from] FlashcardStorageError),

    #[error("Invalid rating: {0} (expected {MIN_DIFFICULTY}-{MAX_DIFFICULTY})")]
    InvalidRating(i32),
}

pub type Result<T> = std::result::Result<T, StudySessionError>;

/// One shuffled pass over a deck's cards.
pub struct StudySession {
    deck_id: Uuid,
    queue: Vec<Card>,
    position: usize,
}

impl StudySession {
    /// Load the deck's cards and shuffle them into a session order.
    pub async fn begin(storage: &FlashcardStorage, deck_id: Uuid) -> Result<Self> {
        storage
            .get_deck(deck_id)
            .await
            .ok_or(FlashcardStorageError::DeckNotFound(deck_id))?;

        let mut queue = storage.list_cards_by_deck(deck_id).await;
        queue.shuffle(&mut rand::thread_rng());

        Ok(Self {
            deck_id,
            queue,
            position: 0,
        })
    }

    pub fn deck_id(&self) -> Uuid {
        self.deck_id
    }

    /// The card currently shown, or `None` once the pass is over.
    pub fn current(&self) -> Option<&Card> {
        self.queue.get(self.position)
    }

    /// Cards left in the pass, including the current one.
    pub fn remaining(&self) -> usize {
        self.queue.len().saturating_sub(self.position)
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.queue.len()
    }

    /// Rate the current card (1 = very easy .. 5 = very hard), persist the
    /// rating, and advance to the next card.
    pub async fn rate(&mut self, storage: &FlashcardStorage, rating: i32) -> Result<()> {
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&rating) {
            return Err(StudySessionError::InvalidRating(rating));
        }

        let Some(card) = self.queue.get_mut(self.position) else {
            return Ok(());
        };

        card.difficulty_level = rating;
        card.review_count += 1;
        card.last_reviewed = Some(now_millis());
        storage.update_card(card).await?;

        self.position += 1;
        Ok(())
    }

    /// End the session, stamping the deck's `last_studied` time.
    pub async fn finish(self, storage: &FlashcardStorage) -> Result<()> {
        let mut deck = storage
            .get_deck(self.deck_id)
            .await
            .ok_or(FlashcardStorageError::DeckNotFound(self.deck_id))?;

        deck.last_studied = Some(now_millis());
        storage.update_deck(&deck).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;
    use crate::storage::MemoryStore;

    async fn deck_with_cards(storage: &FlashcardStorage, n: usize) -> Uuid {
        let deck = storage
            .create_deck("Spanish".to_string(), String::new())
            .await
            .unwrap();
        for i in 0..n {
            storage
                .create_card(format!("q{}", i), format!("a{}", i), deck.id)
                .await
                .unwrap();
        }
        deck.id
    }

    fn storage() -> FlashcardStorage {
        FlashcardStorage::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_begin_unknown_deck_fails() {
        let storage = storage();
        let err = StudySession::begin(&storage, Uuid::new_v4()).await;
        assert!(matches!(
            err,
            Err(StudySessionError::Storage(
                FlashcardStorageError::DeckNotFound(_)
            ))
        ));
    }

    #[tokio::test]
    async fn test_empty_deck_session_is_finished_immediately() {
        let storage = storage();
        let deck_id = deck_with_cards(&storage, 0).await;

        let session = StudySession::begin(&storage, deck_id).await.unwrap();
        assert!(session.is_finished());
        assert!(session.current().is_none());
        assert_eq!(session.remaining(), 0);
    }

    #[tokio::test]
    async fn test_single_pass_visits_every_card_once() {
        let storage = storage();
        let deck_id = deck_with_cards(&storage, 5).await;

        let mut session = StudySession::begin(&storage, deck_id).await.unwrap();
        let mut seen = HashSet::new();
        while let Some(card) = session.current() {
            assert!(seen.insert(card.id));
            session.rate(&storage, 3).await.unwrap();
        }

        assert_eq!(seen.len(), 5);
        assert!(session.is_finished());
    }

    #[tokio::test]
    async fn test_rating_persists_to_storage() {
        let storage = storage();
        let deck_id = deck_with_cards(&storage, 1).await;

        let mut session = StudySession::begin(&storage, deck_id).await.unwrap();
        let card_id = session.current().unwrap().id;
        session.rate(&storage, 5).await.unwrap();

        let card = storage.get_card(card_id).await.unwrap();
        assert_eq!(card.difficulty_level, 5);
        assert_eq!(card.review_count, 1);
        assert!(card.last_reviewed.is_some());
    }

    #[tokio::test]
    async fn test_rating_out_of_range_is_rejected() {
        let storage = storage();
        let deck_id = deck_with_cards(&storage, 1).await;

        let mut session = StudySession::begin(&storage, deck_id).await.unwrap();
        for rating in [0, 6, -1] {
            let err = session.rate(&storage, rating).await.unwrap_err();
            assert!(matches!(err, StudySessionError::InvalidRating(r) if r == rating));
        }
        // The card was not touched.
        assert_eq!(session.remaining(), 1);
        let card = session.current().unwrap();
        assert_eq!(card.review_count, 0);
    }

    #[tokio::test]
    async fn test_finish_stamps_last_studied() {
        let storage = storage();
        let deck_id = deck_with_cards(&storage, 2).await;

        let mut session = StudySession::begin(&storage, deck_id).await.unwrap();
        while !session.is_finished() {
            session.rate(&storage, 2).await.unwrap();
        }
        session.finish(&storage).await.unwrap();

        let deck = storage.get_deck(deck_id).await.unwrap();
        assert!(deck.last_studied.is_some());
        assert_eq!(deck.card_count, 2);
    }
}
