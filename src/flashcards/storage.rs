//! Storage operations for decks and cards.
//!
//! Layout in the key-value store:
//! ```text
//! soanki_decks    # JSON array of all decks
//! soanki_cards    # JSON array of all cards, across every deck
//! ```
//!
//! Every operation is read collection, transform in memory, write collection
//! back. Reads fail soft: a store or parse failure is logged and treated as
//! an empty collection, so callers always get something to show. Writes fail
//! loud: losing a create or delete silently would corrupt user data, so the
//! error propagates.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::models::{Card, Deck};
use crate::storage::{KeyValueStore, StorageError};

/// Key holding the serialized deck collection.
pub const DECKS_KEY: &str = "soanki_decks";
/// Key holding the serialized card collection.
pub const CARDS_KEY: &str = "soanki_cards";

#[derive(Error, Debug)]
pub enum FlashcardStorageError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Deck not found: {0}")]
    DeckNotFound(Uuid),

    #[error("Card not found: {0}")]
    CardNotFound(Uuid),
}

pub type Result<T> = std::result::Result<T, FlashcardStorageError>;

/// Storage manager for deck and card operations.
///
/// Holds the backing key-value store and maintains the cross-collection
/// invariants: each deck's `card_count` tracks its cards, and deleting a
/// deck removes every card that belonged to it.
pub struct FlashcardStorage {
    store: Arc<dyn KeyValueStore>,
    /// Serializes mutating operations. The underlying store has no
    /// transactions, so the two-collection write sequences (create_card,
    /// delete_card, delete_deck) must not interleave with each other.
    write_lock: Mutex<()>,
}

impl FlashcardStorage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Read a collection, degrading to empty on any failure.
    async fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.store.get(key).await {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("reading {} failed, treating as empty: {}", key, err);
                return Vec::new();
            }
        };

        match raw {
            None => Vec::new(),
            Some(json) => match serde_json::from_str(&json) {
                Ok(items) => items,
                Err(err) => {
                    log::warn!("parsing {} failed, treating as empty: {}", key, err);
                    Vec::new()
                }
            },
        }
    }

    async fn write_collection<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let json = serde_json::to_string(items)?;
        self.store.set(key, json).await?;
        Ok(())
    }

    // ==================== Deck Operations ====================

    /// List all decks.
    pub async fn list_decks(&self) -> Vec<Deck> {
        self.read_collection(DECKS_KEY).await
    }

    /// Get a specific deck.
    pub async fn get_deck(&self, deck_id: Uuid) -> Option<Deck> {
        self.list_decks().await.into_iter().find(|d| d.id == deck_id)
    }

    /// Create a new deck. Name validation is left to the caller.
    pub async fn create_deck(&self, name: String, description: String) -> Result<Deck> {
        let _guard = self.write_lock.lock().await;

        let deck = Deck::new(name, description);
        let mut decks: Vec<Deck> = self.read_collection(DECKS_KEY).await;
        decks.push(deck.clone());
        self.write_collection(DECKS_KEY, &decks).await?;

        log::debug!("created deck {}", deck.id);
        Ok(deck)
    }

    /// Replace the stored deck with the same id wholesale.
    pub async fn update_deck(&self, deck: &Deck) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.update_deck_locked(deck).await
    }

    /// Update path shared with the card operations, which already hold the
    /// write lock when they adjust a deck's card count.
    async fn update_deck_locked(&self, deck: &Deck) -> Result<()> {
        let mut decks: Vec<Deck> = self.read_collection(DECKS_KEY).await;
        let pos = decks
            .iter()
            .position(|d| d.id == deck.id)
            .ok_or(FlashcardStorageError::DeckNotFound(deck.id))?;

        decks[pos] = deck.clone();
        self.write_collection(DECKS_KEY, &decks).await
    }

    /// Delete a deck and every card that belongs to it.
    ///
    /// Two ordered writes: decks first, then cards. If the second write
    /// fails the store is left with orphaned cards; there is no rollback.
    pub async fn delete_deck(&self, deck_id: Uuid) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut decks: Vec<Deck> = self.read_collection(DECKS_KEY).await;
        decks.retain(|d| d.id != deck_id);
        self.write_collection(DECKS_KEY, &decks).await?;

        let mut cards: Vec<Card> = self.read_collection(CARDS_KEY).await;
        cards.retain(|c| c.deck_id != deck_id);
        self.write_collection(CARDS_KEY, &cards).await?;

        log::debug!("deleted deck {} and its cards", deck_id);
        Ok(())
    }

    // ==================== Card Operations ====================

    /// List all cards across all decks.
    pub async fn list_cards(&self) -> Vec<Card> {
        self.read_collection(CARDS_KEY).await
    }

    /// List all cards in a deck. No ordering guarantee; callers wanting a
    /// randomized pass shuffle explicitly.
    pub async fn list_cards_by_deck(&self, deck_id: Uuid) -> Vec<Card> {
        self.list_cards()
            .await
            .into_iter()
            .filter(|c| c.deck_id == deck_id)
            .collect()
    }

    /// Get a specific card.
    pub async fn get_card(&self, card_id: Uuid) -> Option<Card> {
        self.list_cards().await.into_iter().find(|c| c.id == card_id)
    }

    /// Create a new card in a deck and bump that deck's card count.
    ///
    /// The owning deck is checked first: an unknown `deck_id` fails the
    /// whole operation before anything is written, so a card can never be
    /// created against a deck that is not there to count it.
    pub async fn create_card(
        &self,
        question: String,
        answer: String,
        deck_id: Uuid,
    ) -> Result<Card> {
        let _guard = self.write_lock.lock().await;

        let mut deck = self
            .get_deck(deck_id)
            .await
            .ok_or(FlashcardStorageError::DeckNotFound(deck_id))?;

        let card = Card::new(deck_id, question, answer);
        let mut cards: Vec<Card> = self.read_collection(CARDS_KEY).await;
        cards.push(card.clone());
        self.write_collection(CARDS_KEY, &cards).await?;

        deck.card_count += 1;
        self.update_deck_locked(&deck).await?;

        log::debug!("created card {} in deck {}", card.id, deck_id);
        Ok(card)
    }

    /// Replace the stored card with the same id wholesale. Used for content
    /// edits and for recording study ratings.
    pub async fn update_card(&self, card: &Card) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut cards: Vec<Card> = self.read_collection(CARDS_KEY).await;
        let pos = cards
            .iter()
            .position(|c| c.id == card.id)
            .ok_or(FlashcardStorageError::CardNotFound(card.id))?;

        cards[pos] = card.clone();
        self.write_collection(CARDS_KEY, &cards).await
    }

    /// Delete a card and decrement its deck's card count (floored at zero).
    /// Deleting an id that is not present is a no-op.
    pub async fn delete_card(&self, card_id: Uuid) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut cards: Vec<Card> = self.read_collection(CARDS_KEY).await;
        let Some(pos) = cards.iter().position(|c| c.id == card_id) else {
            return Ok(());
        };
        let deck_id = cards[pos].deck_id;

        cards.remove(pos);
        self.write_collection(CARDS_KEY, &cards).await?;

        match self.get_deck(deck_id).await {
            Some(mut deck) => {
                deck.card_count = deck.card_count.saturating_sub(1);
                self.update_deck_locked(&deck).await?;
            }
            None => {
                log::warn!(
                    "deleted card {} but owning deck {} is missing, skipping count update",
                    card_id,
                    deck_id
                );
            }
        }

        Ok(())
    }
}
