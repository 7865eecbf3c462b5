//! Data models for decks and cards.
//!
//! The JSON shape of these records is a compatibility surface: existing
//! stores were written with camelCase field names, epoch-millisecond
//! timestamps, and the optional timestamps omitted entirely when unset.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Easiest rating a card can receive.
pub const MIN_DIFFICULTY: i32 = 1;
/// Hardest rating a card can receive.
pub const MAX_DIFFICULTY: i32 = 5;
/// Difficulty assigned to a card that has never been rated.
pub const DEFAULT_DIFFICULTY: i32 = 3;

/// Current time as epoch milliseconds, the timestamp unit of the store.
pub(crate) fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// A deck is a named collection of cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_studied: Option<i64>,
    pub card_count: u32,
}

impl Deck {
    pub fn new(name: String, description: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            created_at: now_millis(),
            last_studied: None,
            card_count: 0,
        }
    }
}

/// A card with a question (front) and an answer (back), owned by one deck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub deck_id: Uuid,
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<i64>,
    pub review_count: u32,
    /// 1-5 where 1 is very easy and 5 is very hard
    pub difficulty_level: i32,
}

impl Card {
    pub fn new(deck_id: Uuid, question: String, answer: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            question,
            answer,
            deck_id,
            created_at: now_millis(),
            last_reviewed: None,
            review_count: 0,
            difficulty_level: DEFAULT_DIFFICULTY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_deck_defaults() {
        let deck = Deck::new("Spanish".to_string(), "Basics".to_string());
        assert_eq!(deck.card_count, 0);
        assert!(deck.last_studied.is_none());
        assert!(deck.created_at > 0);
    }

    #[test]
    fn test_new_card_defaults() {
        let deck_id = Uuid::new_v4();
        let card = Card::new(deck_id, "Hola".to_string(), "Hello".to_string());
        assert_eq!(card.deck_id, deck_id);
        assert_eq!(card.review_count, 0);
        assert_eq!(card.difficulty_level, DEFAULT_DIFFICULTY);
        assert!(card.last_reviewed.is_none());
    }

    #[test]
    fn test_deck_wire_format_omits_unset_last_studied() {
        let deck = Deck::new("Spanish".to_string(), String::new());
        let json = serde_json::to_value(&deck).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("createdAt"));
        assert!(obj.contains_key("cardCount"));
        assert!(!obj.contains_key("lastStudied"));
    }

    #[test]
    fn test_deck_reads_original_wire_format() {
        // Record shape written by earlier versions of the app.
        let json = r#"{
            "id": "7f8a1c2e-9b4d-4f6a-8c3e-1d2b3a4c5d6e",
            "name": "Spanish",
            "description": "Basics",
            "createdAt": 1714500000000,
            "lastStudied": 1714586400000,
            "cardCount": 2
        }"#;
        let deck: Deck = serde_json::from_str(json).unwrap();
        assert_eq!(deck.name, "Spanish");
        assert_eq!(deck.created_at, 1_714_500_000_000);
        assert_eq!(deck.last_studied, Some(1_714_586_400_000));
        assert_eq!(deck.card_count, 2);
    }

    #[test]
    fn test_card_round_trips_through_wire_format() {
        let mut card = Card::new(Uuid::new_v4(), "Hola".to_string(), "Hello".to_string());
        card.last_reviewed = Some(now_millis());
        card.review_count = 3;
        card.difficulty_level = 5;

        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains("\"deckId\""));
        assert!(json.contains("\"difficultyLevel\""));

        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
    }
}
