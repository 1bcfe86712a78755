use serde::{Deserialize, Serialize};

/// Highest score an attempt can record.
pub const MAX_SCORE: u8 = 100;

/// One flashcard. Serialized as a `[front, back]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct Card {
    pub front: String,
    pub back: String,
}

impl Card {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.front.is_empty() && !self.back.is_empty()
    }
}

impl From<(String, String)> for Card {
    fn from((front, back): (String, String)) -> Self {
        Self { front, back }
    }
}

impl From<Card> for (String, String) {
    fn from(card: Card) -> Self {
        (card.front, card.back)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSide {
    Front,
    Back,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub test_taker: String,
    pub deck_name: String,
    pub score: u8,
}

impl AttemptRecord {
    pub fn new(test_taker: impl Into<String>, deck_name: impl Into<String>, score: u8) -> Self {
        Self {
            test_taker: test_taker.into(),
            deck_name: deck_name.into(),
            score,
        }
    }
}
