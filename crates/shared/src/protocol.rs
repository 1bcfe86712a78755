use serde::{Deserialize, Serialize};

use crate::domain::{AttemptRecord, Card};

pub const SAVE_FLASHCARDS_ROUTE: &str = "/api/saveFlashcards";
pub const SAVE_SCORES_ROUTE: &str = "/api/saveScores";
pub const LIST_FLASHCARDS_ROUTE: &str = "/api/listFlashcards";
pub const LIST_SCORES_ROUTE: &str = "/api/listScores";
pub const LOAD_FLASHCARDS_ROUTE: &str = "/api/loadFlashcards";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveFlashcardsRequest {
    pub name: String,
    pub value: Vec<Card>,
}

/// Scores travel as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveScoreRequest {
    pub test_taker: String,
    pub quiz_name: String,
    pub score: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckPayload {
    pub name: String,
    pub value: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeckListResponse {
    pub flashcards: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreListResponse {
    pub scores: Vec<String>,
}

/// Renders an attempt the way `/api/listScores` lists it: `"<taker>, <deck>: <score>"`.
pub fn score_line(record: &AttemptRecord) -> String {
    format!(
        "{}, {}: {}",
        record.test_taker, record.deck_name, record.score
    )
}
