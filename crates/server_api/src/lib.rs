use serde::Deserialize;
use serde_json::Value;
use shared::{
    domain::{Card, MAX_SCORE},
    error::{ApiError, ErrorCode},
    protocol::{score_line, DeckListResponse, DeckPayload, ScoreListResponse},
};
use storage::DeckStore;
use tracing::info;

pub const NAME_INVALID: &str =
    "Faulty request: argument \"name\" was missing or incorrectly formatted";
pub const VALUE_MISSING: &str = "Faulty Request: request body is missing argument \"value\"";
pub const VALUE_MALFORMED: &str = "Oops, something went wrong...";
pub const DECK_EXISTS: &str = "Quiz already exists";
pub const TEST_TAKER_INVALID: &str =
    "Faulty request: argument \"testTaker\" was missing or incorrectly formatted";
pub const QUIZ_NAME_MISSING: &str =
    "Faulty Request: request body is missing argument \"quizName\"";
pub const SCORE_INVALID: &str =
    "Faulty request: argument \"score\" was missing or incorrectly formatted";
pub const LOAD_NAME_MISSING: &str = "required argument \"name\" was missing";
pub const DECK_NOT_FOUND: &str = "no flashcard found with that name";

#[derive(Clone, Default)]
pub struct ApiContext {
    pub store: DeckStore,
}

impl ApiContext {
    pub fn new(store: DeckStore) -> Self {
        Self { store }
    }
}

/// Handles a `saveFlashcards` body. Returns the confirmation text on success.
///
/// Fields are checked in order: `name` must be a non-empty string, `value` must be present,
/// and `value` must be a non-empty array of `[front, back]` string pairs with no blank side.
pub fn save_flashcards(ctx: &ApiContext, body: &Value) -> Result<String, ApiError> {
    let name = body
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::invalid_argument(NAME_INVALID))?;
    let value = body
        .get("value")
        .ok_or_else(|| ApiError::invalid_argument(VALUE_MISSING))?;
    let cards = parse_cards(value).ok_or_else(|| ApiError::invalid_argument(VALUE_MALFORMED))?;
    let card_count = cards.len();

    ctx.store.create_deck(name, cards).map_err(|err| match err.code {
        ErrorCode::DuplicateName => ApiError::duplicate_name(DECK_EXISTS),
        _ => ApiError::invalid_argument(VALUE_MALFORMED),
    })?;

    info!(deck = %name, cards = card_count, "deck saved");
    Ok(format!("{name} was saved"))
}

fn parse_cards(value: &Value) -> Option<Vec<Card>> {
    let cards = Vec::<Card>::deserialize(value).ok()?;
    if cards.is_empty() || !cards.iter().all(Card::is_complete) {
        return None;
    }
    Some(cards)
}

/// Handles a `saveScores` body, checking `testTaker`, then `quizName`, then `score`.
///
/// `quizName` is not required to name an existing deck.
pub fn save_score(ctx: &ApiContext, body: &Value) -> Result<String, ApiError> {
    let test_taker = body
        .get("testTaker")
        .and_then(Value::as_str)
        .filter(|taker| !taker.is_empty())
        .ok_or_else(|| ApiError::invalid_argument(TEST_TAKER_INVALID))?;
    let quiz_name = body
        .get("quizName")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::invalid_argument(QUIZ_NAME_MISSING))?;
    let score = body
        .get("score")
        .and_then(Value::as_str)
        .and_then(parse_score)
        .ok_or_else(|| ApiError::invalid_argument(SCORE_INVALID))?;

    ctx.store
        .record_attempt(test_taker, quiz_name, score)
        .map_err(|_| ApiError::invalid_argument(SCORE_INVALID))?;

    info!(test_taker = %test_taker, deck = %quiz_name, score, "score recorded");
    Ok(format!("{test_taker}'s score was saved"))
}

/// Only canonical decimal scores are accepted, so the listed score reads exactly as it was sent.
fn parse_score(raw: &str) -> Option<u8> {
    let score = raw.parse::<u8>().ok().filter(|score| *score <= MAX_SCORE)?;
    (score.to_string() == raw).then_some(score)
}

pub fn load_flashcards(ctx: &ApiContext, name: Option<&str>) -> Result<DeckPayload, ApiError> {
    let name = name.ok_or_else(|| ApiError::invalid_argument(LOAD_NAME_MISSING))?;
    let value = ctx
        .store
        .get_deck(name)
        .map_err(|_| ApiError::not_found(DECK_NOT_FOUND))?;
    Ok(DeckPayload {
        name: name.to_string(),
        value,
    })
}

pub fn list_flashcards(ctx: &ApiContext) -> DeckListResponse {
    DeckListResponse {
        flashcards: ctx.store.list_deck_names(),
    }
}

pub fn list_scores(ctx: &ApiContext) -> ScoreListResponse {
    ScoreListResponse {
        scores: ctx.store.list_attempts().iter().map(score_line).collect(),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
