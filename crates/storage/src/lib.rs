use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use shared::{
    domain::{AttemptRecord, Card, MAX_SCORE},
    error::ApiError,
};

/// Process-lifetime store of decks and recorded attempts.
///
/// Cloning yields another handle to the same store. Both collections sit behind a single
/// lock so the duplicate-name check in [`DeckStore::create_deck`] and the insert that follows
/// are one step, and attempt appends keep submission order.
#[derive(Clone, Default)]
pub struct DeckStore {
    inner: Arc<Mutex<StoreInner>>,
}

#[derive(Default)]
struct StoreInner {
    decks: HashMap<String, Arc<[Card]>>,
    deck_order: Vec<String>,
    attempts: Vec<AttemptRecord>,
}

impl DeckStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        // Every mutation validates before writing, so a poisoned guard still holds
        // consistent data.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn create_deck(&self, name: &str, cards: Vec<Card>) -> Result<(), ApiError> {
        validate_deck(name, &cards)?;

        let mut inner = self.lock();
        if inner.decks.contains_key(name) {
            return Err(ApiError::duplicate_name(format!(
                "deck \"{name}\" already exists"
            )));
        }
        inner.decks.insert(name.to_string(), cards.into());
        inner.deck_order.push(name.to_string());
        Ok(())
    }

    pub fn get_deck(&self, name: &str) -> Result<Vec<Card>, ApiError> {
        self.lock()
            .decks
            .get(name)
            .map(|cards| cards.to_vec())
            .ok_or_else(|| ApiError::not_found(format!("no deck named \"{name}\"")))
    }

    pub fn list_deck_names(&self) -> Vec<String> {
        self.lock().deck_order.clone()
    }

    /// Appends an attempt. `deck_name` is not checked against the stored decks.
    pub fn record_attempt(
        &self,
        test_taker: &str,
        deck_name: &str,
        score: u8,
    ) -> Result<(), ApiError> {
        if test_taker.is_empty() {
            return Err(ApiError::invalid_argument("test taker must not be empty"));
        }
        if score > MAX_SCORE {
            return Err(ApiError::invalid_argument(format!(
                "score {score} is outside 0..={MAX_SCORE}"
            )));
        }

        self.lock()
            .attempts
            .push(AttemptRecord::new(test_taker, deck_name, score));
        Ok(())
    }

    pub fn list_attempts(&self) -> Vec<AttemptRecord> {
        self.lock().attempts.clone()
    }

    /// Drops every deck and attempt. Test scaffolding only.
    #[cfg(any(test, feature = "test-support"))]
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.decks.clear();
        inner.deck_order.clear();
        inner.attempts.clear();
    }
}

fn validate_deck(name: &str, cards: &[Card]) -> Result<(), ApiError> {
    if name.is_empty() {
        return Err(ApiError::invalid_argument("deck name must not be empty"));
    }
    if cards.is_empty() {
        return Err(ApiError::invalid_argument("deck must contain at least one card"));
    }
    if let Some(position) = cards.iter().position(|card| !card.is_complete()) {
        return Err(ApiError::invalid_argument(format!(
            "card {} has an empty side",
            position + 1
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
