use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::Card,
    protocol::{
        DeckListResponse, DeckPayload, SaveFlashcardsRequest, SaveScoreRequest,
        ScoreListResponse, LIST_FLASHCARDS_ROUTE, LIST_SCORES_ROUTE, LOAD_FLASHCARDS_ROUTE,
        SAVE_FLASHCARDS_ROUTE, SAVE_SCORES_ROUTE,
    },
};
use storage::DeckStore;
use tracing::{info, warn};

pub mod authoring;
pub mod error;
pub mod quiz;

pub use error::ClientError;
pub use quiz::{CardView, Phase, QuizSession};

/// Destination for a finished quiz's score.
#[async_trait]
pub trait ScoreRecorder: Send + Sync {
    async fn record_attempt(
        &self,
        test_taker: &str,
        deck_name: &str,
        score: u8,
    ) -> Result<(), ClientError>;
}

#[async_trait]
impl ScoreRecorder for DeckStore {
    async fn record_attempt(
        &self,
        test_taker: &str,
        deck_name: &str,
        score: u8,
    ) -> Result<(), ClientError> {
        DeckStore::record_attempt(self, test_taker, deck_name, score)?;
        Ok(())
    }
}

/// HTTP client for the flashcards service.
#[derive(Clone)]
pub struct FlashcardClient {
    http: Client,
    server_url: String,
}

impl FlashcardClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            server_url: server_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn url(&self, route: &str) -> String {
        format!("{}{route}", self.server_url)
    }

    pub async fn save_deck(&self, name: &str, cards: Vec<Card>) -> Result<String, ClientError> {
        let response = self
            .http
            .post(self.url(SAVE_FLASHCARDS_ROUTE))
            .json(&SaveFlashcardsRequest {
                name: name.to_string(),
                value: cards,
            })
            .send()
            .await?;
        let confirmation = success_text(SAVE_FLASHCARDS_ROUTE, response).await?;
        info!(deck = %name, "deck saved");
        Ok(confirmation)
    }

    /// Validates `name` and the `front|back` text locally, then saves the deck.
    /// Nothing is sent when validation fails.
    pub async fn save_deck_text(&self, name: &str, text: &str) -> Result<String, ClientError> {
        authoring::validate_deck_name(name)?;
        let cards = authoring::parse_deck_text(text)?;
        self.save_deck(name, cards).await
    }

    pub async fn load_deck(&self, name: &str) -> Result<DeckPayload, ClientError> {
        let response = self
            .http
            .get(self.url(LOAD_FLASHCARDS_ROUTE))
            .query(&[("name", name)])
            .send()
            .await?;
        success_json(LOAD_FLASHCARDS_ROUTE, response).await
    }

    pub async fn list_decks(&self) -> Result<Vec<String>, ClientError> {
        let response = self.http.get(self.url(LIST_FLASHCARDS_ROUTE)).send().await?;
        let body: DeckListResponse = success_json(LIST_FLASHCARDS_ROUTE, response).await?;
        Ok(body.flashcards)
    }

    pub async fn list_scores(&self) -> Result<Vec<String>, ClientError> {
        let response = self.http.get(self.url(LIST_SCORES_ROUTE)).send().await?;
        let body: ScoreListResponse = success_json(LIST_SCORES_ROUTE, response).await?;
        Ok(body.scores)
    }

    pub async fn save_score(
        &self,
        test_taker: &str,
        deck_name: &str,
        score: u8,
    ) -> Result<String, ClientError> {
        let response = self
            .http
            .post(self.url(SAVE_SCORES_ROUTE))
            .json(&SaveScoreRequest {
                test_taker: test_taker.to_string(),
                quiz_name: deck_name.to_string(),
                score: score.to_string(),
            })
            .send()
            .await?;
        success_text(SAVE_SCORES_ROUTE, response).await
    }

    /// Loads `name` and opens a quiz session over its cards.
    pub async fn start_quiz(&self, name: &str) -> Result<QuizSession, ClientError> {
        let deck = self.load_deck(name).await?;
        Ok(QuizSession::start(deck.name, deck.value)?)
    }
}

#[async_trait]
impl ScoreRecorder for FlashcardClient {
    async fn record_attempt(
        &self,
        test_taker: &str,
        deck_name: &str,
        score: u8,
    ) -> Result<(), ClientError> {
        self.save_score(test_taker, deck_name, score).await?;
        Ok(())
    }
}

async fn ensure_success(route: &'static str, response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    warn!(route, status = status.as_u16(), %message, "server rejected request");
    Err(ClientError::Rejected {
        status: status.as_u16(),
        message,
    })
}

async fn success_text(route: &'static str, response: Response) -> Result<String, ClientError> {
    Ok(ensure_success(route, response).await?.text().await?)
}

async fn success_json<T: DeserializeOwned>(
    route: &'static str,
    response: Response,
) -> Result<T, ClientError> {
    let bytes = ensure_success(route, response).await?.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|err| ClientError::Decode {
        route,
        reason: err.to_string(),
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
