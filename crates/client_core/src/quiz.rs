use std::collections::VecDeque;

use shared::{
    domain::{Card, CardSide, MAX_SCORE},
    error::ApiError,
};
use tracing::info;

use crate::{error::ClientError, ScoreRecorder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    Completed,
}

/// The card at the head of the session and which side of it is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardView<'a> {
    pub card: &'a Card,
    pub revealed: bool,
}

impl<'a> CardView<'a> {
    pub fn side(&self) -> CardSide {
        if self.revealed {
            CardSide::Back
        } else {
            CardSide::Front
        }
    }

    pub fn visible_text(&self) -> &'a str {
        match self.side() {
            CardSide::Front => &self.card.front,
            CardSide::Back => &self.card.back,
        }
    }
}

/// One pass through a deck.
///
/// Cards are consumed front to back, one verdict each. While in progress,
/// `remaining + correct + incorrect` always equals the deck size; once the last card is
/// judged the session is [`Phase::Completed`] for good. A completed session records its
/// score at most once.
#[derive(Debug, Clone)]
pub struct QuizSession {
    deck_name: String,
    total: usize,
    remaining: VecDeque<Card>,
    correct: u32,
    incorrect: u32,
    revealed: bool,
    phase: Phase,
    submitted: bool,
}

impl QuizSession {
    pub fn start(deck_name: impl Into<String>, cards: Vec<Card>) -> Result<Self, ApiError> {
        if cards.is_empty() {
            return Err(ApiError::invalid_argument(
                "cannot start a quiz over an empty deck",
            ));
        }

        Ok(Self {
            deck_name: deck_name.into(),
            total: cards.len(),
            remaining: cards.into(),
            correct: 0,
            incorrect: 0,
            revealed: false,
            phase: Phase::InProgress,
            submitted: false,
        })
    }

    pub fn deck_name(&self) -> &str {
        &self.deck_name
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn current_card(&self) -> Result<CardView<'_>, ApiError> {
        self.ensure_in_progress("current_card")?;
        let card = self
            .remaining
            .front()
            .ok_or_else(|| ApiError::invalid_state("no card left in session"))?;
        Ok(CardView {
            card,
            revealed: self.revealed,
        })
    }

    pub fn flip(&mut self) -> Result<(), ApiError> {
        self.ensure_in_progress("flip")?;
        self.revealed = !self.revealed;
        Ok(())
    }

    /// Records the verdict for the current card and moves to the next one.
    pub fn judge(&mut self, is_correct: bool) -> Result<Phase, ApiError> {
        self.ensure_in_progress("judge")?;
        if self.remaining.pop_front().is_none() {
            return Err(ApiError::invalid_state("no card left in session"));
        }

        if is_correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
        self.revealed = false;
        if self.remaining.is_empty() {
            self.phase = Phase::Completed;
        }

        debug_assert_eq!(
            self.remaining.len() + (self.correct + self.incorrect) as usize,
            self.total
        );
        Ok(self.phase)
    }

    /// Percentage of cards judged correct, rounded down.
    pub fn final_score(&self) -> Result<u8, ApiError> {
        if self.phase != Phase::Completed {
            return Err(ApiError::invalid_state(
                "final score is only available once the quiz is completed",
            ));
        }
        let judged = u64::from(self.correct) + u64::from(self.incorrect);
        if judged == 0 {
            return Err(ApiError::invalid_state("no cards were judged"));
        }

        let score = u64::from(self.correct) * u64::from(MAX_SCORE) / judged;
        u8::try_from(score).map_err(|_| ApiError::invalid_state("score out of range"))
    }

    /// Records the final score under `test_taker`. Nothing is recorded when the name is blank
    /// or the score was already submitted; a failed recording can be retried.
    pub async fn submit<R>(&mut self, test_taker: &str, recorder: &R) -> Result<u8, ClientError>
    where
        R: ScoreRecorder + ?Sized,
    {
        let score = self.final_score()?;
        if self.submitted {
            return Err(ApiError::invalid_state("quiz score was already submitted").into());
        }
        if test_taker.is_empty() {
            return Err(ApiError::invalid_argument("test taker must not be empty").into());
        }

        recorder
            .record_attempt(test_taker, &self.deck_name, score)
            .await?;
        self.submitted = true;
        info!(deck = %self.deck_name, test_taker = %test_taker, score, "quiz score submitted");
        Ok(score)
    }

    fn ensure_in_progress(&self, operation: &str) -> Result<(), ApiError> {
        match self.phase {
            Phase::InProgress => Ok(()),
            Phase::Completed => Err(ApiError::invalid_state(format!(
                "{operation} is not allowed after the quiz is completed"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "tests/quiz_tests.rs"]
mod tests;
