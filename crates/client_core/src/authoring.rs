//! Parsing of the `front|back` text format used to author decks.

use shared::domain::Card;
use thiserror::Error;

pub const SIDE_SEPARATOR: char = '|';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthoringError {
    #[error("Name should not be empty")]
    EmptyName,
    #[error("No cards")]
    NoCards,
    #[error("Blank line inputted")]
    BlankLine,
    #[error("Wrong format for \"{0}\" question & answer pair")]
    WrongFormat(String),
    #[error("Blank question or answer in \"{0}\" question & answer pair")]
    BlankSide(String),
}

pub fn validate_deck_name(name: &str) -> Result<(), AuthoringError> {
    if name.is_empty() {
        return Err(AuthoringError::EmptyName);
    }
    Ok(())
}

/// Parses one card per line. Every line must hold exactly one `|` with text on both sides;
/// blank lines are errors. One trailing line break at the end of the input is ignored.
pub fn parse_deck_text(text: &str) -> Result<Vec<Card>, AuthoringError> {
    let text = text
        .strip_suffix('\n')
        .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
        .unwrap_or(text);
    if text.is_empty() {
        return Err(AuthoringError::NoCards);
    }

    text.split('\n')
        .map(|line| parse_line(line.strip_suffix('\r').unwrap_or(line)))
        .collect()
}

fn parse_line(line: &str) -> Result<Card, AuthoringError> {
    if line.is_empty() {
        return Err(AuthoringError::BlankLine);
    }

    let mut sides = line.split(SIDE_SEPARATOR);
    let (Some(front), Some(back), None) = (sides.next(), sides.next(), sides.next()) else {
        return Err(AuthoringError::WrongFormat(line.to_string()));
    };
    if front.is_empty() || back.is_empty() {
        return Err(AuthoringError::BlankSide(line.to_string()));
    }
    Ok(Card::new(front, back))
}

#[cfg(test)]
#[path = "tests/authoring_tests.rs"]
mod tests;
