use shared::error::ApiError;
use thiserror::Error;

use crate::authoring::AuthoringError;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status; `message` is its response text.
    #[error("server rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("failed to reach server: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response from {route}: {reason}")]
    Decode { route: &'static str, reason: String },
    #[error(transparent)]
    Authoring(#[from] AuthoringError),
    #[error(transparent)]
    Session(#[from] ApiError),
}
