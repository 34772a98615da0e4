//! Agent boundary: how the orchestrator obtains moves.
//!
//! [`MoveAgent`] hides the transport behind an async trait. The production
//! implementation talks to OpenRouter ([`OpenRouterAgent`]); [`RandomAgent`]
//! plays offline so matches can run without a credential or network.
//! Implementations return the raw reply text; splitting it into a move and
//! commentary, and validating the move, is the orchestrator's job.

mod catalog;
mod local;
mod openrouter;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Side;

/// Everything an agent may see when asked for a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    /// Current position in FEN.
    pub fen: String,
    pub side_to_move: Side,
    /// SAN of the opponent's last move, if any.
    pub last_move_san: Option<String>,
    /// Provider model identifier selected for this side.
    pub model: String,
    /// API credential, when one is configured.
    pub credential: Option<String>,
}

/// Failures crossing the agent boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AgentError {
    #[error("no API credential is configured")]
    MissingCredential,
    #[error("provider rate limit hit")]
    RateLimited,
    #[error("provider returned HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("could not reach the provider: {0}")]
    Network(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("agent internal error: {0}")]
    Internal(String),
}

impl AgentError {
    /// Transcript line players see when a request fails. Wording is kept
    /// stable; front ends display it verbatim.
    pub fn dialog_message(&self) -> String {
        match self {
            AgentError::MissingCredential => {
                "Please enter your OpenRouter API key in the settings to enable AI moves."
                    .to_string()
            }
            AgentError::RateLimited => {
                "OpenRouter API rate limit exceeded. Please wait a moment before making another move."
                    .to_string()
            }
            AgentError::Http { status, message } => {
                format!("OpenRouter API error ({status}): {message}")
            }
            AgentError::Timeout(elapsed) => {
                format!("OpenRouter API request timed out after {}s.", elapsed.as_secs())
            }
            AgentError::Network(_) => "Unexpected error while calling OpenRouter API".to_string(),
            AgentError::Internal(_) => "An unexpected error occurred".to_string(),
        }
    }
}

/// A move provider for one side of the board.
#[async_trait]
pub trait MoveAgent: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Whether requests are pointless without an API credential. When this
    /// is true and none is configured, the orchestrator reports
    /// [`AgentError::MissingCredential`] without calling [`Self::request_move`].
    fn requires_credential(&self) -> bool {
        false
    }

    /// Produce the reply text for the given position.
    async fn request_move(&self, request: &MoveRequest) -> Result<String, AgentError>;
}

// Re-exports for ergonomics
pub use catalog::{
    available_models, model_by_id, AgentProfile, ModelInfo, DEFAULT_BLACK_MODEL,
    DEFAULT_WHITE_MODEL,
};
pub use local::RandomAgent;
pub use openrouter::{OpenRouterAgent, DEFAULT_REQUEST_TIMEOUT, OPENROUTER_API_URL};
