#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Turn orchestration for chess matches played by language-model agents.
//!
//! The [`services::orchestrator::Match`] handle owns a game: it paces turns,
//! asks the configured [`agents::MoveAgent`] for moves, extracts a SAN token
//! and commentary from the free-text reply, validates against the rules and
//! keeps a transcript of everything the players and the system said.

pub mod agents;
pub mod config;
pub mod domain;
pub mod services;
pub mod telemetry;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use agents::{
    available_models, model_by_id, AgentError, AgentProfile, ModelInfo, MoveAgent, MoveRequest,
    OpenRouterAgent, RandomAgent,
};
pub use config::{api_key_from_env, AgentSettings};
pub use domain::{
    extract_move, Board, DialogEntry, Extraction, GameMode, GameStatus, Side, Speaker,
};
pub use services::orchestrator::{
    IgnoreReason, Match, MatchConfig, MatchEvent, MatchSnapshot, MoveDecision, RejectReason,
    SkipReason, TurnOutcome,
};

// Prelude for embedders and tests
pub mod prelude {
    pub use super::agents::*;
    pub use super::config::*;
    pub use super::domain::*;
    pub use super::services::orchestrator::*;
}

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
