//! Typed results for orchestrator operations.

use crate::agents::AgentError;
use crate::domain::{AppliedMove, RulesError};

/// What came of asking the agent for a move.
#[derive(Debug)]
pub enum TurnOutcome {
    /// The reply contained a legal move and it was committed.
    Applied(AppliedMove),
    /// Nothing was attempted.
    Skipped(SkipReason),
    /// A reply arrived but did not yield a legal move. Any commentary it
    /// carried is already in the transcript.
    Rejected(RejectReason),
    /// The request itself failed; the transcript carries the player-facing
    /// message.
    Failed(AgentError),
}

impl TurnOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, TurnOutcome::Applied(_))
    }
}

/// Why an agent request was not attempted or its reply not used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No game in progress.
    NotPlaying,
    /// Another request is already in flight.
    RequestPending,
    /// The game was replaced while the request was in flight.
    Stale,
}

/// Why a received reply was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// No move-shaped token anywhere in the reply.
    NoMoveFound,
    /// A token was found but the board refused it.
    IllegalToken { token: String, error: RulesError },
}

/// What came of a human move submission.
#[derive(Debug)]
pub enum MoveDecision {
    Applied(AppliedMove),
    /// Not a legal move; nothing changed.
    Rejected(RulesError),
    /// Out of turn or out of phase; nothing changed.
    Ignored(IgnoreReason),
}

impl MoveDecision {
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveDecision::Applied(_))
    }
}

/// Why a human submission was not even validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No game in progress.
    NotPlaying,
    /// Human input only applies in human-vs-agent mode.
    WrongMode,
    /// It is the agent's turn (or its reply is still pending).
    NotHumansTurn,
}
