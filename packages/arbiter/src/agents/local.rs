//! Offline agent that plays uniformly random legal moves.
//!
//! No credential, no network. Useful as a baseline opponent and for driving
//! the orchestrator in tests and demos.

use std::sync::Mutex;

use async_trait::async_trait;
use rand::prelude::*;

use super::{AgentError, MoveAgent, MoveRequest};
use crate::domain::Board;

/// Agent that answers with a random legal move for the requested position.
///
/// The reply is the bare SAN token with no commentary, so transcripts from
/// offline matches contain only moves and system entries.
pub struct RandomAgent {
    /// Trait methods take `&self`; the RNG needs interior mutability.
    rng: Mutex<StdRng>,
}

impl RandomAgent {
    pub const NAME: &'static str = "RandomAgent";

    /// Create a new `RandomAgent`.
    ///
    /// `Some(seed)` gives a reproducible move sequence for tests; `None`
    /// seeds from system entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = if let Some(s) = seed {
            StdRng::seed_from_u64(s)
        } else {
            StdRng::from_os_rng()
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

#[async_trait]
impl MoveAgent for RandomAgent {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn request_move(&self, request: &MoveRequest) -> Result<String, AgentError> {
        let board = Board::from_fen(&request.fen)
            .map_err(|e| AgentError::Internal(format!("unplayable position: {e}")))?;

        let legal = board.legal_sans();
        if legal.is_empty() {
            return Err(AgentError::Internal("no legal moves available".into()));
        }

        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AgentError::Internal(format!("RNG lock poisoned: {e}")))?;

        let choice = legal
            .choose(&mut *rng)
            .cloned()
            .ok_or_else(|| AgentError::Internal("failed to choose a random move".into()))?;

        Ok(choice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Side, START_FEN};

    fn opening_request() -> MoveRequest {
        MoveRequest {
            fen: START_FEN.to_string(),
            side_to_move: Side::White,
            last_move_san: None,
            model: "local/random".to_string(),
            credential: None,
        }
    }

    #[tokio::test]
    async fn plays_a_legal_opening_move() {
        let agent = RandomAgent::new(Some(7));
        let reply = agent.request_move(&opening_request()).await.unwrap();

        let board = Board::new();
        assert!(
            board.legal_sans().contains(&reply),
            "reply {reply:?} is not legal from the start position"
        );
    }

    #[tokio::test]
    async fn seeded_agents_repeat_their_choices() {
        let a = RandomAgent::new(Some(42));
        let b = RandomAgent::new(Some(42));

        for _ in 0..5 {
            let x = a.request_move(&opening_request()).await.unwrap();
            let y = b.request_move(&opening_request()).await.unwrap();
            assert_eq!(x, y);
        }
    }

    #[tokio::test]
    async fn rejects_unplayable_fen() {
        let agent = RandomAgent::new(Some(1));
        let mut request = opening_request();
        request.fen = "not a position".to_string();

        let err = agent.request_move(&request).await.unwrap_err();
        assert!(matches!(err, AgentError::Internal(_)));
    }

    #[test]
    fn never_needs_a_credential() {
        assert!(!RandomAgent::new(None).requires_credential());
    }
}
