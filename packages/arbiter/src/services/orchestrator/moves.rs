//! Human move submission.

use tracing::{debug, info};

use super::outcome::{IgnoreReason, MoveDecision};
use super::Match;
use crate::domain::{GameMode, GameStatus, Side};

impl Match {
    /// Apply a move typed by the human player, given in SAN (a trailing
    /// `+`/`#` is accepted and normalized).
    ///
    /// Only valid in human-vs-agent mode while the game is in progress and it
    /// is the human's turn; everything else is ignored without touching the
    /// board. An illegal move is rejected with the rules error and no
    /// transcript entry, leaving the position exactly as it was.
    pub fn submit_human_move(&self, text: &str) -> MoveDecision {
        let (decision, events, followup) = {
            let mut state = self.inner.state.lock();

            if state.status != GameStatus::Playing {
                return MoveDecision::Ignored(IgnoreReason::NotPlaying);
            }
            if state.mode != GameMode::HumanVsAgent {
                return MoveDecision::Ignored(IgnoreReason::WrongMode);
            }
            // The pending flag can only be set while it is the agent's turn,
            // so this check also covers an in-flight agent reply.
            if state.side_to_move() != Side::White {
                return MoveDecision::Ignored(IgnoreReason::NotHumansTurn);
            }

            match state.board.apply_san(text) {
                Ok(applied) => {
                    info!(san = %applied.san, "human move applied");
                    let mut events = Vec::new();
                    state.commit_move(&applied, &mut events);
                    let followup = self.plan_followup(&state);
                    (MoveDecision::Applied(applied), events, followup)
                }
                Err(error) => {
                    debug!(input = text, %error, "human move rejected");
                    return MoveDecision::Rejected(error);
                }
            }
        };

        self.emit_all(events);
        if let Some(plan) = followup {
            self.execute_followup(plan);
        }
        decision
    }
}
