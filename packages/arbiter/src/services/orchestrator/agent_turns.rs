//! The agent request path: ask, extract, validate, commit.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::outcome::{RejectReason, SkipReason, TurnOutcome};
use super::{Match, MatchEvent, MatchInner};
use crate::agents::{AgentError, MoveRequest};
use crate::domain::{extract_move, GameStatus, Side, Speaker};

/// System entry when a reply yields no usable move, whether nothing
/// move-shaped was found or the found token was refused by the rules.
const REPLY_WITHOUT_MOVE: &str = "Invalid or no move returned from AI";

/// Everything captured under the lock before the network call.
struct RequestTicket {
    epoch: u64,
    side: Side,
    request: MoveRequest,
}

/// Clears the pending-request flag when dropped, but only for the epoch that
/// set it; after a reset the new epoch owns the flag.
struct PendingGuard {
    inner: Arc<MatchInner>,
    epoch: u64,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        let mut state = self.inner.state.lock();
        if state.epoch == self.epoch {
            state.request_pending = false;
        }
    }
}

impl Match {
    /// Ask the configured agent for the side to move's next move and apply
    /// whatever comes back.
    ///
    /// At most one request is in flight per match; a call while one is
    /// pending is a no-op. The pending flag is released on every exit path,
    /// including panics in the agent, by an RAII guard. A reset while the
    /// request is outstanding makes the reply stale: it is discarded without
    /// touching board or transcript.
    pub async fn request_agent_move(&self) -> TurnOutcome {
        let ticket = {
            let mut state = self.inner.state.lock();

            if state.status != GameStatus::Playing {
                return TurnOutcome::Skipped(SkipReason::NotPlaying);
            }
            if state.request_pending {
                debug!("agent request already pending, skipping");
                return TurnOutcome::Skipped(SkipReason::RequestPending);
            }

            // Fail fast before committing to a request: no credential means
            // no network call and the flag is never raised.
            if self.inner.agent.requires_credential() && state.credential.is_none() {
                let entry = state.dialog.append(
                    Speaker::System,
                    AgentError::MissingCredential.dialog_message(),
                );
                drop(state);
                warn!("agent move requested without a credential");
                self.emit(MatchEvent::Dialog(entry));
                return TurnOutcome::Failed(AgentError::MissingCredential);
            }

            let side = state.side_to_move();
            state.request_pending = true;
            RequestTicket {
                epoch: state.epoch,
                side,
                request: MoveRequest {
                    fen: state.board.fen(),
                    side_to_move: side,
                    last_move_san: state.history.last().cloned(),
                    model: state.profile(side).model.clone(),
                    credential: state.credential.clone(),
                },
            }
        };

        let _pending = PendingGuard {
            inner: Arc::clone(&self.inner),
            epoch: ticket.epoch,
        };

        info!(
            side = ticket.side.label(),
            model = %ticket.request.model,
            "requesting agent move"
        );

        match self.inner.agent.request_move(&ticket.request).await {
            Ok(text) => self.handle_agent_reply(ticket, &text),
            Err(error) => self.handle_agent_failure(ticket, error),
        }
    }

    fn handle_agent_reply(&self, ticket: RequestTicket, text: &str) -> TurnOutcome {
        let extraction = extract_move(text);

        let (outcome, events, followup) = {
            let mut state = self.inner.state.lock();

            if state.epoch != ticket.epoch {
                debug!(side = ticket.side.label(), "discarding stale agent reply");
                return TurnOutcome::Skipped(SkipReason::Stale);
            }
            if state.status != GameStatus::Playing {
                return TurnOutcome::Skipped(SkipReason::NotPlaying);
            }

            let mut events = Vec::new();

            // Commentary lands in the transcript even when the move does not.
            if let Some(commentary) = extraction.commentary {
                let entry = state.dialog.append(Speaker::from(ticket.side), commentary);
                events.push(MatchEvent::Dialog(entry));
            }

            match extraction.move_token {
                None => {
                    warn!(side = ticket.side.label(), "agent reply contained no move");
                    let entry = state.dialog.append(Speaker::System, REPLY_WITHOUT_MOVE);
                    events.push(MatchEvent::Dialog(entry));
                    (TurnOutcome::Rejected(RejectReason::NoMoveFound), events, None)
                }
                Some(token) => match state.board.apply_san(&token) {
                    Ok(applied) => {
                        info!(
                            side = ticket.side.label(),
                            san = %applied.san,
                            "agent move applied"
                        );
                        state.commit_move(&applied, &mut events);
                        let followup = self.plan_followup(&state);
                        (TurnOutcome::Applied(applied), events, followup)
                    }
                    Err(error) => {
                        warn!(
                            side = ticket.side.label(),
                            token = %token,
                            %error,
                            "agent move rejected"
                        );
                        let entry = state.dialog.append(Speaker::System, REPLY_WITHOUT_MOVE);
                        events.push(MatchEvent::Dialog(entry));
                        (
                            TurnOutcome::Rejected(RejectReason::IllegalToken { token, error }),
                            events,
                            None,
                        )
                    }
                },
            }
        };

        self.emit_all(events);
        if let Some(plan) = followup {
            self.execute_followup(plan);
        }
        outcome
    }

    fn handle_agent_failure(&self, ticket: RequestTicket, error: AgentError) -> TurnOutcome {
        let entry = {
            let mut state = self.inner.state.lock();
            if state.epoch != ticket.epoch {
                debug!(side = ticket.side.label(), "discarding stale agent failure");
                return TurnOutcome::Skipped(SkipReason::Stale);
            }
            warn!(side = ticket.side.label(), %error, "agent request failed");
            state
                .dialog
                .append(Speaker::System, error.dialog_message())
        };

        self.emit(MatchEvent::Dialog(entry));
        TurnOutcome::Failed(error)
    }
}
