//! Pacing: when the next agent request fires without anyone asking.

use std::time::Duration;

use tracing::{debug, info};

use super::{Match, MatchState};
use crate::domain::{clamp_interval_ms, GameMode, GameStatus, Side};

/// How the next agent request should be issued after a committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Followup {
    /// Spawn the request right away (agent answering a human move).
    Immediate,
    /// Arm a timer (agent-vs-agent pacing).
    After(Duration),
}

impl Match {
    /// Decide what, if anything, should trigger the next agent request.
    /// Called with the lock held, right after a move was committed.
    pub(super) fn plan_followup(&self, state: &MatchState) -> Option<Followup> {
        if state.status != GameStatus::Playing {
            return None;
        }
        match state.mode {
            GameMode::AgentVsAgent if !state.paused => {
                Some(Followup::After(Duration::from_millis(state.interval_ms)))
            }
            GameMode::AgentVsAgent => None,
            // The human plays White; the agent answers as Black.
            GameMode::HumanVsAgent if state.side_to_move() == Side::Black => {
                Some(Followup::Immediate)
            }
            GameMode::HumanVsAgent => None,
        }
    }

    pub(super) fn execute_followup(&self, plan: Followup) {
        match plan {
            Followup::Immediate => self.spawn_agent_request(),
            Followup::After(delay) => self.schedule_agent_tick(delay),
        }
    }

    /// Run an agent request on its own task. The request path re-checks
    /// status and the pending flag, so a stray spawn is harmless.
    pub(super) fn spawn_agent_request(&self) {
        let handle = self.clone();
        tokio::spawn(async move {
            handle.request_agent_move().await;
        });
    }

    /// Arm a one-shot timer for the next agent request. The timer captures
    /// the current epoch and re-validates everything when it fires, so a
    /// reset or pause in the meantime disarms it.
    pub(super) fn schedule_agent_tick(&self, delay: Duration) {
        let epoch = self.inner.state.lock().epoch;
        let handle = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if handle.tick_is_current(epoch) {
                handle.request_agent_move().await;
            } else {
                debug!(epoch, "skipping stale autoplay tick");
            }
        });
    }

    fn tick_is_current(&self, epoch: u64) -> bool {
        let state = self.inner.state.lock();
        state.epoch == epoch
            && state.status == GameStatus::Playing
            && state.mode == GameMode::AgentVsAgent
            && !state.paused
    }

    /// Flip the autoplay pause. Unpausing a live agent-vs-agent game issues
    /// the next request immediately rather than waiting out an interval.
    pub fn toggle_pause(&self) -> bool {
        let (paused, resume) = {
            let mut state = self.inner.state.lock();
            state.paused = !state.paused;
            let resume = !state.paused
                && state.mode == GameMode::AgentVsAgent
                && state.status == GameStatus::Playing;
            (state.paused, resume)
        };

        info!(paused, "autoplay pause toggled");
        if resume {
            self.spawn_agent_request();
        }
        paused
    }

    /// Set the delay between agent-vs-agent moves, clamped to the supported
    /// range. Returns the value actually stored. Timers already armed keep
    /// their old delay.
    pub fn set_interval_ms(&self, interval_ms: u64) -> u64 {
        let clamped = clamp_interval_ms(interval_ms);
        self.inner.state.lock().interval_ms = clamped;
        clamped
    }
}
