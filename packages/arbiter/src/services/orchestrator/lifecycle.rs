//! Starting, resetting and reconfiguring a match.

use std::time::Duration;

use tracing::info;

use super::{Match, MatchEvent};
use crate::agents::AgentProfile;
use crate::domain::{GameMode, GameStatus, Side, KICKOFF_DELAY_MS};

impl Match {
    /// Discard the current game and start playing a fresh one.
    ///
    /// Bumps the epoch, so any in-flight agent reply or armed timer from the
    /// previous game is discarded when it lands. In agent-vs-agent mode the
    /// opening request is armed after a short kickoff delay, giving
    /// subscribers time to render the fresh board.
    pub fn start_new_game(&self) {
        let kickoff = {
            let mut state = self.inner.state.lock();
            state.begin_epoch(GameStatus::Playing);
            state.mode == GameMode::AgentVsAgent && !state.paused
        };

        info!("new game started");
        self.emit(MatchEvent::StatusChanged(GameStatus::Playing));

        if kickoff {
            self.schedule_agent_tick(Duration::from_millis(KICKOFF_DELAY_MS));
        }
    }

    /// Return to the `Waiting` state with a fresh board and empty transcript.
    ///
    /// Configuration (mode, profiles, credential, pacing, pause) survives.
    pub fn reset(&self) {
        {
            let mut state = self.inner.state.lock();
            state.begin_epoch(GameStatus::Waiting);
        }
        info!("match reset");
        self.emit(MatchEvent::StatusChanged(GameStatus::Waiting));
    }

    /// Switch who controls the sides. Takes effect on the next scheduling
    /// decision; it does not interrupt a pending request.
    pub fn set_mode(&self, mode: GameMode) {
        let mut state = self.inner.state.lock();
        if state.mode != mode {
            info!(?mode, "game mode changed");
            state.mode = mode;
        }
    }

    /// Replace the agent selection for one side. Applies from the next
    /// request for that side; requests already in flight keep the profile
    /// they were built with.
    pub fn set_agent_profile(&self, side: Side, profile: AgentProfile) {
        let mut state = self.inner.state.lock();
        info!(side = side.label(), model = %profile.model, "agent profile changed");
        *state.profile_mut(side) = profile;
    }

    /// Set or clear the API credential. A blank credential counts as absent.
    pub fn set_credential(&self, credential: Option<String>) {
        let credential = credential
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        let mut state = self.inner.state.lock();
        info!(present = credential.is_some(), "credential updated");
        state.credential = credential;
    }
}
