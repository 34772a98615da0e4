//! Turn orchestration for a single match.
//!
//! [`Match`] is a cheap-to-clone handle over shared state. It owns the board,
//! the transcript and the pacing rules: who may move now, when the agent is
//! asked for a move, and what happens to its reply. Agent requests run on the
//! caller's task; follow-up requests (the opponent's reply in agent-vs-agent
//! play, or the agent's answer to a human move) are spawned onto the runtime.
//!
//! Concurrency is governed by two pieces of bookkeeping:
//!
//! * a `request_pending` flag guaranteeing at most one agent request is in
//!   flight, cleared on every exit path by an RAII guard;
//! * a monotonically increasing `epoch`, bumped whenever the game is replaced
//!   (new game or reset). Replies and timers stamped with an old epoch are
//!   discarded without touching state.

mod agent_turns;
mod autoplay;
mod lifecycle;
mod moves;
mod outcome;


use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::agents::{AgentProfile, MoveAgent};
use crate::domain::{
    AppliedMove, Board, DialogEntry, DialogLog, GameEnding, GameMode, GameStatus, PositionFlags,
    Side, Speaker, DEFAULT_INTERVAL_MS,
};

pub use outcome::{IgnoreReason, MoveDecision, RejectReason, SkipReason, TurnOutcome};

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Initial configuration for a match.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub mode: GameMode,
    pub white: AgentProfile,
    pub black: AgentProfile,
    /// API credential handed to the agent on every request.
    pub credential: Option<String>,
    /// Autoplay delay between agent-vs-agent moves, clamped to the supported
    /// range on construction.
    pub interval_ms: u64,
    pub start_paused: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            mode: GameMode::HumanVsAgent,
            white: AgentProfile::default_for(Side::White),
            black: AgentProfile::default_for(Side::Black),
            credential: None,
            interval_ms: DEFAULT_INTERVAL_MS,
            start_paused: false,
        }
    }
}

/// Point-in-time view of a match for rendering or inspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub status: GameStatus,
    pub mode: GameMode,
    pub fen: String,
    pub side_to_move: Side,
    /// Applied moves in canonical SAN, oldest first.
    pub history: Vec<String>,
    pub flags: PositionFlags,
    pub request_pending: bool,
    pub paused: bool,
    pub interval_ms: u64,
    pub epoch: u64,
}

/// Something observable happened to the match.
#[derive(Debug, Clone)]
pub enum MatchEvent {
    MoveApplied {
        side: Side,
        san: String,
        fen: String,
    },
    Dialog(DialogEntry),
    StatusChanged(GameStatus),
}

/// Handle to a running match. Clones share the same match.
#[derive(Clone)]
pub struct Match {
    inner: Arc<MatchInner>,
}

struct MatchInner {
    state: Mutex<MatchState>,
    agent: Arc<dyn MoveAgent>,
    events: broadcast::Sender<MatchEvent>,
}

struct MatchState {
    /// Bumped on every new game or reset; stale async work checks it.
    epoch: u64,
    status: GameStatus,
    mode: GameMode,
    board: Board,
    history: Vec<String>,
    flags: PositionFlags,
    dialog: DialogLog,
    white: AgentProfile,
    black: AgentProfile,
    credential: Option<String>,
    interval_ms: u64,
    paused: bool,
    request_pending: bool,
}

impl MatchState {
    fn side_to_move(&self) -> Side {
        let side = Side::to_move_after(self.history.len());
        debug_assert_eq!(
            self.board.turn(),
            side,
            "history parity diverged from the board's turn"
        );
        side
    }

    fn profile(&self, side: Side) -> &AgentProfile {
        match side {
            Side::White => &self.white,
            Side::Black => &self.black,
        }
    }

    fn profile_mut(&mut self, side: Side) -> &mut AgentProfile {
        match side {
            Side::White => &mut self.white,
            Side::Black => &mut self.black,
        }
    }

    /// Replace the game under a fresh epoch. Agent selection, credential,
    /// pacing and pause state survive; board, history and transcript do not.
    fn begin_epoch(&mut self, status: GameStatus) {
        self.epoch += 1;
        self.board = Board::new();
        self.history.clear();
        self.flags = PositionFlags::default();
        self.dialog.clear();
        self.request_pending = false;
        self.status = status;
    }

    /// Commit a validated move and, if it finished the game, flip the status
    /// and queue the single system announcement.
    fn commit_move(&mut self, applied: &AppliedMove, events: &mut Vec<MatchEvent>) {
        self.history.push(applied.san.clone());
        self.flags = applied.flags;
        events.push(MatchEvent::MoveApplied {
            side: applied.by,
            san: applied.san.clone(),
            fen: applied.fen.clone(),
        });

        if let Some(ending) = GameEnding::from_flags(applied.flags, applied.by) {
            self.status = GameStatus::Ended;
            let entry = self.dialog.append(Speaker::System, ending.describe());
            events.push(MatchEvent::Dialog(entry));
            events.push(MatchEvent::StatusChanged(GameStatus::Ended));
        }
    }
}

impl Match {
    /// Create a match in the `Waiting` state; nothing happens until
    /// [`Match::start_new_game`].
    pub fn new(agent: Arc<dyn MoveAgent>, config: MatchConfig) -> Match {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let state = MatchState {
            epoch: 0,
            status: GameStatus::Waiting,
            mode: config.mode,
            board: Board::new(),
            history: Vec::new(),
            flags: PositionFlags::default(),
            dialog: DialogLog::new(),
            white: config.white,
            black: config.black,
            credential: config.credential.filter(|c| !c.trim().is_empty()),
            interval_ms: crate::domain::clamp_interval_ms(config.interval_ms),
            paused: config.start_paused,
            request_pending: false,
        };
        Match {
            inner: Arc::new(MatchInner {
                state: Mutex::new(state),
                agent,
                events,
            }),
        }
    }

    /// Current state of the match.
    pub fn snapshot(&self) -> MatchSnapshot {
        let state = self.inner.state.lock();
        MatchSnapshot {
            status: state.status,
            mode: state.mode,
            fen: state.board.fen(),
            side_to_move: state.side_to_move(),
            history: state.history.clone(),
            flags: state.flags,
            request_pending: state.request_pending,
            paused: state.paused,
            interval_ms: state.interval_ms,
            epoch: state.epoch,
        }
    }

    /// The transcript so far, oldest entry first.
    pub fn dialog(&self) -> Vec<DialogEntry> {
        self.inner.state.lock().dialog.entries().to_vec()
    }

    /// Subscribe to match events. Slow receivers may observe lag; the
    /// snapshot is the source of truth, events are a change feed.
    pub fn subscribe(&self) -> broadcast::Receiver<MatchEvent> {
        self.inner.events.subscribe()
    }

    fn emit(&self, event: MatchEvent) {
        // Nobody listening is fine.
        let _ = self.inner.events.send(event);
    }

    fn emit_all(&self, events: Vec<MatchEvent>) {
        for event in events {
            self.emit(event);
        }
    }
}
