//! Match-level state types shared across the orchestration layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle of a single game.
///
/// `Ended` has no outgoing transition except starting a new game, which
/// resets everything under a fresh epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Waiting,
    Playing,
    Ended,
}

/// Who controls each side of the board.
///
/// In [`GameMode::HumanVsAgent`] the human plays White; the White agent
/// profile is kept configured but unused until the mode changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    HumanVsAgent,
    AgentVsAgent,
}

/// A side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::White => "White",
            Side::Black => "Black",
        }
    }

    /// Side to move after `plies` applied half-moves. Even counts mean it is
    /// White's turn; this is the only source of truth for whose turn it is.
    pub fn to_move_after(plies: usize) -> Side {
        if plies % 2 == 0 {
            Side::White
        } else {
            Side::Black
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<shakmaty::Color> for Side {
    fn from(color: shakmaty::Color) -> Side {
        match color {
            shakmaty::Color::White => Side::White,
            shakmaty::Color::Black => Side::Black,
        }
    }
}

impl From<Side> for shakmaty::Color {
    fn from(side: Side) -> shakmaty::Color {
        match side {
            Side::White => shakmaty::Color::White,
            Side::Black => shakmaty::Color::Black,
        }
    }
}

/// Flags describing the position after the most recent applied move.
///
/// `is_draw` covers insufficient material, the fifty-move rule and threefold
/// repetition. Stalemate is reported separately so callers can distinguish
/// it when summarizing a finished game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionFlags {
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_draw: bool,
    pub is_stalemate: bool,
}

impl PositionFlags {
    pub fn is_terminal(self) -> bool {
        self.is_checkmate || self.is_draw || self.is_stalemate
    }
}

/// Bounds for the delay between agent moves in agent-vs-agent autoplay.
pub const MIN_INTERVAL_MS: u64 = 300;
pub const MAX_INTERVAL_MS: u64 = 5_000;
pub const DEFAULT_INTERVAL_MS: u64 = 1_500;

/// Delay before the first agent request of a fresh agent-vs-agent game.
pub const KICKOFF_DELAY_MS: u64 = 1_000;

/// Clamp a requested autoplay interval into the supported range.
pub fn clamp_interval_ms(ms: u64) -> u64 {
    ms.clamp(MIN_INTERVAL_MS, MAX_INTERVAL_MS)
}

/// How a finished game ended, in detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnding {
    Checkmate { winner: Side },
    Draw,
    Stalemate,
}

impl GameEnding {
    /// Derive the ending from the flags after a move, if the game is over.
    /// `mover` is the side that just moved; on checkmate it is the winner.
    pub fn from_flags(flags: PositionFlags, mover: Side) -> Option<GameEnding> {
        if flags.is_checkmate {
            Some(GameEnding::Checkmate { winner: mover })
        } else if flags.is_draw {
            Some(GameEnding::Draw)
        } else if flags.is_stalemate {
            Some(GameEnding::Stalemate)
        } else {
            None
        }
    }

    /// Transcript text announcing the result.
    pub fn describe(&self) -> String {
        let mut message = String::from("Game over! ");
        match self {
            GameEnding::Checkmate { winner } => {
                message.push_str(&format!("{} wins by checkmate!", winner.label()));
            }
            GameEnding::Draw => message.push_str("The game is a draw."),
            GameEnding::Stalemate => message.push_str("The game is a draw by stalemate."),
        }
        message
    }
}
