//! Domain layer: pure chess-side logic, no I/O.

pub mod board;
pub mod dialog;
pub mod extract;
pub mod state;

#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_board;
#[cfg(test)]
mod tests_props_board;
#[cfg(test)]
mod tests_props_extract;

// Re-exports for ergonomics
pub use board::{AppliedMove, Board, RulesError, START_FEN};
pub use dialog::{DialogEntry, DialogLog, Speaker};
pub use extract::{extract_move, Extraction};
pub use state::{
    clamp_interval_ms, GameEnding, GameMode, GameStatus, PositionFlags, Side,
    DEFAULT_INTERVAL_MS, KICKOFF_DELAY_MS, MAX_INTERVAL_MS, MIN_INTERVAL_MS,
};
