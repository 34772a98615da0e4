//! Rules adapter over `shakmaty`.
//!
//! [`Board`] owns the live position plus the bookkeeping the engine does not
//! do for us (repetition counting for threefold detection). All mutation goes
//! through [`Board::apply_san`], which validates against the current position
//! and only commits when the move is legal, so a rejected move can never leave
//! partial state behind.

use std::collections::HashMap;

use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Position};
use thiserror::Error;

use super::state::{PositionFlags, Side};

/// Initial position in FEN, as reported by a fresh [`Board`].
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("invalid FEN '{0}'")]
    InvalidFen(String),
    #[error("'{0}' is not a chess move")]
    ParseSan(String),
    #[error("'{0}' is not legal in the current position")]
    IllegalMove(String),
    #[error("the game is already over")]
    GameOver,
}

/// A move that passed validation and was committed to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    /// Canonical SAN including a check or mate suffix.
    pub san: String,
    /// The side that made the move.
    pub by: Side,
    /// Flags for the position the move produced.
    pub flags: PositionFlags,
    /// FEN of the position the move produced.
    pub fen: String,
}

/// Chess position plus repetition history for draw detection.
#[derive(Debug, Clone)]
pub struct Board {
    position: Chess,
    /// Occurrence count per position key, for threefold repetition.
    seen: HashMap<String, u32>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// A board at the initial position.
    pub fn new() -> Board {
        Board::with_position(Chess::default())
    }

    /// A board at an arbitrary position.
    pub fn from_fen(fen: &str) -> Result<Board, RulesError> {
        let parsed: Fen = fen
            .parse()
            .map_err(|_| RulesError::InvalidFen(fen.to_string()))?;
        let position: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|_| RulesError::InvalidFen(fen.to_string()))?;
        Ok(Board::with_position(position))
    }

    fn with_position(position: Chess) -> Board {
        let mut board = Board {
            position,
            seen: HashMap::new(),
        };
        board.record_position();
        board
    }

    /// Current position in FEN.
    pub fn fen(&self) -> String {
        Fen::from_position(self.position.clone(), EnPassantMode::Legal).to_string()
    }

    /// Side to move.
    pub fn turn(&self) -> Side {
        Side::from(self.position.turn())
    }

    /// Flags for the current position.
    pub fn flags(&self) -> PositionFlags {
        let repetitions = self.seen.get(&self.position_key()).copied().unwrap_or(0);
        self.position_flags(repetitions)
    }

    /// Whether no further moves can be played.
    pub fn is_game_over(&self) -> bool {
        self.flags().is_terminal()
    }

    /// Every legal move in the current position, in SAN without suffixes.
    pub fn legal_sans(&self) -> Vec<String> {
        self.position
            .legal_moves()
            .iter()
            .map(|m| San::from_move(&self.position, m).to_string())
            .collect()
    }

    /// Validate `text` as SAN for the side to move and, if legal, commit it.
    ///
    /// Accepts moves with or without a trailing `+`/`#`; the returned
    /// [`AppliedMove::san`] is canonical and always carries the right suffix.
    /// On any error the board is left untouched.
    pub fn apply_san(&mut self, text: &str) -> Result<AppliedMove, RulesError> {
        if self.is_game_over() {
            return Err(RulesError::GameOver);
        }

        let trimmed = text.trim();
        let bare = trimmed.trim_end_matches(['+', '#']);
        if bare.is_empty() {
            return Err(RulesError::ParseSan(text.to_string()));
        }
        let san: San = bare
            .parse()
            .map_err(|_| RulesError::ParseSan(trimmed.to_string()))?;
        let mv = san
            .to_move(&self.position)
            .map_err(|_| RulesError::IllegalMove(trimmed.to_string()))?;
        let next = self
            .position
            .clone()
            .play(&mv)
            .map_err(|_| RulesError::IllegalMove(trimmed.to_string()))?;

        let body = San::from_move(&self.position, &mv).to_string();
        let suffix = if next.is_checkmate() {
            "#"
        } else if next.is_check() {
            "+"
        } else {
            ""
        };
        let by = self.turn();

        self.position = next;
        let repetitions = self.record_position();
        let flags = self.position_flags(repetitions);

        Ok(AppliedMove {
            san: format!("{body}{suffix}"),
            by,
            flags,
            fen: self.fen(),
        })
    }

    /// Record the current position for repetition counting and return how
    /// many times it has now occurred.
    fn record_position(&mut self) -> u32 {
        let count = self.seen.entry(self.position_key()).or_insert(0);
        *count += 1;
        *count
    }

    /// Repetition key: FEN truncated to piece placement, side to move,
    /// castling rights and en-passant square. Move clocks do not count
    /// toward repetition.
    fn position_key(&self) -> String {
        let fen = self.fen();
        fen.split(' ').take(4).collect::<Vec<_>>().join(" ")
    }

    fn position_flags(&self, repetitions: u32) -> PositionFlags {
        PositionFlags {
            is_check: self.position.is_check(),
            is_checkmate: self.position.is_checkmate(),
            is_stalemate: self.position.is_stalemate(),
            is_draw: self.position.is_insufficient_material()
                || self.position.halfmoves() >= 100
                || repetitions >= 3,
        }
    }
}
