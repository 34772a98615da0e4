//! Property-based tests for board bookkeeping under random play.

use proptest::prelude::*;

use crate::domain::board::Board;
use crate::domain::state::Side;
use crate::domain::test_prelude;

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// However a game meanders, the side to move always equals the parity of
    /// the number of applied moves, and every SAN the board itself offers as
    /// legal is accepted when played.
    #[test]
    fn random_playouts_keep_turn_parity(choices in proptest::collection::vec(any::<u16>(), 0..60)) {
        let mut board = Board::new();
        let mut applied = 0usize;

        for choice in choices {
            if board.is_game_over() {
                break;
            }
            let legal = board.legal_sans();
            prop_assert!(!legal.is_empty(), "live position must offer moves");
            let san = &legal[choice as usize % legal.len()];

            let outcome = board.apply_san(san);
            prop_assert!(outcome.is_ok(), "own legal move {:?} rejected: {:?}", san, outcome);
            applied += 1;

            prop_assert_eq!(board.turn(), Side::to_move_after(applied),
                "turn out of step after {} moves", applied);
        }
    }

    /// A rejected move never changes the position, whatever the junk input.
    #[test]
    fn rejected_input_never_mutates(text in any::<String>()) {
        let mut board = Board::new();
        let before = board.fen();
        if board.apply_san(&text).is_err() {
            prop_assert_eq!(board.fen(), before);
        }
    }
}
