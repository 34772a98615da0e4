//! Rules adapter behavior: legality, canonical SAN, endings.

use crate::domain::board::{Board, RulesError, START_FEN};
use crate::domain::state::Side;

#[test]
fn fresh_board_is_the_initial_position() {
    let board = Board::new();
    assert_eq!(board.fen(), START_FEN);
    assert_eq!(board.turn(), Side::White);
    assert_eq!(board.legal_sans().len(), 20);
    assert!(!board.is_game_over());
}

#[test]
fn applying_a_move_flips_the_turn_and_updates_fen() {
    let mut board = Board::new();
    let applied = board.apply_san("e4").unwrap();

    assert_eq!(applied.san, "e4");
    assert_eq!(applied.by, Side::White);
    assert!(!applied.flags.is_check);
    assert!(!applied.flags.is_terminal());
    assert_eq!(board.turn(), Side::Black);
    assert_eq!(applied.fen, board.fen());
    assert_ne!(board.fen(), START_FEN);
}

#[test]
fn spurious_suffix_on_input_is_tolerated() {
    let mut board = Board::new();
    let applied = board.apply_san("e4+").unwrap();
    assert_eq!(applied.san, "e4");
}

#[test]
fn illegal_move_is_rejected_without_mutation() {
    let mut board = Board::new();
    let before = board.fen();

    assert_eq!(
        board.apply_san("e5"),
        Err(RulesError::IllegalMove("e5".to_string()))
    );
    assert_eq!(
        board.apply_san("Ke2"),
        Err(RulesError::IllegalMove("Ke2".to_string()))
    );
    assert_eq!(board.fen(), before);
    assert_eq!(board.turn(), Side::White);
}

#[test]
fn unparseable_text_is_rejected() {
    let mut board = Board::new();
    assert!(matches!(board.apply_san("xyz"), Err(RulesError::ParseSan(_))));
    assert!(matches!(board.apply_san(""), Err(RulesError::ParseSan(_))));
    assert!(matches!(board.apply_san("  +#"), Err(RulesError::ParseSan(_))));
}

#[test]
fn ambiguous_san_is_rejected_and_disambiguation_accepted() {
    let fen = "4k3/8/8/8/R6R/8/8/4K3 w - - 0 1";
    let mut board = Board::from_fen(fen).unwrap();

    assert_eq!(
        board.apply_san("Rd4"),
        Err(RulesError::IllegalMove("Rd4".to_string()))
    );
    let applied = board.apply_san("Rad4").unwrap();
    assert_eq!(applied.san, "Rad4");
}

#[test]
fn fools_mate_is_checkmate_for_black() {
    let mut board = Board::new();
    for san in ["f3", "e5", "g4"] {
        board.apply_san(san).unwrap();
    }
    let mate = board.apply_san("Qh4").unwrap();

    assert_eq!(mate.san, "Qh4#");
    assert_eq!(mate.by, Side::Black);
    assert!(mate.flags.is_check);
    assert!(mate.flags.is_checkmate);
    assert!(board.is_game_over());
    assert_eq!(board.apply_san("a3"), Err(RulesError::GameOver));
}

#[test]
fn stalemate_is_reported_separately_from_draw() {
    // Loaded position that is already stalemate.
    let board = Board::from_fen("8/8/8/8/8/6q1/5k2/7K w - - 0 1").unwrap();
    let flags = board.flags();
    assert!(flags.is_stalemate);
    assert!(!flags.is_checkmate);
    assert!(!flags.is_draw);
    assert!(board.is_game_over());

    // And a move that produces stalemate.
    let mut board = Board::from_fen("k7/8/1K6/8/8/8/8/2Q5 w - - 0 1").unwrap();
    let applied = board.apply_san("Qc7").unwrap();
    assert!(applied.flags.is_stalemate);
    assert!(!applied.flags.is_check);
}

#[test]
fn bare_kings_are_a_draw_by_insufficient_material() {
    let board = Board::from_fen("8/8/8/4k3/8/8/8/4K3 w - - 0 1").unwrap();
    assert!(board.flags().is_draw);
    assert!(board.is_game_over());
}

#[test]
fn fifty_move_rule_draw_on_the_hundredth_halfmove() {
    let mut board = Board::from_fen("k7/8/8/8/8/8/8/K6R w - - 99 80").unwrap();
    let applied = board.apply_san("Rh2").unwrap();
    assert!(applied.flags.is_draw);
    assert!(!applied.flags.is_stalemate);
    assert!(!applied.flags.is_checkmate);
}

#[test]
fn threefold_repetition_is_a_draw() {
    let mut board = Board::new();
    let shuffle = ["Nf3", "Nf6", "Ng1", "Ng8"];

    for san in shuffle {
        let applied = board.apply_san(san).unwrap();
        assert!(!applied.flags.is_draw);
    }
    for (i, san) in shuffle.iter().enumerate() {
        let applied = board.apply_san(san).unwrap();
        if i < shuffle.len() - 1 {
            assert!(!applied.flags.is_draw, "premature draw on {san}");
        } else {
            // The starting position has now occurred three times.
            assert!(applied.flags.is_draw);
        }
    }
}

#[test]
fn promotion_gets_a_canonical_check_suffix() {
    let mut board = Board::from_fen("8/P7/8/8/8/8/8/4K2k w - - 0 1").unwrap();
    let applied = board.apply_san("a8=Q").unwrap();
    assert_eq!(applied.san, "a8=Q+");
    assert!(applied.flags.is_check);
    assert!(!applied.flags.is_terminal());
}

#[test]
fn castling_both_ways() {
    let fen = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1";
    let mut board = Board::from_fen(fen).unwrap();

    assert_eq!(board.apply_san("O-O").unwrap().san, "O-O");
    assert_eq!(board.apply_san("O-O-O").unwrap().san, "O-O-O");
    assert_eq!(board.turn(), Side::White);
}

#[test]
fn fen_round_trips_through_from_fen() {
    let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/8/PPPP1PPP/RNBQK1NR w KQkq - 2 3";
    let board = Board::from_fen(fen).unwrap();
    assert_eq!(board.fen(), fen);
}

#[test]
fn invalid_fen_is_rejected() {
    assert!(matches!(
        Board::from_fen("not a position"),
        Err(RulesError::InvalidFen(_))
    ));
    // Two white kings.
    assert!(matches!(
        Board::from_fen("4k3/8/8/8/8/8/8/3KK3 w - - 0 1"),
        Err(RulesError::InvalidFen(_))
    ));
}
