use chessboard::board::{Board, Coord};
use chessboard::check::{in_check, legal_moves_for};
use chessboard::config::RulesConfig;
use chessboard::engine::Game;
use chessboard::moves::moves_for;
use chessboard::piece::{Color, Piece, PieceKind};
use proptest::prelude::*;

fn arb_piece() -> impl Strategy<Value = Piece> {
    let kinds = vec![
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ];
    (prop::sample::select(kinds), any::<bool>())
        .prop_map(|(kind, white)| Piece::new(kind, if white { Color::White } else { Color::Black }))
}

fn coord_of(index: usize) -> Coord {
    Coord { row: index / 8, col: index % 8 }
}

/// Two kings on distinct squares plus up to 16 other pieces.
fn arb_board() -> impl Strategy<Value = Board> {
    (0..64usize, 0..64usize, prop::collection::vec((0..64usize, arb_piece()), 0..16))
        .prop_filter("kings need their own squares", |(wk, bk, _)| wk != bk)
        .prop_map(|(wk, bk, others)| {
            let mut board = Board::empty();
            for (sq, piece) in others {
                if sq != wk && sq != bk {
                    board.set_piece(coord_of(sq), Some(piece));
                }
            }
            board.set_piece(coord_of(wk), Some(Piece::new(PieceKind::King, Color::White)));
            board.set_piece(coord_of(bk), Some(Piece::new(PieceKind::King, Color::Black)));
            board
        })
}

fn arb_clicks() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..8usize, 0..8usize), 0..300)
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn check_matches_opponent_move_sets(board in arb_board()) {
        let rules = RulesConfig::default();
        for color in [Color::White, Color::Black] {
            let king = board.find_king(color).unwrap();
            let reached = board
                .pieces(color.opposite())
                .any(|(from, _)| moves_for(&board, from, &rules).contains(&king));
            prop_assert_eq!(in_check(&board, color).unwrap(), reached);
        }
    }

    #[test]
    fn legal_moves_are_king_safe_subset(board in arb_board()) {
        let rules = RulesConfig::default();
        for color in [Color::White, Color::Black] {
            for (from, _) in board.pieces(color) {
                let pseudo = moves_for(&board, from, &rules);
                for to in legal_moves_for(&board, from, &rules).unwrap() {
                    prop_assert!(pseudo.contains(&to));
                    prop_assert!(!in_check(&board.with_move(from, to), color).unwrap());
                }
            }
        }
    }

    #[test]
    fn generation_is_read_only(board in arb_board()) {
        let before = board.clone();
        let rules = RulesConfig::default();
        for (from, _) in board.pieces(Color::White).chain(board.pieces(Color::Black)) {
            let _ = legal_moves_for(&board, from, &rules).unwrap();
        }
        prop_assert_eq!(board, before);
    }

    #[test]
    fn clicks_flip_turn_only_on_commit(clicks in arb_clicks()) {
        let mut game = Game::new();
        for (row, col) in clicks {
            let turn = game.current_turn;
            let pieces_before: Vec<_> = game.board.squares.iter().flatten().map(|s| s.piece).collect();
            let (white_before, black_before) = (game.captured_white.clone(), game.captured_black.clone());

            let outcome = game.click_at(row, col).unwrap();

            if outcome.is_commit() {
                prop_assert_eq!(game.current_turn, turn.opposite());
            } else {
                prop_assert_eq!(game.current_turn, turn);
                let pieces_after: Vec<_> = game.board.squares.iter().flatten().map(|s| s.piece).collect();
                prop_assert_eq!(pieces_after, pieces_before);
            }
            prop_assert!(game.captured_white.starts_with(&white_before));
            prop_assert!(game.captured_black.starts_with(&black_before));
            prop_assert!(game.captured_white.len() + game.captured_black.len()
                <= white_before.len() + black_before.len() + 1);
        }
    }

    #[test]
    fn replaying_clicks_is_deterministic(clicks in arb_clicks()) {
        let mut first = Game::new();
        let mut second = Game::new();
        for &(row, col) in &clicks {
            let a = first.click_at(row, col).unwrap();
            let b = second.click_at(row, col).unwrap();
            prop_assert_eq!(a, b);
        }
        prop_assert_eq!(first.snapshot(), second.snapshot());
        prop_assert_eq!(first, second);
    }
}
