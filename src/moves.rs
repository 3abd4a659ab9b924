// Pseudo-legal move generation. Nothing here looks at whether a move would
// leave the mover's own king in check; that filtering lives in `check`.

use std::collections::HashSet;

use crate::board::{Board, Coord};
use crate::config::RulesConfig;
use crate::piece::{Color, PieceKind};

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1), (0, 1),
    (1, -1), (1, 0), (1, 1),
];

const STRAIGHT_DIRS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const DIAGONAL_DIRS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Every square the piece on `from` may move to under its movement pattern
/// and the current occupancy. An empty origin yields no moves.
pub fn moves_for(board: &Board, from: Coord, rules: &RulesConfig) -> Vec<Coord> {
    let mut moves = Vec::new();
    let piece = match board.piece_at(from) {
        Some(p) => p,
        None => return moves,
    };
    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(board, from, piece.color, rules, &mut moves),
        PieceKind::Knight => generate_step_moves(board, from, piece.color, &KNIGHT_OFFSETS, &mut moves),
        PieceKind::King => generate_step_moves(board, from, piece.color, &KING_OFFSETS, &mut moves),
        PieceKind::Bishop => generate_sliding_moves(board, from, piece.color, &DIAGONAL_DIRS, &mut moves),
        PieceKind::Rook => generate_sliding_moves(board, from, piece.color, &STRAIGHT_DIRS, &mut moves),
        PieceKind::Queen => {
            generate_sliding_moves(board, from, piece.color, &STRAIGHT_DIRS, &mut moves);
            generate_sliding_moves(board, from, piece.color, &DIAGONAL_DIRS, &mut moves);
        }
    }
    moves
}

/// Squares the piece on `from` attacks. Identical to `moves_for` except for
/// pawns, which attack both forward diagonals whether or not anything stands
/// there, and never attack the square they push to.
pub fn attack_targets(board: &Board, from: Coord) -> Vec<Coord> {
    match board.piece_at(from) {
        Some(p) if p.kind == PieceKind::Pawn => [-1, 1]
            .iter()
            .filter_map(|&dc| from.offset(p.color.forward(), dc))
            .filter(|&to| board.piece_at(to).map_or(true, |q| q.color != p.color))
            .collect(),
        Some(_) => moves_for(board, from, &RulesConfig::default()),
        None => Vec::new(),
    }
}

/// Union of the attacks of every `color` piece on the board. Not the plain
/// union of `moves_for`: pawns contribute their diagonals, not their pushes.
pub fn attacked_squares(board: &Board, color: Color) -> HashSet<Coord> {
    board
        .pieces(color)
        .flat_map(|(at, _)| attack_targets(board, at))
        .collect()
}

fn is_own(board: &Board, at: Coord, color: Color) -> bool {
    board.piece_at(at).map(|p| p.color == color).unwrap_or(false)
}

fn generate_pawn_moves(board: &Board, from: Coord, color: Color, rules: &RulesConfig, moves: &mut Vec<Coord>) {
    let dir = color.forward();

    if let Some(one) = from.offset(dir, 0) {
        if board.is_empty(one) {
            moves.push(one);
            if rules.pawn_double_step && from.row == color.pawn_rank() {
                if let Some(two) = one.offset(dir, 0) {
                    if board.is_empty(two) {
                        moves.push(two);
                    }
                }
            }
        }
    }

    // Diagonal moves are capture-only.
    for dc in [-1, 1] {
        if let Some(to) = from.offset(dir, dc) {
            if board.piece_at(to).map(|p| p.color != color).unwrap_or(false) {
                moves.push(to);
            }
        }
    }
}

fn generate_step_moves(board: &Board, from: Coord, color: Color, offsets: &[(i32, i32)], moves: &mut Vec<Coord>) {
    for &(dr, dc) in offsets {
        if let Some(to) = from.offset(dr, dc) {
            if !is_own(board, to, color) {
                moves.push(to);
            }
        }
    }
}

fn generate_sliding_moves(board: &Board, from: Coord, color: Color, directions: &[(i32, i32)], moves: &mut Vec<Coord>) {
    for &(dr, dc) in directions {
        let mut next = from.offset(dr, dc);
        while let Some(to) = next {
            if let Some(p) = board.piece_at(to) {
                if p.color != color {
                    moves.push(to);
                }
                break;
            }
            moves.push(to);
            next = to.offset(dr, dc);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(row: usize, col: usize) -> Coord {
        Coord { row, col }
    }

    fn sorted(mut v: Vec<Coord>) -> Vec<Coord> {
        v.sort();
        v
    }

    #[test]
    fn empty_square_has_no_moves() {
        let board = Board::new();
        assert!(moves_for(&board, at(4, 4), &RulesConfig::default()).is_empty());
        assert!(attack_targets(&board, at(4, 4)).is_empty());
    }

    #[test]
    fn opening_pawn_and_knight_moves() {
        let board = Board::new();
        let rules = RulesConfig::default();
        assert_eq!(sorted(moves_for(&board, at(1, 4), &rules)), vec![at(2, 4), at(3, 4)]);
        assert_eq!(sorted(moves_for(&board, at(0, 6), &rules)), vec![at(2, 5), at(2, 7)]);
        assert_eq!(sorted(moves_for(&board, at(6, 0), &rules)), vec![at(4, 0), at(5, 0)]);
        // Rooks, bishops, queen and king are boxed in.
        for col in [0, 2, 3, 4, 5, 7] {
            assert!(moves_for(&board, at(0, col), &rules).is_empty(), "col {col}");
        }
    }

    #[test]
    fn double_step_can_be_disabled() {
        let board = Board::new();
        let rules = RulesConfig { pawn_double_step: false, ..RulesConfig::default() };
        assert_eq!(moves_for(&board, at(1, 4), &rules), vec![at(2, 4)]);
    }

    #[test]
    fn blocked_pawn_cannot_jump() {
        let mut board = Board::new();
        board.put(2, 4, PieceKind::Knight, Color::Black);
        assert!(moves_for(&board, at(1, 4), &RulesConfig::default()).is_empty());

        let mut board = Board::new();
        board.put(3, 4, PieceKind::Knight, Color::Black);
        assert_eq!(moves_for(&board, at(1, 4), &RulesConfig::default()), vec![at(2, 4)]);
    }

    #[test]
    fn pawn_captures_only_diagonally_onto_opponents() {
        let mut board = Board::empty();
        board.put(3, 3, PieceKind::Pawn, Color::White);
        board.put(4, 3, PieceKind::Pawn, Color::Black);
        board.put(4, 4, PieceKind::Knight, Color::Black);
        board.put(4, 2, PieceKind::Knight, Color::White);
        assert_eq!(moves_for(&board, at(3, 3), &RulesConfig::default()), vec![at(4, 4)]);
        // Black pawns move down the board.
        assert_eq!(moves_for(&board, at(4, 3), &RulesConfig::default()), vec![]);
    }

    #[test]
    fn sliders_stop_at_first_piece() {
        let mut board = Board::empty();
        board.put(0, 0, PieceKind::Rook, Color::White);
        board.put(0, 3, PieceKind::Knight, Color::White);
        board.put(4, 0, PieceKind::Pawn, Color::Black);
        let moves = sorted(moves_for(&board, at(0, 0), &RulesConfig::default()));
        assert_eq!(moves, vec![at(0, 1), at(0, 2), at(1, 0), at(2, 0), at(3, 0), at(4, 0)]);
    }

    #[test]
    fn queen_combines_rook_and_bishop() {
        let mut board = Board::empty();
        board.put(3, 3, PieceKind::Queen, Color::White);
        assert_eq!(moves_for(&board, at(3, 3), &RulesConfig::default()).len(), 27);
    }

    #[test]
    fn pawn_attacks_differ_from_pawn_moves() {
        let mut board = Board::empty();
        board.put(1, 4, PieceKind::Pawn, Color::White);
        let attacks = sorted(attack_targets(&board, at(1, 4)));
        assert_eq!(attacks, vec![at(2, 3), at(2, 5)]);
        let attacked = attacked_squares(&board, Color::White);
        assert!(!attacked.contains(&at(2, 4)));
        assert!(!attacked.contains(&at(3, 4)));
    }

    #[test]
    fn attacked_squares_ignores_own_king_safety() {
        // The black rook is pinned to its king but still attacks along the file.
        let mut board = Board::empty();
        board.put(7, 4, PieceKind::King, Color::Black);
        board.put(6, 4, PieceKind::Rook, Color::Black);
        board.put(0, 4, PieceKind::Rook, Color::White);
        board.put(6, 0, PieceKind::Pawn, Color::White);
        let attacked = attacked_squares(&board, Color::Black);
        assert!(attacked.contains(&at(6, 0)));
    }

    #[test]
    fn generator_never_mutates() {
        let board = Board::new();
        let before = board.clone();
        for (from, _) in board.pieces(Color::White) {
            moves_for(&board, from, &RulesConfig::default());
        }
        attacked_squares(&board, Color::Black);
        assert_eq!(board, before);
    }
}
