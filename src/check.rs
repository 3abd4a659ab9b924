use crate::board::{Board, Coord};
use crate::config::RulesConfig;
use crate::error::{EngineError, EngineResult};
use crate::moves::{attacked_squares, moves_for};
use crate::piece::Color;

/// Whether `color`'s king stands on a square the opponent attacks.
///
/// A board without that king is corrupt; it is reported as an error rather
/// than treated as "not in check".
pub fn in_check(board: &Board, color: Color) -> EngineResult<bool> {
    let king = board.find_king(color).ok_or(EngineError::KingNotFound(color))?;
    Ok(attacked_squares(board, color.opposite()).contains(&king))
}

/// `moves_for` minus every destination that would leave the mover's own king
/// in check.
pub fn legal_moves_for(board: &Board, from: Coord, rules: &RulesConfig) -> EngineResult<Vec<Coord>> {
    let color = match board.piece_at(from) {
        Some(p) => p.color,
        None => return Ok(Vec::new()),
    };
    let mut legal = Vec::new();
    for to in moves_for(board, from, rules) {
        if !in_check(&board.with_move(from, to), color)? {
            legal.push(to);
        }
    }
    Ok(legal)
}

/// Whether `color` has at least one move that leaves its king safe. Stops at
/// the first one found.
pub fn has_legal_move(board: &Board, color: Color, rules: &RulesConfig) -> EngineResult<bool> {
    for (from, _) in board.pieces(color) {
        for to in moves_for(board, from, rules) {
            if !in_check(&board.with_move(from, to), color)? {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// For a `color` already in check: can any move get the king out of it?
/// `false` means checkmate.
pub fn can_escape_check(board: &Board, color: Color, rules: &RulesConfig) -> EngineResult<bool> {
    has_legal_move(board, color, rules)
}
