// =============================================================================
// Castling
//
// Castling is requested by selecting the king and then clicking one of its own
// rooks. The rook's side is decided by which file it stands on, not by its
// distance from the king, so the geometry lives in one place (BoardGeometry).
//
// The evaluator only decides. Executing a plan and the turn/game-end
// bookkeeping that follows belong to the turn engine.
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::board::{Board, Coord};
use crate::check::in_check;
use crate::error::EngineResult;
use crate::moves::attacked_squares;
use crate::piece::{Color, Piece, PieceKind};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum CastleSide {
    /// Towards the h-file.
    Short,
    /// Towards the a-file.
    Long,
}

/// Home files of the castling pieces.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct BoardGeometry {
    pub king_file: usize,
    pub short_rook_file: usize,
    pub long_rook_file: usize,
}

impl Default for BoardGeometry {
    fn default() -> Self {
        BoardGeometry {
            king_file: 4,
            short_rook_file: 7,
            long_rook_file: 0,
        }
    }
}

impl BoardGeometry {
    pub fn side_of_rook(&self, rook_file: usize) -> Option<CastleSide> {
        if rook_file == self.short_rook_file {
            Some(CastleSide::Short)
        } else if rook_file == self.long_rook_file {
            Some(CastleSide::Long)
        } else {
            None
        }
    }

    pub fn rook_file(&self, side: CastleSide) -> usize {
        match side {
            CastleSide::Short => self.short_rook_file,
            CastleSide::Long => self.long_rook_file,
        }
    }

    /// King moves two files toward the rook; the rook lands on the file the
    /// king crossed.
    fn destinations(&self, side: CastleSide) -> (usize, usize) {
        let dir: i32 = if self.rook_file(side) > self.king_file { 1 } else { -1 };
        let king_to = self.king_file as i32 + 2 * dir;
        (king_to as usize, (king_to - dir) as usize)
    }
}

/// Has-moved flags for one color. Once set they stay set for the game.
#[derive(Clone, Copy, Default, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct MovedFlags {
    pub king: bool,
    pub short_rook: bool,
    pub long_rook: bool,
}

impl MovedFlags {
    /// `[king_moved, short_rook_moved, long_rook_moved]`
    pub fn as_array(&self) -> [bool; 3] {
        [self.king, self.short_rook, self.long_rook]
    }

    pub fn rook(&self, side: CastleSide) -> bool {
        match side {
            CastleSide::Short => self.short_rook,
            CastleSide::Long => self.long_rook,
        }
    }

    fn mark_rook(&mut self, side: CastleSide) {
        match side {
            CastleSide::Short => self.short_rook = true,
            CastleSide::Long => self.long_rook = true,
        }
    }
}

#[derive(Clone, Copy, Default, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    pub white: MovedFlags,
    pub black: MovedFlags,
}

impl CastlingRights {
    pub fn flags(&self, color: Color) -> &MovedFlags {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    fn flags_mut(&mut self, color: Color) -> &mut MovedFlags {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    /// Record that `piece` left `from`. Only kings and rooks leaving their
    /// home squares matter.
    pub fn note_departure(&mut self, piece: Piece, from: Coord, geometry: &BoardGeometry) {
        let home_rank = piece.color.back_rank();
        match piece.kind {
            PieceKind::King => self.flags_mut(piece.color).king = true,
            PieceKind::Rook if from.row == home_rank => {
                if let Some(side) = geometry.side_of_rook(from.col) {
                    self.flags_mut(piece.color).mark_rook(side);
                }
            }
            _ => {}
        }
    }

    /// A rook taken on its home square can never castle either.
    pub fn note_capture(&mut self, taken: Piece, at: Coord, geometry: &BoardGeometry) {
        if taken.kind == PieceKind::Rook {
            self.note_departure(taken, at, geometry);
        }
    }

    pub fn record_castle(&mut self, color: Color, side: CastleSide) {
        let flags = self.flags_mut(color);
        flags.king = true;
        flags.mark_rook(side);
    }
}

/// Why a castle was refused.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum CastleRejection {
    KingInCheck,
    /// King or rook is not on a castling home square.
    NotHomeSquare,
    KingMoved,
    RookMoved,
    PathBlocked,
    PathAttacked,
}

/// Where the king and rook go when a castle is executed.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct CastlePlan {
    pub color: Color,
    pub side: CastleSide,
    pub king_from: Coord,
    pub king_to: Coord,
    pub rook_from: Coord,
    pub rook_to: Coord,
}

impl CastlePlan {
    pub fn execute(&self, board: &mut Board) {
        board.move_piece(self.king_from, self.king_to);
        board.move_piece(self.rook_from, self.rook_to);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastleVerdict {
    Legal(CastlePlan),
    Rejected(CastleRejection),
}

/// Decide whether the `color` king on `king_at` may castle with the rook on
/// `rook_at`. Never mutates anything.
pub fn evaluate_castle(
    board: &Board,
    color: Color,
    king_at: Coord,
    rook_at: Coord,
    rights: &CastlingRights,
    geometry: &BoardGeometry,
) -> EngineResult<CastleVerdict> {
    use CastleRejection::*;

    if in_check(board, color)? {
        return Ok(CastleVerdict::Rejected(KingInCheck));
    }

    let home_rank = color.back_rank();
    let side = match geometry.side_of_rook(rook_at.col) {
        Some(side) if king_at.row == home_rank && rook_at.row == home_rank && king_at.col == geometry.king_file => side,
        _ => return Ok(CastleVerdict::Rejected(NotHomeSquare)),
    };

    let flags = rights.flags(color);
    if flags.king {
        return Ok(CastleVerdict::Rejected(KingMoved));
    }
    if flags.rook(side) {
        return Ok(CastleVerdict::Rejected(RookMoved));
    }

    let (lo, hi) = if king_at.col < rook_at.col {
        (king_at.col, rook_at.col)
    } else {
        (rook_at.col, king_at.col)
    };
    let between: Vec<Coord> = (lo + 1..hi).map(|col| Coord { row: home_rank, col }).collect();

    if between.iter().any(|&sq| !board.is_empty(sq)) {
        return Ok(CastleVerdict::Rejected(PathBlocked));
    }

    let attacked = attacked_squares(board, color.opposite());
    if between.iter().any(|sq| attacked.contains(sq)) {
        return Ok(CastleVerdict::Rejected(PathAttacked));
    }

    let (king_file, rook_file) = geometry.destinations(side);
    Ok(CastleVerdict::Legal(CastlePlan {
        color,
        side,
        king_from: king_at,
        king_to: Coord { row: home_rank, col: king_file },
        rook_from: rook_at,
        rook_to: Coord { row: home_rank, col: rook_file },
    }))
}
