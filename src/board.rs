use serde::{Deserialize, Serialize};

use crate::piece::{Color, Piece, PieceKind};

pub const BOARD_SIZE: usize = 8;

/// A square's coordinates. Row 0 = rank 1 (White's back rank), col 0 = file a.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Option<Coord> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Coord { row, col })
        } else {
            None
        }
    }

    /// Step by a signed row/col delta, `None` when it leaves the board.
    pub fn offset(self, dr: i32, dc: i32) -> Option<Coord> {
        let r = self.row as i32 + dr;
        let c = self.col as i32 + dc;
        if Board::in_bounds(r, c) {
            Some(Coord { row: r as usize, col: c as usize })
        } else {
            None
        }
    }
}

/// Display state of a square. Highlight marks a legal destination of the
/// current selection.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Shade {
    Light,
    Dark,
    Highlight,
}

impl Shade {
    /// a1 is dark; colors alternate along ranks and files.
    pub fn original(row: usize, col: usize) -> Shade {
        if (row + col) % 2 == 0 {
            Shade::Dark
        } else {
            Shade::Light
        }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Square {
    pub piece: Option<Piece>,
    pub shade: Shade,
    pub row: usize,
    pub col: usize,
}

impl Square {
    fn blank(row: usize, col: usize) -> Square {
        Square {
            piece: None,
            shade: Shade::original(row, col),
            row,
            col,
        }
    }

    pub fn coord(&self) -> Coord {
        Coord { row: self.row, col: self.col }
    }

    pub fn is_highlighted(&self) -> bool {
        self.shade == Shade::Highlight
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Board {
    pub squares: [[Square; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

const BACK_RANK: [PieceKind; BOARD_SIZE] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    /// Create an empty board with no pieces. Useful for setting up test positions.
    pub fn empty() -> Self {
        let squares = std::array::from_fn(|r| std::array::from_fn(|c| Square::blank(r, c)));
        Board { squares }
    }

    pub fn new() -> Self {
        let mut board = Board::empty();
        for color in [Color::White, Color::Black] {
            for (col, kind) in BACK_RANK.iter().enumerate() {
                board.squares[color.back_rank()][col].piece = Some(Piece::new(*kind, color));
            }
            for sq in &mut board.squares[color.pawn_rank()] {
                sq.piece = Some(Piece::new(PieceKind::Pawn, color));
            }
        }
        board
    }

    pub(crate) fn in_bounds(row: i32, col: i32) -> bool {
        (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
    }

    pub fn square(&self, at: Coord) -> &Square {
        &self.squares[at.row][at.col]
    }

    pub fn piece_at(&self, at: Coord) -> Option<Piece> {
        self.squares[at.row][at.col].piece
    }

    pub fn is_empty(&self, at: Coord) -> bool {
        self.piece_at(at).is_none()
    }

    pub fn set_piece(&mut self, at: Coord, piece: Option<Piece>) {
        self.squares[at.row][at.col].piece = piece;
    }

    /// Place a piece; shorthand for setting up positions.
    pub fn put(&mut self, row: usize, col: usize, kind: PieceKind, color: Color) {
        self.squares[row][col].piece = Some(Piece::new(kind, color));
    }

    /// Every occupied square holding a piece of `color`, rank by rank.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.squares
            .iter()
            .flatten()
            .filter_map(move |sq| match sq.piece {
                Some(p) if p.color == color => Some((sq.coord(), p)),
                _ => None,
            })
    }

    pub fn find_king(&self, color: Color) -> Option<Coord> {
        self.pieces(color)
            .find(|(_, p)| p.kind == PieceKind::King)
            .map(|(at, _)| at)
    }

    /// Relocate a piece, replacing whatever stood on `to`. Returns the
    /// replaced piece.
    pub fn move_piece(&mut self, from: Coord, to: Coord) -> Option<Piece> {
        let moving = self.piece_at(from);
        let taken = self.piece_at(to);
        self.set_piece(to, moving);
        self.set_piece(from, None);
        taken
    }

    /// Scratch copy with the move played. `self` is untouched.
    pub fn with_move(&self, from: Coord, to: Coord) -> Board {
        let mut scratch = self.clone();
        scratch.move_piece(from, to);
        scratch
    }

    pub fn highlight(&mut self, targets: &[Coord]) {
        for t in targets {
            self.squares[t.row][t.col].shade = Shade::Highlight;
        }
    }

    /// Put every square back to its original shade without touching pieces.
    pub fn restore_colors(&mut self) {
        for sq in self.squares.iter_mut().flatten() {
            sq.shade = Shade::original(sq.row, sq.col);
        }
    }
}
