use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// +1 for White, -1 for Black. Multiplied into piece codes and results.
    pub fn sign(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Row pawns of this color advance by.
    pub fn forward(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub fn back_rank(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    pub fn pawn_rank(self) -> usize {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Rank a pawn of this color promotes on.
    pub fn last_rank(self) -> usize {
        self.opposite().back_rank()
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Magnitude of the signed piece code.
    pub fn code(self) -> i8 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 4,
            PieceKind::Rook => 6,
            PieceKind::King => 8,
            PieceKind::Queen => 9,
        }
    }

    pub fn from_code(magnitude: i8) -> Option<PieceKind> {
        match magnitude {
            1 => Some(PieceKind::Pawn),
            3 => Some(PieceKind::Knight),
            4 => Some(PieceKind::Bishop),
            6 => Some(PieceKind::Rook),
            8 => Some(PieceKind::King),
            9 => Some(PieceKind::Queen),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Piece { kind, color }
    }

    /// Signed code: positive for White, negative for Black.
    pub fn code(self) -> i8 {
        self.kind.code() * self.color.sign()
    }

    /// Decode a signed piece code. `0` and unknown magnitudes yield `None`.
    pub fn from_code(code: i8) -> Option<Piece> {
        let color = match code.signum() {
            1 => Color::White,
            -1 => Color::Black,
            _ => return None,
        };
        PieceKind::from_code(code.saturating_abs()).map(|kind| Piece::new(kind, color))
    }
}

/// Signed code for an optional square occupant (`0` when empty).
pub fn code_of(piece: Option<Piece>) -> i8 {
    piece.map(Piece::code).unwrap_or(0)
}
