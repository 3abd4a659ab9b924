use serde::{Deserialize, Serialize};

use crate::piece::PieceKind;

/// Pieces a pawn may turn into. Kings and pawns are not among them, so a
/// promotion can never put a second king on the board.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub enum PromotionPiece {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl PromotionPiece {
    pub fn kind(self) -> PieceKind {
        match self {
            PromotionPiece::Queen => PieceKind::Queen,
            PromotionPiece::Rook => PieceKind::Rook,
            PromotionPiece::Bishop => PieceKind::Bishop,
            PromotionPiece::Knight => PieceKind::Knight,
        }
    }
}

/// Rule switches for a game. Every field has a default, so a partial JSON
/// object (or `{}`) is a valid configuration.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct RulesConfig {
    /// Pawns on their starting rank may advance two empty squares.
    pub pawn_double_step: bool,
    /// Piece a pawn becomes on the last rank. `None` leaves it a pawn,
    /// which then has no forward moves.
    pub promotion: Option<PromotionPiece>,
    /// End the game as a draw when the side to move is not in check and has
    /// no legal move.
    pub detect_stalemate: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesConfig {
    pub fn new() -> Self {
        RulesConfig {
            pawn_double_step: true,
            promotion: Some(PromotionPiece::Queen),
            detect_stalemate: true,
        }
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = RulesConfig::from_json("{}").unwrap();
        assert_eq!(config, RulesConfig::new());
    }

    #[test]
    fn partial_object_overrides_only_named_fields() {
        let config = RulesConfig::from_json(r#"{"detect_stalemate": false, "promotion": "Knight"}"#).unwrap();
        assert!(config.pawn_double_step);
        assert!(!config.detect_stalemate);
        assert_eq!(config.promotion, Some(PromotionPiece::Knight));
        assert_eq!(config.promotion.map(PromotionPiece::kind), Some(PieceKind::Knight));
    }

    #[test]
    fn null_promotion_disables_it() {
        let config = RulesConfig::from_json(r#"{"promotion": null}"#).unwrap();
        assert_eq!(config.promotion, None);
    }

    #[test]
    fn king_and_pawn_are_not_promotion_targets() {
        assert!(RulesConfig::from_json(r#"{"promotion": "King"}"#).is_err());
        assert!(RulesConfig::from_json(r#"{"promotion": "Pawn"}"#).is_err());
        assert!(RulesConfig::from_json(r#"{"promotion": "Rook"}"#).is_ok());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(RulesConfig::from_json("{ pawn_double_step: yes }").is_err());
    }
}
