// =============================================================================
// Turn Engine
//
// The click-driven state machine behind the board. A click either selects a
// piece (highlighting its king-safe destinations), commits a move or castle,
// swaps the selection for another own piece, or drops the selection. Every
// commit flips the turn exactly once and then decides whether the opponent is
// in check, checkmated or stalemated.
//
// All game state lives in `Game`. Illegal clicks never leave a partial
// mutation behind: moves are validated against the selection's target list
// before the board is touched.
// =============================================================================

use log::{debug, error, info};
use serde::{Deserialize, Serialize};

use crate::board::{Board, Coord, Shade};
use crate::castling::{evaluate_castle, BoardGeometry, CastlePlan, CastleSide, CastleVerdict, CastlingRights};
use crate::check::{can_escape_check, has_legal_move, in_check, legal_moves_for};
use crate::config::RulesConfig;
use crate::error::{EngineError, EngineResult};
use crate::piece::{code_of, Color, Piece, PieceKind};

/// The piece picked up by the side to move, with the destinations it was
/// allowed at selection time.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Selection {
    pub piece: Piece,
    pub from: Coord,
    pub targets: Vec<Coord>,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum GameResult {
    Checkmate { winner: Color },
    Stalemate,
}

impl GameResult {
    /// +1 White won, -1 Black won, 0 drawn.
    pub fn signed(self) -> i8 {
        match self {
            GameResult::Checkmate { winner } => winner.sign(),
            GameResult::Stalemate => 0,
        }
    }
}

/// What a click did.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing changed: not the mover's piece, empty square, or game over.
    Ignored,
    Selected,
    /// Another own piece replaced the selection.
    Reselected,
    /// The selection was dropped without moving.
    Deselected,
    Moved { captured: Option<Piece> },
    Castled(CastleSide),
}

impl ClickOutcome {
    pub fn is_commit(self) -> bool {
        matches!(self, ClickOutcome::Moved { .. } | ClickOutcome::Castled(_))
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Game {
    pub board: Board,
    pub current_turn: Color,
    pub selection: Option<Selection>,
    pub castling_rights: CastlingRights,
    /// White pieces taken by Black, in capture order.
    pub captured_white: Vec<Piece>,
    /// Black pieces taken by White, in capture order.
    pub captured_black: Vec<Piece>,
    /// Color in check after the last commit.
    pub check: Option<Color>,
    pub result: Option<GameResult>,
    pub config: RulesConfig,
    pub geometry: BoardGeometry,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::with_config(RulesConfig::default())
    }

    pub fn with_config(config: RulesConfig) -> Self {
        Self::from_board(Board::new(), config)
    }

    /// Start from an arbitrary position with White to move and untouched
    /// castling flags. Useful for setting up test positions.
    pub fn from_board(board: Board, config: RulesConfig) -> Self {
        Game {
            board,
            current_turn: Color::White,
            selection: None,
            castling_rights: CastlingRights::default(),
            captured_white: Vec::new(),
            captured_black: Vec::new(),
            check: None,
            result: None,
            config,
            geometry: BoardGeometry::default(),
        }
    }

    /// Throw away the whole game and start again from the initial position.
    /// Only the rules configuration carries over.
    pub fn new_game(&mut self) {
        info!("new game");
        *self = Game::with_config(self.config.clone());
    }

    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// King-safe destinations for the piece on `at`, whoever owns it.
    pub fn legal_moves_for(&self, at: Coord) -> EngineResult<Vec<Coord>> {
        legal_moves_for(&self.board, at, &self.config)
    }

    pub fn click_at(&mut self, row: usize, col: usize) -> EngineResult<ClickOutcome> {
        let at = Coord::new(row, col).ok_or(EngineError::OutOfBounds { row, col })?;
        self.click(at)
    }

    pub fn click(&mut self, at: Coord) -> EngineResult<ClickOutcome> {
        if self.result.is_some() {
            debug!("click on {at:?} ignored: game is over");
            return Ok(ClickOutcome::Ignored);
        }
        let outcome = match self.selection.take() {
            None => self.click_without_selection(at),
            Some(selection) => self.click_with_selection(selection, at),
        };
        if let Err(e) = &outcome {
            error!("rules engine invariant violated: {e}");
        }
        outcome
    }

    fn click_without_selection(&mut self, at: Coord) -> EngineResult<ClickOutcome> {
        match self.board.piece_at(at) {
            Some(p) if p.color == self.current_turn => {
                self.select(p, at)?;
                Ok(ClickOutcome::Selected)
            }
            _ => Ok(ClickOutcome::Ignored),
        }
    }

    fn click_with_selection(&mut self, selection: Selection, at: Coord) -> EngineResult<ClickOutcome> {
        let clicked = self.board.piece_at(at);
        let mover = selection.piece.color;

        if selection.piece.kind == PieceKind::King && clicked == Some(Piece::new(PieceKind::Rook, mover)) {
            let verdict = evaluate_castle(
                &self.board,
                mover,
                selection.from,
                at,
                &self.castling_rights,
                &self.geometry,
            )?;
            match verdict {
                CastleVerdict::Legal(plan) => {
                    self.commit_castle(plan)?;
                    return Ok(ClickOutcome::Castled(plan.side));
                }
                CastleVerdict::Rejected(reason) => debug!("{mover:?} castle refused: {reason:?}"),
            }
        }

        if selection.targets.contains(&at) {
            let captured = self.commit_move(selection.piece, selection.from, at)?;
            return Ok(ClickOutcome::Moved { captured });
        }

        self.board.restore_colors();
        match clicked {
            Some(p) if p.color == mover && at != selection.from => {
                self.select(p, at)?;
                Ok(ClickOutcome::Reselected)
            }
            _ => {
                debug!("{:?} on {:?} cannot go to {at:?}; selection dropped", selection.piece.kind, selection.from);
                Ok(ClickOutcome::Deselected)
            }
        }
    }

    fn select(&mut self, piece: Piece, from: Coord) -> EngineResult<()> {
        let targets = self.legal_moves_for(from)?;
        self.board.restore_colors();
        self.board.highlight(&targets);
        self.selection = Some(Selection { piece, from, targets });
        Ok(())
    }

    fn commit_move(&mut self, piece: Piece, from: Coord, to: Coord) -> EngineResult<Option<Piece>> {
        self.board.restore_colors();
        let captured = self.board.move_piece(from, to);

        if let Some(taken) = captured {
            match taken.color {
                Color::White => self.captured_white.push(taken),
                Color::Black => self.captured_black.push(taken),
            }
            self.castling_rights.note_capture(taken, to, &self.geometry);
        }
        self.castling_rights.note_departure(piece, from, &self.geometry);

        if piece.kind == PieceKind::Pawn && to.row == piece.color.last_rank() {
            if let Some(promoted) = self.config.promotion {
                let kind = promoted.kind();
                self.board.set_piece(to, Some(Piece::new(kind, piece.color)));
                info!("{:?} pawn promoted to {kind:?} on {to:?}", piece.color);
            }
        }

        info!("{:?} {:?} {from:?} -> {to:?}{}", piece.color, piece.kind, captured.map(|c| format!(" takes {:?}", c.kind)).unwrap_or_default());
        self.finish_turn()?;
        Ok(captured)
    }

    fn commit_castle(&mut self, plan: CastlePlan) -> EngineResult<()> {
        self.board.restore_colors();
        plan.execute(&mut self.board);
        self.castling_rights.record_castle(plan.color, plan.side);
        info!("{:?} castles {:?}", plan.color, plan.side);
        self.finish_turn()
    }

    /// Hand the move to the opponent and decide check, mate and stalemate.
    fn finish_turn(&mut self) -> EngineResult<()> {
        let mover = self.current_turn;
        let opponent = mover.opposite();
        self.current_turn = opponent;

        if in_check(&self.board, opponent)? {
            self.check = Some(opponent);
            if !can_escape_check(&self.board, opponent, &self.config)? {
                info!("checkmate: {mover:?} wins");
                self.result = Some(GameResult::Checkmate { winner: mover });
            } else {
                info!("{opponent:?} is in check");
            }
        } else {
            self.check = None;
            if self.config.detect_stalemate && !has_legal_move(&self.board, opponent, &self.config)? {
                info!("stalemate: {opponent:?} has no legal move");
                self.result = Some(GameResult::Stalemate);
            }
        }
        Ok(())
    }

    /// Everything the board UI renders.
    pub fn snapshot(&self) -> GameView {
        GameView::from(self)
    }
}

#[derive(Clone, Serialize, Debug, PartialEq, Eq)]
pub struct SquareView {
    pub piece: i8,
    pub shade: Shade,
    pub row: usize,
    pub col: usize,
}

#[derive(Clone, Serialize, Debug, PartialEq, Eq)]
pub struct SelectionView {
    pub piece: i8,
    pub from: [usize; 2],
    pub targets: Vec<[usize; 2]>,
}

/// Outbound view of a game: signed piece codes throughout, `result` is +1
/// when White has won, -1 when Black has won.
#[derive(Clone, Serialize, Debug, PartialEq, Eq)]
pub struct GameView {
    pub squares: Vec<Vec<SquareView>>,
    pub white_to_move: bool,
    pub selection: Option<SelectionView>,
    pub captured_white: Vec<i8>,
    pub captured_black: Vec<i8>,
    pub in_check: bool,
    pub check: Option<i8>,
    pub result: Option<i8>,
    pub stalemate: bool,
    pub white_castling: [bool; 3],
    pub black_castling: [bool; 3],
}

impl From<&Game> for GameView {
    fn from(game: &Game) -> Self {
        let squares = game
            .board
            .squares
            .iter()
            .map(|rank| {
                rank.iter()
                    .map(|sq| SquareView {
                        piece: code_of(sq.piece),
                        shade: sq.shade,
                        row: sq.row,
                        col: sq.col,
                    })
                    .collect()
            })
            .collect();

        let winner = match game.result {
            Some(GameResult::Checkmate { winner }) => Some(winner.sign()),
            _ => None,
        };

        GameView {
            squares,
            white_to_move: game.current_turn == Color::White,
            selection: game.selection.as_ref().map(|s| SelectionView {
                piece: s.piece.code(),
                from: [s.from.row, s.from.col],
                targets: s.targets.iter().map(|t| [t.row, t.col]).collect(),
            }),
            captured_white: game.captured_white.iter().map(|p| p.code()).collect(),
            captured_black: game.captured_black.iter().map(|p| p.code()).collect(),
            in_check: game.check.is_some(),
            check: game.check.map(Color::sign),
            result: winner,
            stalemate: game.result == Some(GameResult::Stalemate),
            white_castling: game.castling_rights.white.as_array(),
            black_castling: game.castling_rights.black.as_array(),
        }
    }
}
