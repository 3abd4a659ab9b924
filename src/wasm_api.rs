use std::sync::Once;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::board::Coord;
use crate::config::RulesConfig;
use crate::engine::{ClickOutcome, Game, GameView};

static INIT: Once = Once::new();

fn init_once() {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    });
}

#[derive(Serialize)]
struct ClickResult {
    #[serde(flatten)]
    board_state: Option<GameView>,
    outcome: Option<ClickOutcome>,
    error: Option<String>,
}

#[derive(Serialize)]
struct SquareMoveJson {
    to: [usize; 2],
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

fn error_result(message: String) -> JsValue {
    to_js(&ClickResult {
        board_state: None,
        outcome: None,
        error: Some(message),
    })
}

#[wasm_bindgen]
pub struct ChessBoard {
    game: Game,
}

#[wasm_bindgen]
impl ChessBoard {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ChessBoard {
        init_once();
        ChessBoard { game: Game::new() }
    }

    /// Build a board with rule switches from a JS object, e.g.
    /// `{ detect_stalemate: false, promotion: "Knight" }`.
    pub fn with_config(config: JsValue) -> Result<ChessBoard, JsValue> {
        init_once();
        let config: RulesConfig = if config.is_undefined() || config.is_null() {
            RulesConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        Ok(ChessBoard { game: Game::with_config(config) })
    }

    pub fn get_board_state(&self) -> JsValue {
        to_js(&self.game.snapshot())
    }

    /// Feed one square click. Returns the new board state together with what
    /// the click did, or `{ error }` when the engine's invariants broke.
    pub fn click(&mut self, row: usize, col: usize) -> JsValue {
        match self.game.click_at(row, col) {
            Ok(outcome) => to_js(&ClickResult {
                board_state: Some(self.game.snapshot()),
                outcome: Some(outcome),
                error: None,
            }),
            Err(e) => error_result(e.to_string()),
        }
    }

    pub fn get_legal_moves_for_square(&self, row: usize, col: usize) -> JsValue {
        let Some(at) = Coord::new(row, col) else {
            return error_result(format!("square ({row}, {col}) is off the board"));
        };
        match self.game.legal_moves_for(at) {
            Ok(moves) => {
                let square_moves: Vec<SquareMoveJson> =
                    moves.iter().map(|m| SquareMoveJson { to: [m.row, m.col] }).collect();
                to_js(&square_moves)
            }
            Err(e) => error_result(e.to_string()),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.game.is_over()
    }

    /// Discard the current game and set up the initial position again.
    pub fn new_game(&mut self) -> JsValue {
        self.game.new_game();
        self.get_board_state()
    }

    pub fn build_timestamp() -> String {
        env!("BUILD_TIMESTAMP").to_string()
    }
}

impl Default for ChessBoard {
    fn default() -> Self {
        Self::new()
    }
}
