use chessboard::board::Coord;
use chessboard::engine::{ClickOutcome, Game, GameResult};
use chessboard::error::EngineResult;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

const MAX_PLIES: u32 = 300;
/// Share of clicks that land on a random square instead of a legal move.
const NOISE: f64 = 0.2;

#[derive(Serialize)]
struct GameSummary {
    game: usize,
    plies: u32,
    clicks: u32,
    result: Option<i8>,
    stalemate: bool,
    captured_white: usize,
    captured_black: usize,
}

/// Play one game through the click interface: the side to move picks a random
/// piece that has somewhere to go and a random destination for it, with some
/// random misclicks mixed in.
fn play_game(rng: &mut StdRng) -> EngineResult<(Game, u32, u32)> {
    let mut game = Game::new();
    let mut plies = 0;
    let mut clicks = 0;

    while !game.is_over() && plies < MAX_PLIES {
        if rng.gen_bool(NOISE) {
            let row = rng.gen_range(0..8);
            let col = rng.gen_range(0..8);
            clicks += 1;
            if game.click_at(row, col)?.is_commit() {
                plies += 1;
            }
            continue;
        }

        // Drop any pending selection before choosing a fresh move.
        if let Some(sel) = game.selection.clone() {
            clicks += 1;
            game.click(sel.from)?;
        }

        let mut movable = Vec::new();
        for (from, _) in game.board.pieces(game.current_turn) {
            let targets = game.legal_moves_for(from)?;
            if !targets.is_empty() {
                movable.push((from, targets));
            }
        }
        let Some((from, targets)) = movable.choose(rng) else {
            warn!("side to move has no legal move but the game is not over");
            break;
        };
        let to: Coord = *targets.choose(rng).unwrap_or(from);

        clicks += 2;
        game.click(*from)?;
        if let ClickOutcome::Moved { .. } = game.click(to)? {
            plies += 1;
        }
    }
    Ok((game, plies, clicks))
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let games: usize = args.next().and_then(|a| a.parse().ok()).unwrap_or(10);
    let seed: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(1);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut decided = 0;
    for n in 0..games {
        match play_game(&mut rng) {
            Ok((game, plies, clicks)) => {
                if matches!(game.result, Some(GameResult::Checkmate { .. })) {
                    decided += 1;
                }
                let summary = GameSummary {
                    game: n,
                    plies,
                    clicks,
                    result: game.result.map(GameResult::signed),
                    stalemate: game.result == Some(GameResult::Stalemate),
                    captured_white: game.captured_white.len(),
                    captured_black: game.captured_black.len(),
                };
                match serde_json::to_string(&summary) {
                    Ok(line) => println!("{line}"),
                    Err(e) => warn!("could not encode summary: {e}"),
                }
            }
            Err(e) => {
                eprintln!("game {n} aborted: {e}");
                std::process::exit(1);
            }
        }
    }
    info!("{decided} of {games} games ended in checkmate (seed {seed})");
}
