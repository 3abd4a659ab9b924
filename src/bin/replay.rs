use std::io::Read;

use chessboard::config::RulesConfig;
use chessboard::engine::Game;
use log::{debug, info};
use serde::Deserialize;

/// A click script: `{ "config": { ... }, "clicks": [[1, 4], [3, 4], ...] }`.
#[derive(Deserialize)]
struct Script {
    #[serde(default)]
    config: RulesConfig,
    clicks: Vec<[usize; 2]>,
}

fn run(source: &str) -> Result<String, Box<dyn std::error::Error>> {
    let script: Script = serde_json::from_str(source)?;
    let mut game = Game::with_config(script.config);
    for [row, col] in script.clicks {
        let outcome = game.click_at(row, col)?;
        debug!("({row}, {col}) -> {outcome:?}");
    }
    info!("replayed to {:?} to move, result {:?}", game.current_turn, game.result);
    Ok(serde_json::to_string_pretty(&game.snapshot())?)
}

fn main() {
    env_logger::init();

    let source = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path).map_err(|e| format!("{path}: {e}")),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).map(|_| buf).map_err(|e| e.to_string())
        }
    };

    match source.map_err(Box::<dyn std::error::Error>::from).and_then(|s| run(&s)) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("replay failed: {e}");
            std::process::exit(1);
        }
    }
}
