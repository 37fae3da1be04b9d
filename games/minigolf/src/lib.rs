use wasm_bindgen::prelude::*;
use putt_engine::*;

pub mod aim;
pub mod ball;
pub mod drag;
pub mod game;
pub mod goal;
pub mod level;
mod levels;
pub mod session;
pub mod tuning;

use game::MiniGolf;
use level::LevelSet;
use tuning::Tuning;

putt_web::export_game!(MiniGolf, "minigolf");

/// Replace the course with a JSON array of level records.
/// Bad data is logged and the current course is kept.
#[wasm_bindgen]
pub fn game_load_levels(json: &str) {
    match LevelSet::from_json(json) {
        Ok(levels) => with_runner(|r| {
            let (game, ctx) = r.game_mut();
            game.set_levels(ctx, levels);
        }),
        Err(err) => log::error!("level data rejected: {}", err),
    }
}

/// Override gameplay constants; fields left out keep their defaults.
/// Malformed or out-of-range values are logged and the current tuning is kept.
#[wasm_bindgen]
pub fn game_load_tuning(json: &str) {
    let applied = Tuning::from_json(json).and_then(|tuning| {
        with_runner(|r| {
            let (game, ctx) = r.game_mut();
            game.set_tuning(ctx, tuning)
        })
    });
    if let Err(err) = applied {
        log::error!("tuning rejected: {}", err);
    }
}
