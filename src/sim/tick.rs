//! Per-tick input and the tick driver
//!
//! The host polls its devices, packs what happened into a `TickInput`, and
//! calls `tick` with the elapsed time. Input is handled before the update,
//! the same order every tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::lane::ObstacleKind;
use super::screen::{Game, Screen};

/// Keys the game can bind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Q,
    W,
    E,
    R,
    A,
    S,
    D,
    Space,
    Escape,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Keys currently held
    pub keys_down: Vec<Key>,
    /// Current pointer position, if the host has one
    pub pointer: Option<Vec2>,
    /// Pointer/touch presses that began this tick, in screen coordinates
    pub pointer_presses: Vec<Vec2>,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// A hazard this far ahead of the character (px) triggers an autopilot jump
const AUTOPILOT_WINDOW: std::ops::Range<f32> = 70.0..110.0;

/// Advance the game by `dt` seconds
pub fn tick(game: &mut Game, input: &TickInput, dt: f32) {
    if let Some(point) = input.pointer {
        game.pointer_moved(point);
    }
    for &point in &input.pointer_presses {
        game.pointer_pressed(point);
    }
    for &key in &input.keys_down {
        game.key_pressed(key);
    }
    if input.idle_mode {
        autopilot(game);
    }
    game.update(dt);
}

/// Press play on menus; in play, hop over hazards as they come in
fn autopilot(game: &mut Game) {
    match game.screen() {
        Screen::Menu | Screen::EndGame { .. } => {
            let button = game.button_position();
            game.pointer_pressed(button);
        }
        Screen::Gameplay => {
            let state = game.state_mut();
            let to_jump: Vec<usize> = state
                .lanes()
                .iter()
                .filter(|lane| !lane.game_over && !lane.is_jumping())
                .filter(|lane| {
                    let x = lane.character.position.x;
                    lane.obstacles().iter().any(|o| {
                        o.kind == ObstacleKind::Hazard
                            && o.entity.active
                            && AUTOPILOT_WINDOW.contains(&(o.entity.position.x - x))
                    })
                })
                .map(|lane| lane.index())
                .collect();
            for index in to_jump {
                state.jump_lane(index);
            }
        }
    }
}
