//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time advances only through `dt` passed in by the caller
//! - Seeded RNG only, threaded through every update
//! - Stable iteration order (lanes by index, entities by insertion)
//! - No rendering or platform dependencies; output is a `DrawList` and events

pub mod behaviour;
pub mod entity;
pub mod factory;
pub mod lane;
pub mod particles;
pub mod screen;
pub mod state;
pub mod tick;

pub use behaviour::{ApplyHook, Behaviour, Channel, FinishAction, HorizontalDrift, Interpolation, Jump};
pub use entity::{Entity, UpdateReport};
pub use lane::{Lane, Layer, Obstacle, ObstacleKind};
pub use particles::{EmitParticles, ParticleSystem};
pub use screen::{FrameOutput, Game, Screen};
pub use state::{GameEvent, GameState};
pub use tick::{Key, TickInput, tick};
