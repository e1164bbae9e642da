//! Lane Runner - a three-lane endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, behaviours, lanes, run flow)
//! - `renderer`: Abstract draw requests handed to an external backend
//! - `audio`: Named sound triggers resolved by an external sound player
//! - `assets`: Texture handles supplied by the host application
//! - `settings`: Data-driven game tuning

pub mod assets;
pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use assets::{AssetHandles, TextureId, TextureInfo};
pub use audio::{SoundEffect, SoundRequest};
pub use renderer::{DrawCommand, DrawList};
pub use settings::Settings;

use rand_pcg::Pcg32;

/// The one random source used by the simulation
pub type SimRng = Pcg32;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the native driver (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Logical screen dimensions (portrait)
    pub const SCREEN_WIDTH: f32 = 480.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;

    /// Radius an entity gets when nobody sets one
    pub const DEFAULT_RADIUS: f32 = 50.0;

    /// Menu / end-of-run button
    pub const BUTTON_RADIUS: f32 = 50.0;
}
