//! Sound triggers
//!
//! The simulation never plays audio. It names the effect it wants and the
//! host resolves the name to a loaded sound.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Character ran into a hazard
    Hit,
    /// Collectible picked up
    PickUp,
    /// Character left the ground
    Jump,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Hit => "hit",
            SoundEffect::PickUp => "pickup",
            SoundEffect::Jump => "jump",
        }
    }
}

/// A sound the host should play, with the volume already resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundRequest {
    pub effect: SoundEffect,
    pub volume: f32,
}

/// Volume controls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute all audio
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl AudioSettings {
    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0)
        }
    }

    /// Resolve an effect into a request, or nothing if it would be silent
    pub fn request(&self, effect: SoundEffect) -> Option<SoundRequest> {
        let volume = self.effective_volume();
        if volume <= 0.0 {
            return None;
        }
        Some(SoundRequest { effect, volume })
    }
}
