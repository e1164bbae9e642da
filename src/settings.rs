//! Game settings and tuning
//!
//! Every gameplay constant lives here so a run can be reproduced from a
//! settings blob and a seed. Loaded from JSON by the host; the simulation
//! only ever reads it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::audio::AudioSettings;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::renderer::Color;
use crate::sim::Key;

/// Floor for `traversal_speed` (px/s)
const MIN_TRAVERSAL_SPEED: f32 = 1.0;
/// Floor for `jump_gravity` (px/s²)
const MIN_JUMP_GRAVITY: f32 = 1.0;

/// One runner track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneSettings {
    /// Screen offset added to every lane-relative position
    pub offset: Vec2,
    /// Character tint
    pub color: Color,
    /// Key that makes this lane's character jump
    pub key: Key,
}

/// Particle emitter tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterSettings {
    /// Seconds between bursts
    pub spawn_delay: f32,
    /// Particles per burst
    pub per_spawn: u32,
    /// Seconds each particle lives
    pub lifespan: f32,
    /// Alpha of the particle template
    pub alpha: f32,
    /// Particles also drift left and spin
    pub drift: bool,
}

impl Default for EmitterSettings {
    fn default() -> Self {
        Self {
            spawn_delay: 0.2,
            per_spawn: 7,
            lifespan: 0.5,
            alpha: 0.5,
            drift: false,
        }
    }
}

/// Half-open `[min, max)` interval in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Lanes ===
    pub lanes: Vec<LaneSettings>,

    // === Character ===
    /// Lane-relative position of the character
    pub character_anchor: Vec2,
    pub character_radius: f32,
    pub character_rotation_deg: f32,
    /// Initial upward speed of a hop
    pub jump_power: f32,
    /// Downward acceleration during a hop
    pub jump_gravity: f32,
    /// Trail left behind the character
    pub trail: EmitterSettings,

    // === Spawning ===
    /// Delay between collectible/hazard spawns
    pub spawn_interval: Interval,
    /// Delay between scenery spawns
    pub scenery_interval: Interval,
    /// Leftward speed of everything that crosses a lane (px/s)
    pub traversal_speed: f32,
    /// How far off-screen collectibles and hazards start and end
    pub obstacle_margin: f32,
    /// How far off-screen scenery starts and ends
    pub scenery_margin: f32,

    // === Collectibles ===
    pub star_radius: f32,
    pub star_lane_y: f32,
    /// Sparkle around each collectible
    pub sparkle: EmitterSettings,

    // === Hazards ===
    pub hazard_radius: f32,
    pub hazard_scale: f32,
    pub hazard_lane_y: f32,

    // === Scenery ===
    pub scenery_lane_y: f32,
    pub scenery_radius: f32,
    pub background_scale: f32,
    pub foreground_scale: f32,

    // === Revive ===
    /// Pickups on other lanes needed to bring a lane back
    pub revive_stars: u32,
    /// Seconds of hazard immunity after a revive
    pub indestructible_secs: f32,

    // === Audio ===
    pub audio: AudioSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            lanes: vec![
                LaneSettings {
                    offset: Vec2::new(0.0, 60.0),
                    color: Color::RED,
                    key: Key::Q,
                },
                LaneSettings {
                    offset: Vec2::new(0.0, 320.0),
                    color: Color::GREEN,
                    key: Key::W,
                },
                LaneSettings {
                    offset: Vec2::new(0.0, 580.0),
                    color: Color::BLUE,
                    key: Key::E,
                },
            ],

            character_anchor: Vec2::new(240.0, 120.0),
            character_radius: 43.0,
            character_rotation_deg: 45.0,
            jump_power: 100.0,
            jump_gravity: 100.0,
            trail: EmitterSettings {
                spawn_delay: 0.2,
                per_spawn: 3,
                lifespan: 2.0,
                alpha: 0.5,
                drift: true,
            },

            spawn_interval: Interval::new(1.0, 3.0),
            scenery_interval: Interval::new(1.0, 2.0),
            traversal_speed: 100.0,
            obstacle_margin: 50.0,
            scenery_margin: 80.0,

            star_radius: 50.0,
            star_lane_y: 0.0,
            sparkle: EmitterSettings::default(),

            hazard_radius: 25.0,
            hazard_scale: 0.5,
            hazard_lane_y: 170.0,

            scenery_lane_y: 100.0,
            scenery_radius: 20.0,
            background_scale: 0.8,
            foreground_scale: 1.3,

            revive_stars: 3,
            indestructible_secs: 3.0,

            audio: AudioSettings::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Clamp values the simulation cannot use. Durations and lifespans
    /// below zero become zero, gravity and traversal speed get a positive
    /// floor, inverted intervals are swapped.
    pub fn sanitized(mut self) -> Self {
        fn non_negative(name: &str, value: &mut f32) {
            if *value < 0.0 || value.is_nan() {
                log::warn!("Setting `{}` was {}, clamped to 0", name, value);
                *value = 0.0;
            }
        }

        fn at_least(name: &str, value: &mut f32, min: f32) {
            if *value < min || value.is_nan() {
                log::warn!("Setting `{}` was {}, raised to {}", name, value, min);
                *value = min;
            }
        }

        fn interval(name: &str, iv: &mut Interval) {
            non_negative(name, &mut iv.min);
            non_negative(name, &mut iv.max);
            if iv.max < iv.min {
                log::warn!("Setting `{}` had min > max, swapped", name);
                std::mem::swap(&mut iv.min, &mut iv.max);
            }
        }

        non_negative("trail.spawn_delay", &mut self.trail.spawn_delay);
        non_negative("trail.lifespan", &mut self.trail.lifespan);
        non_negative("sparkle.spawn_delay", &mut self.sparkle.spawn_delay);
        non_negative("sparkle.lifespan", &mut self.sparkle.lifespan);
        at_least("traversal_speed", &mut self.traversal_speed, MIN_TRAVERSAL_SPEED);
        at_least("jump_gravity", &mut self.jump_gravity, MIN_JUMP_GRAVITY);
        non_negative("indestructible_secs", &mut self.indestructible_secs);
        non_negative("character_radius", &mut self.character_radius);
        non_negative("star_radius", &mut self.star_radius);
        non_negative("hazard_radius", &mut self.hazard_radius);
        non_negative("scenery_radius", &mut self.scenery_radius);
        interval("spawn_interval", &mut self.spawn_interval);
        interval("scenery_interval", &mut self.scenery_interval);

        if self.lanes.is_empty() {
            log::warn!("No lanes configured, using the default three");
            self.lanes = Settings::default().lanes;
        }
        self
    }

    /// Seconds an obstacle needs to cross the lane, edge to edge
    pub fn obstacle_crossing_secs(&self) -> f32 {
        if self.traversal_speed <= 0.0 {
            return 0.0;
        }
        (self.screen_width + 2.0 * self.obstacle_margin) / self.traversal_speed
    }
}
