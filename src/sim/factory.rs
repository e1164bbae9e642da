//! Constructors for every kind of entity the game spawns

use glam::Vec2;
use rand::Rng;

use super::behaviour::{Channel, FinishAction, HorizontalDrift, Interpolation};
use super::entity::Entity;
use super::particles::EmitParticles;
use crate::SimRng;
use crate::assets::AssetHandles;
use crate::consts::{BUTTON_RADIUS, DEFAULT_RADIUS};
use crate::renderer::Color;
use crate::settings::Settings;

/// The player character, tinted with its lane colour
pub fn character(settings: &Settings, assets: &AssetHandles, offset: Vec2, color: Color) -> Entity {
    let mut e = Entity::at(offset + settings.character_anchor).with_radius(settings.character_radius);
    e.set_texture(assets.square);
    e.color = color;
    e.rotation = settings.character_rotation_deg.to_radians();
    e
}

/// Leftward traversal from just off the right edge to just off the left
fn crossing(settings: &Settings) -> Interpolation {
    let w = settings.screen_width;
    let m = settings.obstacle_margin;
    Interpolation::new(Channel::PositionX, w + m, -m, settings.obstacle_crossing_secs())
        .with_on_finish(FinishAction::Deactivate)
}

/// A collectible star with its own sparkle
pub fn star(settings: &Settings, assets: &AssetHandles, offset: Vec2) -> Entity {
    let mut e = Entity::at(offset + Vec2::new(settings.screen_width + settings.obstacle_margin, settings.star_lane_y))
        .with_radius(settings.star_radius);
    e.set_texture(assets.star);
    e.color = Color::YELLOW;
    e.add_behaviour(crossing(settings));
    e.add_behaviour(EmitParticles::from_settings(particle(assets, Vec2::ZERO), &settings.sparkle));
    e
}

/// A hazard: half-size, black, ends the lane on contact
pub fn hazard(settings: &Settings, assets: &AssetHandles, offset: Vec2) -> Entity {
    let mut e =
        Entity::at(offset + Vec2::new(settings.screen_width + settings.obstacle_margin, settings.hazard_lane_y))
            .with_radius(settings.hazard_radius);
    e.set_texture(assets.star);
    e.color = Color::BLACK;
    e.scale = settings.hazard_scale;
    e.add_behaviour(crossing(settings));
    e
}

/// Small yellow spark used as a particle template
pub fn particle(assets: &AssetHandles, position: Vec2) -> Entity {
    let mut e = Entity::at(position);
    e.set_texture(assets.star);
    e.color = Color::YELLOW;
    e
}

/// A tree with a random texture. Larger trees are closer and move faster.
pub fn tree(settings: &Settings, assets: &AssetHandles, offset: Vec2, scale: f32, rng: &mut SimRng) -> Entity {
    let start_x = settings.screen_width + settings.scenery_margin;
    let mut e = Entity::at(offset + Vec2::new(start_x, settings.scenery_lane_y)).with_radius(settings.scenery_radius);
    if !assets.trees.is_empty() {
        let pick = rng.random_range(0..assets.trees.len());
        e.set_texture(assets.trees[pick]);
    }
    e.scale = scale;
    e.add_behaviour(HorizontalDrift::new(
        start_x,
        settings.traversal_speed * scale,
        -settings.scenery_margin,
    ));
    e
}

/// Round menu button
pub fn button(assets: &AssetHandles, position: Vec2) -> Entity {
    let mut e = Entity::at(position).with_radius(BUTTON_RADIUS);
    e.set_texture(assets.circle);
    e
}

/// Pointer cursor sprite
pub fn cursor(assets: &AssetHandles, position: Vec2) -> Entity {
    let mut e = Entity::at(position);
    e.set_texture(assets.mouse);
    e
}

/// Invisible entity used to hit-test a pointer press
pub fn pointer_probe(position: Vec2) -> Entity {
    Entity::at(position).with_radius(DEFAULT_RADIUS)
}
