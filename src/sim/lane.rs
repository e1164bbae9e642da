//! One runner track
//!
//! A lane owns its character, everything that scrolls past it, and its own
//! score. It only ever changes its own state; anything other lanes need to
//! know about goes out as a `GameEvent`.

use std::rc::Rc;

use glam::Vec2;
use rand::Rng;

use super::behaviour::{Channel, FinishAction, Interpolation, Jump};
use super::entity::Entity;
use super::factory;
use super::particles::EmitParticles;
use super::state::GameEvent;
use super::tick::Key;
use crate::SimRng;
use crate::assets::AssetHandles;
use crate::renderer::{Color, DrawList};
use crate::settings::{Interval, LaneSettings, Settings};

/// What scrolled into the character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    /// Worth a point
    Collectible,
    /// Ends the lane unless the character is indestructible
    Hazard,
}

#[derive(Debug)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub entity: Entity,
}

/// Scenery depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Behind obstacles and the character
    Background,
    /// In front of the character
    Foreground,
}

/// Draw a delay from `[min, max)`
fn next_delay(rng: &mut SimRng, interval: Interval) -> f32 {
    if interval.max > interval.min {
        rng.random_range(interval.min..interval.max)
    } else {
        interval.min
    }
}

#[derive(Debug)]
pub struct Lane {
    index: usize,
    offset: Vec2,
    color: Color,
    key: Key,
    pub character: Entity,
    jump_slot: usize,
    /// Slot of the immunity countdown, added on the first revive
    immunity_slot: Option<usize>,
    pub game_over: bool,
    pub score: u32,
    /// Pickups on other lanes since this lane went down
    pub stars_after_game_over: u32,
    obstacles: Vec<Obstacle>,
    background: Vec<Entity>,
    foreground: Vec<Entity>,
    since_spawn: f32,
    next_spawn: f32,
    since_scenery: f32,
    next_scenery: f32,
    settings: Rc<Settings>,
    assets: Rc<AssetHandles>,
}

impl Lane {
    pub fn new(
        index: usize,
        lane: &LaneSettings,
        settings: Rc<Settings>,
        assets: Rc<AssetHandles>,
        rng: &mut SimRng,
    ) -> Self {
        let mut character = factory::character(&settings, &assets, lane.offset, lane.color);

        let jump = Jump::new(character.position, settings.jump_power, settings.jump_gravity);
        let jump_slot = character.add_behaviour(jump);

        let trail = EmitParticles::from_settings(character.clone_visual(), &settings.trail);
        character.add_behaviour(trail);

        let next_spawn = next_delay(rng, settings.spawn_interval);
        let next_scenery = next_delay(rng, settings.scenery_interval);

        Self {
            index,
            offset: lane.offset,
            color: lane.color,
            key: lane.key,
            character,
            jump_slot,
            immunity_slot: None,
            game_over: false,
            score: 0,
            stars_after_game_over: 0,
            obstacles: Vec::new(),
            background: Vec::new(),
            foreground: Vec::new(),
            since_spawn: 0.0,
            next_spawn,
            since_scenery: 0.0,
            next_scenery,
            settings,
            assets,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn scenery(&self, layer: Layer) -> &[Entity] {
        match layer {
            Layer::Background => &self.background,
            Layer::Foreground => &self.foreground,
        }
    }

    /// Put an obstacle in the lane directly
    pub fn push_obstacle(&mut self, kind: ObstacleKind, entity: Entity) {
        self.obstacles.push(Obstacle { kind, entity });
    }

    pub fn jump_state(&self) -> Option<&Jump> {
        self.character.behaviour(self.jump_slot).and_then(|b| b.as_jump())
    }

    pub fn is_jumping(&self) -> bool {
        self.jump_state().is_some_and(Jump::is_jumping)
    }

    /// Make the character hop. Returns false if it is already airborne.
    pub fn jump(&mut self, events: &mut Vec<GameEvent>) -> bool {
        let started = self
            .character
            .behaviour_mut(self.jump_slot)
            .and_then(|b| b.as_jump_mut())
            .is_some_and(Jump::jump);
        if started {
            events.push(GameEvent::Jumped { lane: self.index });
        }
        started
    }

    /// Bring the lane back with a window of hazard immunity
    pub fn revive(&mut self) {
        self.character.indestructible = true;
        let timer = Interpolation::new(Channel::Timer, 0.0, 1.0, self.settings.indestructible_secs)
            .with_on_finish(FinishAction::EndIndestructible);
        match self.immunity_slot.and_then(|slot| self.character.behaviour_mut(slot)) {
            Some(behaviour) => *behaviour = timer.into(),
            None => self.immunity_slot = Some(self.character.add_behaviour(timer)),
        }
        self.game_over = false;
        log::info!(
            "Lane {} revived ({}s indestructible)",
            self.index,
            self.settings.indestructible_secs
        );
    }

    /// Advance one tick. Does nothing once the lane is over.
    pub fn update(&mut self, dt: f32, rng: &mut SimRng, events: &mut Vec<GameEvent>) {
        if self.game_over {
            return;
        }

        self.since_spawn += dt;
        if self.since_spawn > self.next_spawn {
            self.since_spawn = 0.0;
            self.next_spawn = next_delay(rng, self.settings.spawn_interval);
            if rng.random_bool(0.5) {
                let star = factory::star(&self.settings, &self.assets, self.offset);
                self.push_obstacle(ObstacleKind::Collectible, star);
            } else {
                let hazard = factory::hazard(&self.settings, &self.assets, self.offset);
                self.push_obstacle(ObstacleKind::Hazard, hazard);
            }
            log::debug!("Lane {} spawned {:?}", self.index, self.obstacles.last().map(|o| o.kind));
        }

        self.since_scenery += dt;
        if self.since_scenery > self.next_scenery {
            self.since_scenery = 0.0;
            self.next_scenery = next_delay(rng, self.settings.scenery_interval);
            if rng.random_bool(0.5) {
                let scale = self.settings.background_scale;
                let tree = factory::tree(&self.settings, &self.assets, self.offset, scale, rng);
                self.background.push(tree);
            } else {
                let scale = self.settings.foreground_scale;
                let tree = factory::tree(&self.settings, &self.assets, self.offset, scale, rng);
                self.foreground.push(tree);
            }
        }

        self.character.update(dt, rng);
        for obstacle in self.obstacles.iter_mut().filter(|o| o.entity.active) {
            obstacle.entity.update(dt, rng);
        }
        for tree in self.foreground.iter_mut().chain(self.background.iter_mut()) {
            if tree.active {
                tree.update(dt, rng);
            }
        }

        self.resolve_collisions(events);

        self.foreground.retain(|e| e.active);
        self.background.retain(|e| e.active);
    }

    /// Back-to-front sweep so removals don't disturb unvisited entries
    fn resolve_collisions(&mut self, events: &mut Vec<GameEvent>) {
        for i in (0..self.obstacles.len()).rev() {
            if !self.obstacles[i].entity.active {
                self.obstacles.remove(i);
                continue;
            }
            if !self.character.collides_with(&self.obstacles[i].entity) {
                continue;
            }

            match self.obstacles[i].kind {
                ObstacleKind::Hazard => {
                    if self.character.indestructible || self.game_over {
                        continue;
                    }
                    self.game_over = true;
                    self.stars_after_game_over = 0;
                    events.push(GameEvent::Crashed { lane: self.index });
                    log::info!("Lane {} crashed with score {}", self.index, self.score);
                }
                ObstacleKind::Collectible => {
                    let mut star = self.obstacles.remove(i);
                    star.entity.active = false;
                    self.score += 1;
                    events.push(GameEvent::StarCollected { lane: self.index });
                }
            }
        }
    }

    pub fn draw(&self, list: &mut DrawList) {
        for tree in &self.background {
            tree.draw(list);
        }
        for obstacle in &self.obstacles {
            obstacle.entity.draw(list);
        }
        self.character.draw(list);
        for tree in &self.foreground {
            tree.draw(list);
        }

        if self.game_over {
            let needed = self.settings.revive_stars.saturating_sub(self.stars_after_game_over);
            list.text(
                format!("collect {} stars", needed),
                self.offset + Vec2::new(self.settings.screen_width / 2.0, self.settings.character_anchor.y),
                Color::WHITE,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn lane_at(anchor_y: f32) -> (Lane, SimRng) {
        let mut rng = SimRng::seed_from_u64(42);
        let settings = Rc::new(Settings::default());
        let assets = Rc::new(AssetHandles::default());
        let lane_settings = LaneSettings {
            offset: Vec2::new(0.0, anchor_y - settings.character_anchor.y),
            color: Color::RED,
            key: Key::Q,
        };
        let lane = Lane::new(0, &lane_settings, settings, assets, &mut rng);
        (lane, rng)
    }

    fn obstacle_at(pos: Vec2, radius: f32) -> Entity {
        Entity::at(pos).with_radius(radius)
    }

    #[test]
    fn test_character_starts_at_anchor() {
        let (lane, _) = lane_at(400.0);
        assert_eq!(lane.character.position, Vec2::new(240.0, 400.0));
        assert_eq!(lane.character.radius, 43.0);
        assert!(!lane.game_over);
        assert_eq!(lane.score, 0);
    }

    #[test]
    fn test_hazard_hit_ends_lane() {
        let (mut lane, mut rng) = lane_at(400.0);
        lane.stars_after_game_over = 2;
        lane.push_obstacle(ObstacleKind::Hazard, obstacle_at(Vec2::new(240.0, 400.0), 25.0));
        let mut events = Vec::new();
        lane.update(0.01, &mut rng, &mut events);
        assert!(lane.game_over);
        assert_eq!(lane.stars_after_game_over, 0);
        assert_eq!(events, vec![GameEvent::Crashed { lane: 0 }]);
        // Hazard stays in the lane
        assert_eq!(lane.obstacles().len(), 1);
    }

    #[test]
    fn test_collectible_scores_once() {
        let (mut lane, mut rng) = lane_at(400.0);
        lane.push_obstacle(ObstacleKind::Collectible, obstacle_at(Vec2::new(240.0, 400.0), 50.0));
        let mut events = Vec::new();
        lane.update(0.01, &mut rng, &mut events);
        assert_eq!(lane.score, 1);
        assert!(lane.obstacles().is_empty());
        let collected = events
            .iter()
            .filter(|e| matches!(e, GameEvent::StarCollected { .. }))
            .count();
        assert_eq!(collected, 1);
        assert!(!lane.game_over);
    }

    #[test]
    fn test_indestructible_passes_through_hazard() {
        let (mut lane, mut rng) = lane_at(400.0);
        lane.character.indestructible = true;
        lane.push_obstacle(ObstacleKind::Hazard, obstacle_at(Vec2::new(240.0, 400.0), 25.0));
        let mut events = Vec::new();
        lane.update(0.01, &mut rng, &mut events);
        assert!(!lane.game_over);
        assert!(events.is_empty());
        assert_eq!(lane.obstacles().len(), 1);
    }

    #[test]
    fn test_game_over_lane_is_frozen() {
        let (mut lane, mut rng) = lane_at(400.0);
        lane.game_over = true;
        lane.push_obstacle(ObstacleKind::Collectible, obstacle_at(Vec2::new(240.0, 400.0), 50.0));
        let mut events = Vec::new();
        for _ in 0..100 {
            lane.update(0.1, &mut rng, &mut events);
        }
        assert_eq!(lane.score, 0);
        assert_eq!(lane.obstacles().len(), 1);
        assert!(lane.scenery(Layer::Background).is_empty());
        assert!(lane.scenery(Layer::Foreground).is_empty());
    }

    #[test]
    fn test_inactive_obstacles_are_dropped() {
        let (mut lane, mut rng) = lane_at(400.0);
        let mut gone = obstacle_at(Vec2::new(0.0, 0.0), 10.0);
        gone.active = false;
        lane.push_obstacle(ObstacleKind::Hazard, gone);
        let mut events = Vec::new();
        lane.update(0.01, &mut rng, &mut events);
        assert!(lane.obstacles().is_empty());
    }

    #[test]
    fn test_revive_grants_timed_immunity() {
        let (mut lane, mut rng) = lane_at(400.0);
        lane.game_over = true;
        lane.revive();
        assert!(!lane.game_over);
        assert!(lane.character.indestructible);

        let mut events = Vec::new();
        lane.update(1.0, &mut rng, &mut events);
        lane.update(1.0, &mut rng, &mut events);
        assert!(lane.character.indestructible);
        lane.update(1.0, &mut rng, &mut events);
        assert!(!lane.character.indestructible);
    }

    #[test]
    fn test_repeat_revives_reuse_one_timer() {
        let (mut lane, mut rng) = lane_at(400.0);
        lane.game_over = true;
        lane.revive();
        let count = lane.character.behaviours().len();

        let mut events = Vec::new();
        for _ in 0..4 {
            lane.update(1.0, &mut rng, &mut events);
        }
        assert!(!lane.character.indestructible);

        lane.game_over = true;
        lane.revive();
        assert_eq!(lane.character.behaviours().len(), count);
        assert!(lane.character.indestructible);

        // Fresh countdown: still immune after 2s, gone after 3s
        lane.update(1.0, &mut rng, &mut events);
        lane.update(1.0, &mut rng, &mut events);
        assert!(lane.character.indestructible);
        lane.update(1.0, &mut rng, &mut events);
        assert!(!lane.character.indestructible);
    }

    #[test]
    fn test_jump_is_forwarded_once() {
        let (mut lane, mut rng) = lane_at(400.0);
        let mut events = Vec::new();
        assert!(lane.jump(&mut events));
        assert!(!lane.jump(&mut events));
        assert_eq!(events, vec![GameEvent::Jumped { lane: 0 }]);

        lane.update(0.5, &mut rng, &mut Vec::new());
        assert!(lane.is_jumping());
        assert!(lane.character.position.y < 400.0);
    }

    #[test]
    fn test_spawns_obstacles_and_scenery_over_time() {
        let (mut lane, mut rng) = lane_at(400.0);
        let mut events = Vec::new();
        // Indestructible so hazards can't end the run early
        lane.character.indestructible = true;
        for _ in 0..40 {
            lane.update(0.1, &mut rng, &mut events);
        }
        assert!(!lane.obstacles().is_empty() || lane.score > 0);
        let trees = lane.scenery(Layer::Background).len() + lane.scenery(Layer::Foreground).len();
        assert!(trees >= 1);
    }

    #[test]
    fn test_game_over_overlay_counts_down() {
        let (mut lane, _) = lane_at(400.0);
        lane.game_over = true;
        lane.stars_after_game_over = 1;
        let mut list = DrawList::new();
        lane.draw(&mut list);
        let texts: Vec<_> = list.texts().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["collect 2 stars"]);
    }
}
