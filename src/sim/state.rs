//! Run state: the set of lanes and the rules that span them
//!
//! Lanes never talk to each other directly. During a tick they push events
//! into one queue; once every lane has updated, the pickups in that queue
//! are credited to lanes that are down, reviving them at the threshold.

use std::rc::Rc;

use glam::Vec2;
use rand::SeedableRng;

use super::factory;
use super::lane::Lane;
use super::tick::Key;
use crate::SimRng;
use crate::assets::AssetHandles;
use crate::audio::SoundEffect;
use crate::renderer::{Color, DrawList};
use crate::settings::Settings;

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A lane picked up a collectible (its score is already updated)
    StarCollected { lane: usize },
    /// A lane hit a hazard and stopped
    Crashed { lane: usize },
    /// A lane's character left the ground
    Jumped { lane: usize },
    /// A stopped lane came back thanks to pickups elsewhere
    Revived { lane: usize },
    /// Every lane was down; the run is over
    RunEnded { score: u32 },
}

impl GameEvent {
    /// Sound the host should play for this event
    pub fn sound(&self) -> Option<SoundEffect> {
        match self {
            GameEvent::StarCollected { .. } => Some(SoundEffect::PickUp),
            GameEvent::Crashed { .. } => Some(SoundEffect::Hit),
            GameEvent::Jumped { .. } => Some(SoundEffect::Jump),
            GameEvent::Revived { .. } | GameEvent::RunEnded { .. } => None,
        }
    }
}

/// All lanes of the current run
#[derive(Debug)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Runs started so far (1 for the first)
    pub run: u32,
    /// Simulated seconds in the current run
    pub time: f32,
    rng: SimRng,
    settings: Rc<Settings>,
    assets: Rc<AssetHandles>,
    lanes: Vec<Lane>,
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(settings: Settings, assets: AssetHandles, seed: u64) -> Self {
        let mut state = Self {
            seed,
            run: 0,
            time: 0.0,
            rng: SimRng::seed_from_u64(seed),
            settings: Rc::new(settings.sanitized()),
            assets: Rc::new(assets),
            lanes: Vec::new(),
            events: Vec::new(),
        };
        state.new_run();
        state
    }

    /// Throw away the lanes and start over with fresh ones
    pub fn new_run(&mut self) {
        let lanes = self
            .settings
            .lanes
            .iter()
            .enumerate()
            .map(|(i, lane)| {
                Lane::new(
                    i,
                    lane,
                    Rc::clone(&self.settings),
                    Rc::clone(&self.assets),
                    &mut self.rng,
                )
            })
            .collect();
        self.lanes = lanes;
        self.run += 1;
        self.time = 0.0;
        log::info!("Run {} started with {} lanes", self.run, self.lanes.len());
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn lanes_mut(&mut self) -> &mut [Lane] {
        &mut self.lanes
    }

    /// True only when every lane is down
    pub fn game_over(&self) -> bool {
        self.lanes.iter().all(|lane| lane.game_over)
    }

    /// Sum over all lanes
    pub fn score(&self) -> u32 {
        self.lanes.iter().map(|lane| lane.score).sum()
    }

    /// Advance every lane, then settle cross-lane pickups.
    ///
    /// The tick's events are replayed in the order they were raised, so a
    /// pickup only counts for lanes that were already down when it happened.
    pub fn update(&mut self, dt: f32) {
        if self.game_over() {
            return;
        }
        self.time += dt;

        let mut down: Vec<bool> = self.lanes.iter().map(|lane| lane.game_over).collect();
        let first = self.events.len();
        for lane in self.lanes.iter_mut() {
            lane.update(dt, &mut self.rng, &mut self.events);
        }

        let raised = self.events[first..].to_vec();
        for event in raised {
            match event {
                GameEvent::Crashed { lane } => {
                    if let Some(flag) = down.get_mut(lane) {
                        *flag = true;
                    }
                }
                GameEvent::StarCollected { lane } => self.credit_star(lane, &mut down),
                _ => {}
            }
        }
    }

    /// Count a pickup on `source` toward every other lane in `down`
    fn credit_star(&mut self, source: usize, down: &mut [bool]) {
        let needed = self.settings.revive_stars;
        for lane in self.lanes.iter_mut() {
            let index = lane.index();
            if index == source || !down.get(index).copied().unwrap_or(false) {
                continue;
            }
            lane.stars_after_game_over += 1;
            if lane.stars_after_game_over >= needed {
                lane.revive();
                down[index] = false;
                self.events.push(GameEvent::Revived { lane: index });
            }
        }
    }

    /// Jump the lane at `index`, if it exists
    pub fn jump_lane(&mut self, index: usize) -> bool {
        match self.lanes.get_mut(index) {
            Some(lane) => lane.jump(&mut self.events),
            None => false,
        }
    }

    /// Keyboard: every lane bound to `key` jumps
    pub fn key_pressed(&mut self, key: Key) {
        if self.game_over() {
            return;
        }
        for lane in self.lanes.iter_mut().filter(|lane| lane.key() == key) {
            lane.jump(&mut self.events);
        }
    }

    /// Pointer/touch: every character under the point jumps
    pub fn pointer_pressed(&mut self, point: Vec2) {
        if self.game_over() {
            return;
        }
        let probe = factory::pointer_probe(point);
        for lane in self.lanes.iter_mut() {
            if probe.collides_with(&lane.character) {
                lane.jump(&mut self.events);
            }
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Hand over everything that happened since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn draw(&self, list: &mut DrawList) {
        for lane in &self.lanes {
            lane.draw(list);
        }

        let center_x = self.settings.screen_width / 2.0;
        list.text(self.score().to_string(), Vec2::new(center_x, 6.0), Color::WHITE);
        if self.game_over() {
            list.text("Game Over", Vec2::new(center_x, 300.0), Color::WHITE);
        }
    }
}
