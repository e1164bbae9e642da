//! Screen flow: menu, gameplay, end of run

use glam::Vec2;

use super::entity::Entity;
use super::factory;
use super::state::{GameEvent, GameState};
use super::tick::Key;
use crate::assets::AssetHandles;
use crate::audio::{AudioSettings, SoundRequest};
use crate::renderer::{Color, DrawList};
use crate::settings::Settings;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Title with a play button
    Menu,
    Gameplay,
    /// Total of the run that just ended, with a play-again button
    EndGame { score: u32 },
}

/// Everything the host needs to act on after a tick
#[derive(Debug, Clone, Default)]
pub struct FrameOutput {
    pub events: Vec<GameEvent>,
    pub sounds: Vec<SoundRequest>,
}

/// Top-level game: screens wrapped around the run state
#[derive(Debug)]
pub struct Game {
    screen: Screen,
    state: GameState,
    button: Entity,
    cursor: Entity,
    /// Hidden until the host reports a pointer position
    cursor_visible: bool,
    audio: AudioSettings,
}

impl Game {
    pub fn new(settings: Settings, assets: AssetHandles, seed: u64) -> Self {
        let center = Vec2::new(settings.screen_width / 2.0, settings.screen_height / 2.0);
        let button = factory::button(&assets, center);
        let cursor = factory::cursor(&assets, center);
        let audio = settings.audio;
        Self {
            screen: Screen::Menu,
            state: GameState::new(settings, assets, seed),
            button,
            cursor,
            cursor_visible: false,
            audio,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Where the menu / play-again button sits
    pub fn button_position(&self) -> Vec2 {
        self.button.position
    }

    /// Track the pointer so the cursor can be drawn over everything
    pub fn pointer_moved(&mut self, point: Vec2) {
        self.cursor.position = point;
        self.cursor_visible = true;
    }

    pub fn pointer_pressed(&mut self, point: Vec2) {
        match self.screen {
            Screen::Menu | Screen::EndGame { .. } => {
                if factory::pointer_probe(point).collides_with(&self.button) {
                    log::info!("Starting run {}", self.state.run);
                    self.screen = Screen::Gameplay;
                }
            }
            Screen::Gameplay => self.state.pointer_pressed(point),
        }
    }

    pub fn key_pressed(&mut self, key: Key) {
        if self.screen == Screen::Gameplay {
            self.state.key_pressed(key);
        }
    }

    /// Advance the current screen. A run whose lanes are all down is
    /// closed here: its total is shown and a fresh set of lanes is built.
    pub fn update(&mut self, dt: f32) {
        if self.screen != Screen::Gameplay {
            return;
        }
        if self.state.game_over() {
            let score = self.state.score();
            log::info!("Run {} over: score {} after {:.1}s", self.state.run, score, self.state.time);
            self.state.push_event(GameEvent::RunEnded { score });
            self.state.new_run();
            self.screen = Screen::EndGame { score };
            return;
        }
        self.state.update(dt);
    }

    /// Events since the last call, plus the sounds they trigger
    pub fn take_output(&mut self) -> FrameOutput {
        let events = self.state.drain_events();
        let sounds = events
            .iter()
            .filter_map(|e| e.sound())
            .filter_map(|effect| self.audio.request(effect))
            .collect();
        FrameOutput { events, sounds }
    }

    pub fn draw(&self, list: &mut DrawList) {
        let center_x = self.state.settings().screen_width / 2.0;
        match self.screen {
            Screen::Menu => {
                list.text("Play", Vec2::new(center_x, 300.0), Color::WHITE);
                self.button.draw(list);
            }
            Screen::Gameplay => self.state.draw(list),
            Screen::EndGame { score } => {
                list.text("Play again", Vec2::new(center_x, 300.0), Color::WHITE);
                list.text(
                    format!("Score: {} points!", score),
                    Vec2::new(center_x, 150.0),
                    Color::WHITE,
                );
                self.button.draw(list);
            }
        }
        if self.cursor_visible {
            self.cursor.draw(list);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundEffect;

    fn game() -> Game {
        Game::new(Settings::default(), AssetHandles::default(), 99)
    }

    #[test]
    fn test_menu_button_starts_play() {
        let mut game = game();
        assert_eq!(game.screen(), Screen::Menu);

        game.pointer_pressed(Vec2::new(10.0, 10.0));
        assert_eq!(game.screen(), Screen::Menu);

        game.pointer_pressed(game.button_position());
        assert_eq!(game.screen(), Screen::Gameplay);
    }

    #[test]
    fn test_menu_ignores_keys_and_time() {
        let mut game = game();
        game.key_pressed(Key::Q);
        game.update(5.0);
        assert!(game.take_output().events.is_empty());
        assert_eq!(game.state().time, 0.0);
    }

    #[test]
    fn test_all_lanes_down_ends_run() {
        let mut game = game();
        game.pointer_pressed(game.button_position());
        for (lane, score) in game.state_mut().lanes_mut().iter_mut().zip([4, 2, 5]) {
            lane.score = score;
            lane.game_over = true;
        }
        game.update(0.016);
        assert_eq!(game.screen(), Screen::EndGame { score: 11 });
        assert_eq!(game.state().run, 2);
        assert_eq!(game.state().score(), 0);

        let out = game.take_output();
        assert_eq!(out.events, vec![GameEvent::RunEnded { score: 11 }]);
        assert!(out.sounds.is_empty());

        game.pointer_pressed(game.button_position());
        assert_eq!(game.screen(), Screen::Gameplay);
    }

    #[test]
    fn test_jump_produces_sound() {
        let mut game = game();
        game.pointer_pressed(game.button_position());
        game.key_pressed(Key::E);
        let out = game.take_output();
        assert_eq!(out.events, vec![GameEvent::Jumped { lane: 2 }]);
        assert_eq!(out.sounds.len(), 1);
        assert_eq!(out.sounds[0].effect, SoundEffect::Jump);
    }

    #[test]
    fn test_end_screen_shows_score() {
        let mut game = game();
        game.pointer_pressed(game.button_position());
        for lane in game.state_mut().lanes_mut() {
            lane.score = 1;
            lane.game_over = true;
        }
        game.update(0.016);
        let mut list = DrawList::new();
        game.draw(&mut list);
        assert!(list.texts().any(|t| t.text == "Score: 3 points!"));
        assert_eq!(list.sprites().count(), 1);
    }

    #[test]
    fn test_cursor_drawn_last_once_pointer_known() {
        let mut game = game();
        let mut list = DrawList::new();
        game.draw(&mut list);
        assert_eq!(list.sprites().count(), 1);

        game.pointer_moved(Vec2::new(12.0, 34.0));
        list.clear();
        game.draw(&mut list);
        let last = list.sprites().last().unwrap();
        assert_eq!(last.texture, AssetHandles::default().mouse.id);
        assert_eq!(last.position, Vec2::new(12.0, 34.0));
    }
}
