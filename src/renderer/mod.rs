//! Abstract rendering output
//!
//! The simulation describes a frame as an ordered list of draw commands.
//! Whatever backend the host uses replays them in order, so later commands
//! end up on top. No camera or viewport transform happens here.

pub mod sprite;

pub use sprite::{Color, Sprite, Text};

/// A single draw request
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite(Sprite),
    Text(Text),
}

/// Draw commands for one frame, in painter's order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sprite(&mut self, sprite: Sprite) {
        self.commands.push(DrawCommand::Sprite(sprite));
    }

    pub fn text(&mut self, text: impl Into<String>, position: glam::Vec2, color: Color) {
        self.commands.push(DrawCommand::Text(Text {
            text: text.into(),
            position,
            color,
        }));
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Sprites only, in draw order
    pub fn sprites(&self) -> impl Iterator<Item = &Sprite> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Sprite(s) => Some(s),
            DrawCommand::Text(_) => None,
        })
    }

    /// Text labels only, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &Text> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text(t) => Some(t),
            DrawCommand::Sprite(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}
