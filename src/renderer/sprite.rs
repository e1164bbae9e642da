//! Sprite and text primitives

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::TextureId;

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// One textured quad
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub texture: TextureId,
    pub position: Vec2,
    /// Radians, clockwise in screen space
    pub rotation: f32,
    /// Pivot inside the texture, in texture pixels
    pub origin: Vec2,
    pub scale: f32,
    pub color: Color,
    pub alpha: f32,
}

/// A text label centred on its position; measuring and font choice
/// belong to the backend
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub text: String,
    pub position: Vec2,
    pub color: Color,
}
