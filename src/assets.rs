//! Asset handles
//!
//! The host application loads textures however it likes and hands the
//! simulation a table of opaque handles. Nothing in here touches files.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque texture handle resolved by the rendering backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureId(pub u32);

/// A texture handle plus the pixel size needed to centre it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextureInfo {
    pub id: TextureId,
    pub size: Vec2,
}

impl TextureInfo {
    pub const fn new(id: u32, width: f32, height: f32) -> Self {
        Self {
            id: TextureId(id),
            size: Vec2::new(width, height),
        }
    }

    /// Centre of the texture, used as the draw origin
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.size * 0.5
    }
}

/// Every texture the gameplay code can ask for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetHandles {
    /// Player character
    pub square: TextureInfo,
    /// Collectibles, hazards and particles
    pub star: TextureInfo,
    /// Menu buttons
    pub circle: TextureInfo,
    /// Pointer cursor
    pub mouse: TextureInfo,
    /// Scenery variants, one is picked at random per tree
    pub trees: Vec<TextureInfo>,
}

impl Default for AssetHandles {
    /// Placeholder handles for headless runs and tests
    fn default() -> Self {
        Self {
            square: TextureInfo::new(0, 86.0, 86.0),
            star: TextureInfo::new(1, 100.0, 100.0),
            circle: TextureInfo::new(2, 100.0, 100.0),
            mouse: TextureInfo::new(3, 40.0, 40.0),
            trees: vec![
                TextureInfo::new(10, 80.0, 160.0),
                TextureInfo::new(11, 90.0, 180.0),
                TextureInfo::new(12, 70.0, 140.0),
            ],
        }
    }
}
