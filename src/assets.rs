//! Sprite manifest loading
//!
//! Sprites are flat RGBA tints keyed by name. Loading hands out opaque
//! [`TextureId`] handles that entities carry and the renderer resolves.

use serde::{Deserialize, Serialize};

use crate::error::AssetError;

/// Built-in manifest shipped with the game
pub const BUILTIN_MANIFEST: &str = include_str!("../assets/sprites.json");

/// Sprite names the session cannot start without
pub const REQUIRED_SPRITES: [&str; 5] = ["background", "lander", "platform", "hazard", "font"];

/// Opaque handle to a loaded sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextureId(pub u32);

/// One manifest entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteDef {
    pub name: String,
    pub color: [f32; 4],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Manifest {
    sprites: Vec<SpriteDef>,
}

/// Handles for every sprite the session draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpriteSet {
    pub background: TextureId,
    pub lander: TextureId,
    pub platform: TextureId,
    pub hazard: TextureId,
    pub font: TextureId,
}

/// Loaded sprite table
#[derive(Debug, Clone)]
pub struct Assets {
    sprites: Vec<SpriteDef>,
    pub set: SpriteSet,
}

impl Assets {
    /// Parse a manifest and resolve the required sprites
    pub fn load(manifest: &str) -> Result<Self, AssetError> {
        let manifest: Manifest = serde_json::from_str(manifest)?;

        for sprite in &manifest.sprites {
            if let Some(&value) = sprite.color.iter().find(|c| !(0.0..=1.0).contains(*c)) {
                return Err(AssetError::InvalidColor {
                    name: sprite.name.clone(),
                    value,
                });
            }
        }

        let lookup = |name: &'static str| -> Result<TextureId, AssetError> {
            manifest
                .sprites
                .iter()
                .position(|s| s.name == name)
                .map(|i| TextureId(i as u32))
                .ok_or(AssetError::MissingSprite(name))
        };

        let set = SpriteSet {
            background: lookup(REQUIRED_SPRITES[0])?,
            lander: lookup(REQUIRED_SPRITES[1])?,
            platform: lookup(REQUIRED_SPRITES[2])?,
            hazard: lookup(REQUIRED_SPRITES[3])?,
            font: lookup(REQUIRED_SPRITES[4])?,
        };

        log::info!("Loaded {} sprites", manifest.sprites.len());

        Ok(Self {
            sprites: manifest.sprites,
            set,
        })
    }

    /// Load the manifest compiled into the binary
    pub fn builtin() -> Result<Self, AssetError> {
        Self::load(BUILTIN_MANIFEST)
    }

    /// Tint for a handle; unknown handles draw magenta
    pub fn color(&self, id: TextureId) -> [f32; 4] {
        self.sprites
            .get(id.0 as usize)
            .map(|s| s.color)
            .unwrap_or([1.0, 0.0, 1.0, 1.0])
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}
