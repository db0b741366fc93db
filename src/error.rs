//! Startup error types
//!
//! Only asset loading can fail. Per-frame simulation has no error paths.

use thiserror::Error;

/// Fatal error raised while loading the sprite manifest
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("sprite manifest is malformed: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("required sprite `{0}` is missing from the manifest")]
    MissingSprite(&'static str),

    #[error("sprite `{name}` has color channel {value} outside [0, 1]")]
    InvalidColor { name: String, value: f32 },
}
