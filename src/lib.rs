//! Lunar Lander - a 2D fuel-limited descent arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, AABB collisions, session state)
//! - `game_loop`: Fixed timestep accumulator and per-frame session driver
//! - `renderer`: Draw ordering, bitmap text and the WebGPU pipeline
//! - `assets`: Sprite manifest loading into opaque texture handles
//! - `settings`: Presentation preferences

pub mod assets;
pub mod error;
pub mod game_loop;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use assets::{Assets, SpriteSet, TextureId};
pub use error::AssetError;
pub use game_loop::{AppStatus, FixedTimestep, Session};
pub use settings::Settings;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Downward acceleration applied to the lander every step
    pub const GRAVITY: f32 = -1.0;

    /// Fuel at session start and after restart
    pub const INITIAL_FUEL: f32 = 150.0;
    /// Fuel burned per held thruster key per frame
    pub const FUEL_PER_THRUSTER: f32 = 0.1;
    /// Horizontal acceleration from the side thrusters
    pub const SIDE_THRUST: f32 = 2.0;
    /// Upward acceleration from the main engine
    pub const MAIN_THRUST: f32 = 2.0;

    pub const PLATFORM_COUNT: usize = 5;
    pub const HAZARD_COUNT: usize = 3;

    /// Lander collision box (width, height); render scale matches
    pub const PLAYER_SIZE: (f32, f32) = (0.5, 1.0);
    /// Platform and hazard collision box; render scale matches
    pub const OBSTACLE_SIZE: (f32, f32) = (0.5, 0.5);

    pub const INITIAL_PLAYER_POSITION: Vec3 = Vec3::new(0.0, 3.0, 0.0);

    /// Orthographic view extents (world units)
    pub const VIEW_HALF_WIDTH: f32 = 5.0;
    pub const VIEW_HALF_HEIGHT: f32 = 3.75;

    /// Platform rows sit at -3.0, -2.5 or -2.0
    pub const PLATFORM_BASE_Y: f32 = -3.0;
    /// Hazard rows sit at -3.5, -3.0 or -2.5
    pub const HAZARD_BASE_Y: f32 = -3.5;
    pub const ROW_SPACING: f32 = 0.5;
    pub const ROW_CHOICES: u32 = 3;
    /// Obstacle x is an integer column in [-5, 4]
    pub const COLUMN_CHOICES: i32 = 10;
}

/// Initial lander acceleration: gravity only
#[inline]
pub fn gravity_vector() -> Vec3 {
    Vec3::new(0.0, consts::GRAVITY, 0.0)
}
