//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (terrain layout)
//! - Stable iteration order (platforms, then hazards, by index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod state;
pub mod tick;

pub use collision::{Aabb, CONTACT_SLOP, CollisionFlags};
pub use entity::{Entity, EntityKind};
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, apply_thrust, evaluate_outcome, tick};
