//! Per-frame input mapping and the fixed timestep tick
//!
//! Input is applied once per rendered frame; `tick` runs once per fixed step.
//! The outcome is judged after the frame's steps have run.

use super::state::{GamePhase, GameState};
use crate::consts::*;
use crate::gravity_vector;

/// Input snapshot for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held thruster keys
    pub left: bool,
    pub right: bool,
    pub up: bool,
    /// One-shot: reset the session (only honored once the game is over)
    pub restart: bool,
    /// One-shot: leave the game
    pub quit: bool,
}

impl TickInput {
    /// Number of thruster keys held
    pub fn thrusters_held(&self) -> u32 {
        self.left as u32 + self.right as u32 + self.up as u32
    }
}

/// Turn held keys into lander acceleration and burn fuel
///
/// Acceleration falls back to gravity every frame. While fuel remains, each
/// held key overwrites one axis and burns its own share, so fuel can end just
/// below zero. Once empty, thrust is ignored.
pub fn apply_thrust(state: &mut GameState, input: &TickInput) {
    let lander = &mut state.player;
    lander.acceleration = gravity_vector();

    if state.fuel > 0.0 {
        if input.left {
            lander.acceleration.x = -SIDE_THRUST;
            state.fuel -= FUEL_PER_THRUSTER;
        }
        if input.right {
            lander.acceleration.x = SIDE_THRUST;
            state.fuel -= FUEL_PER_THRUSTER;
        }
        if input.up {
            lander.acceleration.y = MAIN_THRUST;
            state.fuel -= FUEL_PER_THRUSTER;
        }

        if state.fuel <= 0.0 {
            log::debug!("Fuel exhausted ({:.2})", state.fuel);
        }
    }

    if state.fuel <= 0.0 {
        lander.acceleration = gravity_vector();
    }
}

/// Advance the lander by one fixed step against the platforms
pub fn tick(state: &mut GameState, dt: f32) {
    if state.phase.is_game_over() {
        return;
    }

    state.time_ticks += 1;
    state.player.update(dt, &state.platforms);
}

/// Decide whether the last steps ended the session
///
/// A landing is read from the lander's bottom flag; a crash is any box
/// overlap with a hazard. Landing wins ties.
pub fn evaluate_outcome(state: &mut GameState) -> GamePhase {
    if state.phase.is_game_over() {
        return state.phase;
    }

    if state.player.collisions.bottom {
        state.phase = GamePhase::Won;
        log::info!(
            "Landed at ({:.2}, {:.2}) with {:.1} fuel",
            state.player.position.x,
            state.player.position.y,
            state.fuel
        );
    } else if state
        .hazards
        .iter()
        .any(|hazard| state.player.check_collision(hazard))
    {
        state.phase = GamePhase::Lost;
        log::info!(
            "Crashed at ({:.2}, {:.2})",
            state.player.position.x,
            state.player.position.y
        );
    }

    state.phase
}
