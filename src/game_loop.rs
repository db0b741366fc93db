//! Fixed timestep game loop
//!
//! Wall-clock frame time is banked in an accumulator and spent in whole
//! `SIM_DT` steps, so the simulation never depends on the render rate.

use crate::assets::SpriteSet;
use crate::consts::SIM_DT;
use crate::sim::{GamePhase, GameState, TickInput, apply_thrust, evaluate_outcome, tick};

/// Accumulator that converts elapsed time into whole simulation steps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTimestep {
    pub step: f32,
    accumulator: f32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

impl FixedTimestep {
    pub fn new(step: f32) -> Self {
        Self {
            step,
            accumulator: 0.0,
        }
    }

    /// Bank `elapsed` seconds and return how many whole steps are due
    ///
    /// The leftover fraction carries into the next call. Negative, NaN and
    /// infinite elapsed time is ignored.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        if elapsed.is_finite() && elapsed > 0.0 {
            self.accumulator += elapsed;
        }

        // fmod is exact, so the remainder always lands in [0, step)
        let leftover = self.accumulator % self.step;
        let steps = ((self.accumulator - leftover) / self.step).round() as u32;
        self.accumulator = leftover;
        steps
    }

    /// Time banked toward the next step
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Whether the application should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppStatus {
    #[default]
    Running,
    Terminated,
}

/// One play session plus the loop that drives it
#[derive(Debug, Clone)]
pub struct Session {
    pub state: GameState,
    pub clock: FixedTimestep,
    pub status: AppStatus,
}

impl Session {
    pub fn new(seed: u64, sprites: &SpriteSet) -> Self {
        log::info!("New session with layout seed {}", seed);
        Self {
            state: GameState::new(seed, sprites),
            clock: FixedTimestep::default(),
            status: AppStatus::Running,
        }
    }

    /// Process one rendered frame
    ///
    /// Input is mapped once, then the lander advances zero or more fixed
    /// steps. Once the game is over the world is frozen until restart, and
    /// held thrusters no longer burn fuel.
    pub fn frame(&mut self, input: &TickInput, elapsed: f32) -> AppStatus {
        if self.status == AppStatus::Terminated {
            return self.status;
        }
        if input.quit {
            log::info!("Quit requested");
            self.status = AppStatus::Terminated;
            return self.status;
        }

        if input.restart && self.state.phase.is_game_over() {
            log::info!("Restarting after {:?}", self.state.phase);
            self.state.restart();
            self.clock.reset();
        }

        if self.state.phase != GamePhase::Playing {
            return self.status;
        }

        apply_thrust(&mut self.state, input);

        let steps = self.clock.advance(elapsed);
        if steps > 1 {
            log::debug!("Catching up {} steps", steps);
        }
        for _ in 0..steps {
            tick(&mut self.state, self.clock.step);
        }

        evaluate_outcome(&mut self.state);
        self.state.refresh_scenery();

        self.status
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use glam::Vec3;
    use proptest::prelude::*;

    fn clear_session() -> Session {
        let mut session = Session::new(99, &SpriteSet::default());
        for (i, e) in session
            .state
            .platforms
            .iter_mut()
            .chain(session.state.hazards.iter_mut())
            .enumerate()
        {
            e.position.x = 1.5 + i as f32;
        }
        session
    }

    #[test]
    fn test_small_deltas_accumulate() {
        let mut clock = FixedTimestep::default();
        let mut total = 0;
        let mut expected_counts = Vec::new();
        for _ in 0..4 {
            let steps = clock.advance(0.01);
            total += steps;
            expected_counts.push(steps);
        }
        // 0.04s = two steps with 0.04 - 2/60 banked
        assert_eq!(expected_counts, vec![0, 1, 0, 1]);
        assert_eq!(total, 2);
        assert!((clock.accumulator() - (0.04 - 2.0 * SIM_DT)).abs() < 1e-6);
    }

    #[test]
    fn test_slow_frame_catches_up() {
        let mut clock = FixedTimestep::default();
        assert_eq!(clock.advance(1.0 / 30.0 + 1e-6), 2);
    }

    #[test]
    fn test_bad_elapsed_ignored() {
        let mut clock = FixedTimestep::default();
        clock.advance(0.01);
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.advance(f32::NAN), 0);
        assert!((clock.accumulator() - 0.01).abs() < 1e-7);
    }

    #[test]
    fn test_unbounded_elapsed_returns() {
        let mut clock = FixedTimestep::default();
        assert_eq!(clock.advance(f32::INFINITY), 0);
        assert_eq!(clock.advance(f32::NEG_INFINITY), 0);
        assert_eq!(clock.accumulator(), 0.0);

        let steps = clock.advance(1e6);
        let expected = 1e6 / SIM_DT as f64;
        assert!((steps as f64 - expected).abs() / expected < 1e-3);
        assert!(clock.accumulator() >= 0.0 && clock.accumulator() < SIM_DT);
    }

    #[test]
    fn test_exact_step_boundary() {
        let mut clock = FixedTimestep::new(0.5);
        assert_eq!(clock.advance(0.25), 0);
        assert_eq!(clock.advance(0.25), 1);
        assert_eq!(clock.accumulator(), 0.0);
    }

    #[test]
    fn test_frame_runs_whole_steps() {
        let mut session = clear_session();
        session.frame(&TickInput::default(), SIM_DT * 0.5);
        assert_eq!(session.state.time_ticks, 0);
        assert_eq!(session.state.player.position, INITIAL_PLAYER_POSITION);

        session.frame(&TickInput::default(), SIM_DT * 0.6);
        assert_eq!(session.state.time_ticks, 1);
    }

    #[test]
    fn test_fuel_per_frame_not_per_step() {
        let mut session = clear_session();
        let input = TickInput {
            up: true,
            ..Default::default()
        };
        // One frame, three steps of catch-up
        session.frame(&input, SIM_DT * 3.0 + 1e-5);
        assert_eq!(session.state.time_ticks, 3);
        assert!((session.state.fuel - (INITIAL_FUEL - FUEL_PER_THRUSTER)).abs() < 1e-4);
    }

    #[test]
    fn test_quit_terminates() {
        let mut session = clear_session();
        let quit = TickInput {
            quit: true,
            ..Default::default()
        };
        assert_eq!(session.frame(&quit, SIM_DT), AppStatus::Terminated);
        assert_eq!(session.frame(&TickInput::default(), SIM_DT), AppStatus::Terminated);
        assert_eq!(session.state.time_ticks, 0);
    }

    #[test]
    fn test_game_over_freezes_world() {
        let mut session = clear_session();
        let hazard = session.state.hazards[0].position;
        session.state.player.position = hazard + Vec3::new(0.0, 0.5, 0.0);
        session.frame(&TickInput::default(), SIM_DT);
        assert_eq!(session.phase(), GamePhase::Lost);

        let frozen = session.state.player.position;
        let fuel = session.state.fuel;
        let thrust = TickInput {
            up: true,
            ..Default::default()
        };
        for _ in 0..10 {
            session.frame(&thrust, SIM_DT);
        }
        assert_eq!(session.state.player.position, frozen);
        assert_eq!(session.state.fuel, fuel);
    }

    #[test]
    fn test_restart_only_when_over() {
        let mut session = clear_session();
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        for _ in 0..5 {
            session.frame(&TickInput::default(), SIM_DT);
        }
        session.frame(&restart, 0.0);
        assert_ne!(session.state.player.position, INITIAL_PLAYER_POSITION);

        session.state.phase = GamePhase::Lost;
        session.state.fuel = -0.3;
        session.frame(&restart, 0.0);
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.state.fuel, INITIAL_FUEL);
        assert_eq!(session.state.player.position, INITIAL_PLAYER_POSITION);
        assert_eq!(session.state.player.velocity, Vec3::ZERO);
        assert_eq!(session.state.player.acceleration, Vec3::new(0.0, GRAVITY, 0.0));
        assert_eq!(session.clock.accumulator(), 0.0);
    }

    #[test]
    fn test_descent_lands_on_platform() {
        let mut session = clear_session();
        let pad = session.state.platforms[0].position;
        session.state.player.position = Vec3::new(pad.x, pad.y + 2.0, 0.0);

        for _ in 0..600 {
            session.frame(&TickInput::default(), SIM_DT);
            if session.phase().is_game_over() {
                break;
            }
        }
        assert_eq!(session.phase(), GamePhase::Won);
    }

    proptest! {
        #[test]
        fn prop_simulated_time_matches_elapsed(
            deltas in proptest::collection::vec(0.0f32..0.05, 1..200)
        ) {
            let mut clock = FixedTimestep::default();
            let mut steps = 0u32;
            let mut elapsed = 0.0f64;
            for dt in &deltas {
                steps += clock.advance(*dt);
                elapsed += *dt as f64;
            }
            let simulated = steps as f64 * SIM_DT as f64;
            let carried = clock.accumulator() as f64;

            prop_assert!(carried >= 0.0 && carried < SIM_DT as f64);
            prop_assert!((simulated + carried - elapsed).abs() < 1e-3);
        }
    }
}
