//! Session state and world construction
//!
//! The session owns every entity. Platforms and hazards are placed once from
//! the layout seed and never change; restart only rewinds the lander and fuel.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind};
use crate::assets::{SpriteSet, TextureId};
use crate::consts::*;
use crate::gravity_vector;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Descending, physics running
    #[default]
    Playing,
    /// Touched down on a platform
    Won,
    /// Touched a hazard
    Lost,
}

impl GamePhase {
    pub fn is_game_over(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the terrain layout was generated from
    pub seed: u64,
    pub phase: GamePhase,
    /// May dip slightly below zero on the last burn
    pub fuel: f32,
    pub player: Entity,
    pub platforms: Vec<Entity>,
    pub hazards: Vec<Entity>,
    pub background: Entity,
    /// Simulation steps since the last (re)start
    pub time_ticks: u64,
}

impl GameState {
    /// Build a fresh session with a layout drawn from `seed`
    pub fn new(seed: u64, sprites: &SpriteSet) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        let platforms = (0..PLATFORM_COUNT)
            .map(|_| {
                obstacle(
                    &mut rng,
                    EntityKind::Platform,
                    PLATFORM_BASE_Y,
                    sprites.platform,
                )
            })
            .collect();
        let hazards = (0..HAZARD_COUNT)
            .map(|_| obstacle(&mut rng, EntityKind::Hazard, HAZARD_BASE_Y, sprites.hazard))
            .collect();

        let mut background = Entity::new(EntityKind::Scenery, sprites.background)
            .with_scale(Vec3::new(VIEW_HALF_WIDTH * 2.0, VIEW_HALF_HEIGHT * 2.0, 1.0));
        background.refresh_transform();

        let mut player = Entity::new(EntityKind::Player, sprites.lander)
            .with_position(INITIAL_PLAYER_POSITION)
            .with_box(PLAYER_SIZE.0, PLAYER_SIZE.1)
            .with_scale(Vec3::new(PLAYER_SIZE.0, PLAYER_SIZE.1, 1.0))
            .with_speed(1.0)
            .with_acceleration(gravity_vector());
        player.refresh_transform();

        Self {
            seed,
            phase: GamePhase::Playing,
            fuel: INITIAL_FUEL,
            player,
            platforms,
            hazards,
            background,
            time_ticks: 0,
        }
    }

    /// Rewind to the initial condition without rebuilding the world
    pub fn restart(&mut self) {
        self.fuel = INITIAL_FUEL;
        self.phase = GamePhase::Playing;
        self.time_ticks = 0;

        self.player.position = INITIAL_PLAYER_POSITION;
        self.player.velocity = Vec3::ZERO;
        self.player.acceleration = gravity_vector();
        self.player.movement = Vec3::ZERO;
        self.player.collisions.clear();
        self.player.refresh_transform();
    }

    /// Trivial update for non-player entities: matrices only
    pub fn refresh_scenery(&mut self) {
        for entity in self.platforms.iter_mut().chain(self.hazards.iter_mut()) {
            if entity.is_active {
                entity.refresh_transform();
            }
        }
    }
}

/// Place one platform or hazard on the integer column grid
fn obstacle(rng: &mut Pcg32, kind: EntityKind, base_y: f32, texture: TextureId) -> Entity {
    let x = (rng.random_range(0..COLUMN_CHOICES) - COLUMN_CHOICES / 2) as f32;
    let y = base_y + rng.random_range(0..ROW_CHOICES) as f32 * ROW_SPACING;

    let mut entity = Entity::new(kind, texture)
        .with_position(Vec3::new(x, y, 0.0))
        .with_box(OBSTACLE_SIZE.0, OBSTACLE_SIZE.1)
        .with_scale(Vec3::new(OBSTACLE_SIZE.0, OBSTACLE_SIZE.1, 1.0));
    entity.refresh_transform();
    entity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let state = GameState::new(7, &SpriteSet::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.fuel, INITIAL_FUEL);
        assert_eq!(state.platforms.len(), PLATFORM_COUNT);
        assert_eq!(state.hazards.len(), HAZARD_COUNT);
        assert_eq!(state.player.position, INITIAL_PLAYER_POSITION);
        assert_eq!(state.player.acceleration, Vec3::new(0.0, GRAVITY, 0.0));
        assert_eq!((state.player.width, state.player.height), PLAYER_SIZE);
    }

    #[test]
    fn test_layout_rows_and_columns() {
        for seed in 0..20 {
            let state = GameState::new(seed, &SpriteSet::default());
            for p in &state.platforms {
                assert!(p.position.x >= -5.0 && p.position.x <= 4.0);
                assert_eq!(p.position.x.fract(), 0.0);
                assert!([-3.0, -2.5, -2.0].contains(&p.position.y));
                assert_eq!((p.width, p.height), OBSTACLE_SIZE);
            }
            for h in &state.hazards {
                assert!([-3.5, -3.0, -2.5].contains(&h.position.y));
            }
        }
    }

    #[test]
    fn test_layout_is_deterministic() {
        let a = GameState::new(4242, &SpriteSet::default());
        let b = GameState::new(4242, &SpriteSet::default());
        for (pa, pb) in a.platforms.iter().zip(&b.platforms) {
            assert_eq!(pa.position, pb.position);
        }
        for (ha, hb) in a.hazards.iter().zip(&b.hazards) {
            assert_eq!(ha.position, hb.position);
        }
    }

    #[test]
    fn test_restart_from_lost() {
        let mut state = GameState::new(1, &SpriteSet::default());
        let platforms_before: Vec<_> = state.platforms.iter().map(|p| p.position).collect();

        state.phase = GamePhase::Lost;
        state.fuel = -0.3;
        state.player.position = Vec3::new(3.0, -3.2, 0.0);
        state.player.velocity = Vec3::new(0.4, -1.2, 0.0);
        state.player.acceleration = Vec3::new(2.0, 2.0, 0.0);

        state.restart();

        assert_eq!(state.fuel, INITIAL_FUEL);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.position, INITIAL_PLAYER_POSITION);
        assert_eq!(state.player.velocity, Vec3::ZERO);
        assert_eq!(state.player.acceleration, Vec3::new(0.0, GRAVITY, 0.0));
        let platforms_after: Vec<_> = state.platforms.iter().map(|p| p.position).collect();
        assert_eq!(platforms_before, platforms_after);
    }

    #[test]
    fn test_game_over_phases() {
        assert!(!GamePhase::Playing.is_game_over());
        assert!(GamePhase::Won.is_game_over());
        assert!(GamePhase::Lost.is_game_over());
    }
}
