//! Physical entities: lander, platforms, hazards, background
//!
//! Every entity owns its kinematic state and a `width x height` collision box
//! centered on `position`. The render quad is sized by `scale` instead, so the
//! two can disagree; content keeps them equal.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::collision::CollisionFlags;
use crate::assets::TextureId;

/// What an entity is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    #[default]
    Platform,
    Hazard,
    Scenery,
}

/// A physical, drawable thing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    /// Frame-local directional intent, cleared after every update
    pub movement: Vec3,
    /// Render quad size
    pub scale: Vec3,
    /// Multiplier on `movement` when it feeds horizontal velocity
    pub speed: f32,
    /// Collision box extents
    pub width: f32,
    pub height: f32,
    pub collisions: CollisionFlags,
    /// Inactive entities are skipped by update, render and collision
    pub is_active: bool,
    pub texture: TextureId,
    /// Translation then scale, refreshed on every update
    #[serde(skip, default = "identity")]
    pub model_matrix: Mat4,
}

fn identity() -> Mat4 {
    Mat4::IDENTITY
}

impl Entity {
    pub fn new(kind: EntityKind, texture: TextureId) -> Self {
        Self {
            kind,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            movement: Vec3::ZERO,
            scale: Vec3::ONE,
            speed: 0.0,
            width: 1.0,
            height: 1.0,
            collisions: CollisionFlags::default(),
            is_active: true,
            texture,
            model_matrix: Mat4::IDENTITY,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Set the collision box
    pub fn with_box(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_acceleration(mut self, acceleration: Vec3) -> Self {
        self.acceleration = acceleration;
        self
    }

    pub fn move_left(&mut self) {
        self.movement.x = -1.0;
    }

    pub fn move_right(&mut self) {
        self.movement.x = 1.0;
    }

    pub fn move_up(&mut self) {
        self.movement.y = 1.0;
    }

    pub fn move_down(&mut self) {
        self.movement.y = -1.0;
    }

    /// Rebuild the model matrix from position and scale (no rotation)
    pub fn refresh_transform(&mut self) {
        self.model_matrix = Mat4::from_translation(self.position) * Mat4::from_scale(self.scale);
    }

    /// Advance by exactly `dt` and resolve against `obstacles`
    ///
    /// Semi-implicit Euler: velocity takes the acceleration first, then the
    /// position moves by the updated velocity. Y is moved and resolved before
    /// X so a landing never reads as a side hit. Flags are cleared even when
    /// there is nothing to collide with.
    pub fn update(&mut self, dt: f32, obstacles: &[Entity]) {
        if !self.is_active {
            return;
        }

        self.collisions.clear();

        self.velocity += self.acceleration * dt;
        let horizontal = self.velocity.x + self.movement.x * self.speed;

        self.position.y += self.velocity.y * dt;
        self.check_collision_y(obstacles);

        self.position.x += horizontal * dt;
        self.check_collision_x(obstacles);

        self.refresh_transform();
        self.movement = Vec3::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn lander() -> Entity {
        Entity::new(EntityKind::Player, TextureId(1))
            .with_position(INITIAL_PLAYER_POSITION)
            .with_box(PLAYER_SIZE.0, PLAYER_SIZE.1)
            .with_speed(1.0)
            .with_acceleration(crate::gravity_vector())
    }

    #[test]
    fn test_single_step_free_fall() {
        let mut e = lander();
        e.update(SIM_DT, &[]);

        assert!((e.velocity.y - (-SIM_DT)).abs() < 1e-7);
        let expected = INITIAL_PLAYER_POSITION.y - SIM_DT * SIM_DT;
        assert!((e.position.y - expected).abs() < 1e-6);
        assert_eq!(e.position.x, 0.0);
    }

    #[test]
    fn test_no_obstacles_clears_flags() {
        let mut e = lander();
        e.collisions.bottom = true;
        e.collisions.left = true;
        e.update(SIM_DT, &[]);
        assert!(!e.collisions.any());
    }

    #[test]
    fn test_movement_is_frame_local() {
        let mut e = lander().with_acceleration(Vec3::ZERO).with_speed(2.0);
        e.move_right();
        e.update(0.5, &[]);
        // 0.5s at movement 1.0 * speed 2.0
        assert!((e.position.x - 1.0).abs() < 1e-6);
        assert_eq!(e.velocity.x, 0.0);
        assert_eq!(e.movement, Vec3::ZERO);

        e.update(0.5, &[]);
        assert!((e.position.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_inactive_entity_does_not_move() {
        let mut e = lander();
        e.is_active = false;
        e.update(SIM_DT, &[]);
        assert_eq!(e.position, INITIAL_PLAYER_POSITION);
        assert_eq!(e.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_transform_tracks_position_and_scale() {
        let mut e = Entity::new(EntityKind::Platform, TextureId(2))
            .with_position(Vec3::new(2.0, -3.0, 0.0))
            .with_scale(Vec3::new(0.5, 0.5, 1.0));
        e.refresh_transform();

        let corner = e.model_matrix.transform_point3(Vec3::new(0.5, 0.5, 0.0));
        assert!((corner - Vec3::new(2.25, -2.75, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_zero_dt_is_identity() {
        let mut e = lander();
        e.update(0.0, &[]);
        assert_eq!(e.position, INITIAL_PLAYER_POSITION);
        assert_eq!(e.velocity, Vec3::ZERO);
    }
}
