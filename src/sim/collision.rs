//! Axis-aligned box collision detection and response
//!
//! Boxes are `width x height` centered on the entity position. Overlap is
//! strict: touching edges do not collide, and NaN or zero-sized boxes never
//! collide with anything.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Penetration below this is treated as resting contact on the other axis.
/// Keeps the X pass from re-resolving a box the Y pass just snapped flush.
pub const CONTACT_SLOP: f32 = 1e-5;

/// Sides of an entity that touched something during the last update
///
/// `bottom` means this entity's bottom edge hit something: it is resting on
/// top of the other box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CollisionFlags {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl CollisionFlags {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn any(&self) -> bool {
        self.top || self.bottom || self.left || self.right
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb {
    pub fn new(center: Vec3, width: f32, height: f32) -> Self {
        Self {
            center: center.truncate(),
            half_extents: Vec2::new(width, height) * 0.5,
        }
    }

    /// Penetration depth on each axis; positive on both means overlap
    #[inline]
    pub fn penetration(&self, other: &Aabb) -> Vec2 {
        (self.half_extents + other.half_extents) - (self.center - other.center).abs()
    }

    /// Strict overlap; a box with no area on either axis overlaps nothing
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        if !self.has_area() || !other.has_area() {
            return false;
        }
        let p = self.penetration(other);
        p.x > 0.0 && p.y > 0.0
    }

    #[inline]
    pub fn has_area(&self) -> bool {
        self.half_extents.cmpgt(Vec2::ZERO).all()
    }
}

impl Entity {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.position, self.width, self.height)
    }

    /// Whether the two boxes overlap on both axes
    pub fn check_collision(&self, other: &Entity) -> bool {
        if !self.is_active || !other.is_active || std::ptr::eq(self, other) {
            return false;
        }
        self.aabb().overlaps(&other.aabb())
    }

    /// Push out of every overlapping obstacle along Y
    ///
    /// An obstacle whose center is above ours stops us from below (`top`),
    /// otherwise we land on it (`bottom`).
    pub fn check_collision_y(&mut self, obstacles: &[Entity]) {
        for other in obstacles {
            let (ours, theirs) = (self.aabb(), other.aabb());
            if !other.is_active || !ours.has_area() || !theirs.has_area() {
                continue;
            }
            let pen = ours.penetration(&theirs);
            if !(pen.y > 0.0 && pen.x > CONTACT_SLOP) {
                continue;
            }

            let reach = (self.height + other.height) * 0.5;
            if self.position.y < other.position.y {
                self.position.y = other.position.y - reach;
                self.collisions.top = true;
            } else {
                self.position.y = other.position.y + reach;
                self.collisions.bottom = true;
            }
            self.velocity.y = 0.0;
        }
    }

    /// Push out of every overlapping obstacle along X
    pub fn check_collision_x(&mut self, obstacles: &[Entity]) {
        for other in obstacles {
            let (ours, theirs) = (self.aabb(), other.aabb());
            if !other.is_active || !ours.has_area() || !theirs.has_area() {
                continue;
            }
            let pen = ours.penetration(&theirs);
            if !(pen.x > 0.0 && pen.y > CONTACT_SLOP) {
                continue;
            }

            let reach = (self.width + other.width) * 0.5;
            if self.position.x < other.position.x {
                self.position.x = other.position.x - reach;
                self.collisions.right = true;
            } else {
                self.position.x = other.position.x + reach;
                self.collisions.left = true;
            }
            self.velocity.x = 0.0;
        }
    }
}
