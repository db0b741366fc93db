//! Triangle generation for sprites and text

use glam::{Mat4, Vec2, Vec3};

use super::draw::Canvas;
use super::text;
use super::vertex::Vertex;
use crate::assets::{Assets, TextureId};

/// Unit quad corners, two counter-clockwise triangles
const UNIT_QUAD: [Vec2; 6] = [
    Vec2::new(-0.5, -0.5),
    Vec2::new(0.5, -0.5),
    Vec2::new(0.5, 0.5),
    Vec2::new(-0.5, -0.5),
    Vec2::new(0.5, 0.5),
    Vec2::new(-0.5, 0.5),
];

/// Generate vertices for a unit quad under `transform`
pub fn sprite_quad(transform: &Mat4, color: [f32; 4]) -> [Vertex; 6] {
    UNIT_QUAD.map(|corner| {
        let p = transform.transform_point3(corner.extend(0.0));
        Vertex::new(p.x, p.y, color)
    })
}

/// Generate vertices for an axis-aligned square
pub fn square(center: Vec2, size: f32, color: [f32; 4]) -> [Vertex; 6] {
    UNIT_QUAD.map(|corner| {
        let p = center + corner * size;
        Vertex::new(p.x, p.y, color)
    })
}

/// Canvas that collects colored triangles for one frame
pub struct QuadBatch<'a> {
    assets: &'a Assets,
    pub vertices: Vec<Vertex>,
}

impl<'a> QuadBatch<'a> {
    pub fn new(assets: &'a Assets) -> Self {
        Self {
            assets,
            vertices: Vec::with_capacity(1024),
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }
}

impl Canvas for QuadBatch<'_> {
    fn draw_sprite(&mut self, transform: &Mat4, texture: TextureId) {
        let color = self.assets.color(texture);
        self.vertices.extend_from_slice(&sprite_quad(transform, color));
    }

    fn draw_text(&mut self, text: &str, font_size: f32, spacing: f32, anchor: Vec3) {
        let color = self.assets.color(self.assets.set.font);
        for pixel in text::layout(text, font_size, spacing, anchor) {
            self.vertices
                .extend_from_slice(&square(pixel.center, pixel.size, color));
        }
    }
}
