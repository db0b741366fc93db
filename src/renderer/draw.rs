//! Scene draw ordering
//!
//! The simulation never talks to the GPU. It emits sprite and text commands
//! to a [`Canvas`] in a fixed back-to-front order.

use glam::{Mat4, Vec3};

use crate::assets::TextureId;
use crate::sim::{Entity, GamePhase, GameState};

pub const HUD_FONT_SIZE: f32 = 0.3;
pub const HUD_SPACING: f32 = 0.01;
pub const FUEL_ANCHOR: Vec3 = Vec3::new(-4.75, 3.5, 0.0);
pub const BANNER_ANCHOR: Vec3 = Vec3::new(-2.5, 1.0, 0.0);
pub const PROMPT_ANCHOR: Vec3 = Vec3::new(-2.5, 0.0, 0.0);

pub const WIN_BANNER: &str = "Mission Accomplished!";
pub const LOSE_BANNER: &str = "Mission Failed!";
pub const RESTART_PROMPT: &str = "Press R to restart";

/// Something that can draw textured quads and text
pub trait Canvas {
    /// Draw a unit quad transformed by `transform`
    fn draw_sprite(&mut self, transform: &Mat4, texture: TextureId);

    /// Draw `text` with glyph `i` centered at `anchor + (font_size + spacing) * i`
    fn draw_text(&mut self, text: &str, font_size: f32, spacing: f32, anchor: Vec3);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite {
        transform: Mat4,
        texture: TextureId,
    },
    Text {
        text: String,
        font_size: f32,
        spacing: f32,
        anchor: Vec3,
    },
}

/// Canvas that just records commands
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// All text strings, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            DrawCommand::Sprite { .. } => None,
        })
    }
}

impl Canvas for DrawList {
    fn draw_sprite(&mut self, transform: &Mat4, texture: TextureId) {
        self.commands.push(DrawCommand::Sprite {
            transform: *transform,
            texture,
        });
    }

    fn draw_text(&mut self, text: &str, font_size: f32, spacing: f32, anchor: Vec3) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            font_size,
            spacing,
            anchor,
        });
    }
}

/// Fuel readout, rounded down and never shown below zero
pub fn fuel_label(fuel: f32) -> String {
    format!("Fuel: {}", fuel.max(0.0).floor() as i32)
}

fn draw_entity(canvas: &mut impl Canvas, entity: &Entity) {
    if entity.is_active {
        canvas.draw_sprite(&entity.model_matrix, entity.texture);
    }
}

/// Emit the whole frame: background, hazards, platforms, HUD, banners, lander
pub fn render_scene(state: &GameState, canvas: &mut impl Canvas) {
    draw_entity(canvas, &state.background);

    for hazard in &state.hazards {
        draw_entity(canvas, hazard);
    }
    for platform in &state.platforms {
        draw_entity(canvas, platform);
    }

    canvas.draw_text(&fuel_label(state.fuel), HUD_FONT_SIZE, HUD_SPACING, FUEL_ANCHOR);

    let banner = match state.phase {
        GamePhase::Won => Some(WIN_BANNER),
        GamePhase::Lost => Some(LOSE_BANNER),
        GamePhase::Playing => None,
    };
    if let Some(banner) = banner {
        canvas.draw_text(banner, HUD_FONT_SIZE, HUD_SPACING, BANNER_ANCHOR);
        canvas.draw_text(RESTART_PROMPT, HUD_FONT_SIZE, HUD_SPACING, PROMPT_ANCHOR);
    }

    draw_entity(canvas, &state.player);
}
