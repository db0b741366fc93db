//! Built-in 3x5 bitmap font
//!
//! Each glyph occupies a `font_size` square cell; glyph `i` is centered at
//! `anchor.x + (font_size + spacing) * i`. Lit font pixels become small squares
//! that the quad batch fills with the font tint.

use glam::{Vec2, Vec3};

const GLYPH_COLS: usize = 3;
const GLYPH_ROWS: usize = 5;

/// One lit font pixel in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPixel {
    pub center: Vec2,
    pub size: f32,
}

/// Rows top to bottom, leftmost column in the high bit
fn glyph(c: char) -> [u8; GLYPH_ROWS] {
    match c.to_ascii_uppercase() {
        ' ' => [0; 5],
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b011, 0b100, 0b100, 0b100, 0b011],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b011, 0b100, 0b101, 0b101, 0b011],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b110, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b010, 0b101, 0b101, 0b101, 0b010],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' => [0b010, 0b101, 0b101, 0b110, 0b011],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b011, 0b100, 0b010, 0b001, 0b110],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b110, 0b001, 0b010, 0b100, 0b111],
        '3' => [0b110, 0b001, 0b010, 0b001, 0b110],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b110, 0b001, 0b110],
        '6' => [0b011, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b110],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        // Hollow box for anything the font lacks
        _ => [0b111, 0b101, 0b101, 0b101, 0b111],
    }
}

/// Horizontal distance between consecutive glyph centers
#[inline]
pub fn advance(font_size: f32, spacing: f32) -> f32 {
    font_size + spacing
}

/// Lay out `text` as lit pixels
pub fn layout(text: &str, font_size: f32, spacing: f32, anchor: Vec3) -> Vec<TextPixel> {
    let pixel = font_size / GLYPH_ROWS as f32;
    let mut pixels = Vec::new();

    for (i, c) in text.chars().enumerate() {
        let center_x = anchor.x + advance(font_size, spacing) * i as f32;
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..GLYPH_COLS {
                if bits & (1 << (GLYPH_COLS - 1 - col)) == 0 {
                    continue;
                }
                let x = center_x + (col as f32 - 1.0) * pixel;
                let y = anchor.y + (2.0 - row as f32) * pixel;
                pixels.push(TextPixel {
                    center: Vec2::new(x, y),
                    size: pixel,
                });
            }
        }
    }

    pixels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_is_blank() {
        assert!(layout("   ", 0.3, 0.01, Vec3::ZERO).is_empty());
    }

    #[test]
    fn test_glyph_pixel_count() {
        // 'I' lights 3 + 1 + 1 + 1 + 3
        assert_eq!(layout("I", 0.5, 0.0, Vec3::ZERO).len(), 9);
        assert_eq!(layout("i", 0.5, 0.0, Vec3::ZERO).len(), 9);
    }

    #[test]
    fn test_glyphs_advance() {
        let one = layout("-", 0.3, 0.01, Vec3::ZERO);
        let two = layout(" -", 0.3, 0.01, Vec3::ZERO);
        assert_eq!(one.len(), two.len());
        let dx = two[0].center.x - one[0].center.x;
        assert!((dx - 0.31).abs() < 1e-6);
    }

    #[test]
    fn test_glyph_fits_cell() {
        let anchor = Vec3::new(-4.75, 3.5, 0.0);
        let size = 0.3;
        for p in layout("8", size, 0.01, anchor) {
            assert!((p.center.x - anchor.x).abs() + p.size / 2.0 <= size / 2.0 + 1e-6);
            assert!((p.center.y - anchor.y).abs() + p.size / 2.0 <= size / 2.0 + 1e-6);
        }
    }

    #[test]
    fn test_unknown_char_draws_box() {
        assert_eq!(layout("#", 0.5, 0.0, Vec3::ZERO).len(), 12);
    }
}
