//! Paints a card layout onto an opaque RGB canvas.

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::{Rgb, RgbImage};

use super::layout::{CardLayout, PaintCommand, GLYPH_SIZE};
use crate::error::ExportError;

/// Largest canvas we are willing to allocate, in physical pixels.
pub const MAX_CARD_PIXELS: u64 = 64_000_000;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Bitmap for `ch`, falling back to '?' for characters the font lacks.
fn glyph(ch: char) -> [u8; 8] {
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

/// Fill a rectangle given in physical pixels, clipped to the canvas.
fn fill_rect(canvas: &mut RgbImage, x: u32, y: u32, width: u32, height: u32, color: Rgb<u8>) {
    let x_end = x.saturating_add(width).min(canvas.width());
    let y_end = y.saturating_add(height).min(canvas.height());
    for py in y..y_end {
        for px in x..x_end {
            canvas.put_pixel(px, py, color);
        }
    }
}

fn draw_text(
    canvas: &mut RgbImage,
    x: u32,
    y: u32,
    text: &str,
    cell: u32,
    color: Rgb<u8>,
) {
    for (i, ch) in text.chars().enumerate() {
        let origin_x = x + i as u32 * GLYPH_SIZE * cell;
        for (row, bits) in glyph(ch).iter().enumerate() {
            for col in 0..GLYPH_SIZE {
                // Bit 0 is the leftmost pixel of the row.
                if bits & (1 << col) != 0 {
                    fill_rect(
                        canvas,
                        origin_x + col * cell,
                        y + row as u32 * cell,
                        cell,
                        cell,
                        color,
                    );
                }
            }
        }
    }
}

/// Tallest logical height that fits the pixel budget at `width` and `density`.
pub fn max_card_height(width: u32, density: u32) -> u32 {
    let row = u64::from(width.max(1)) * u64::from(density.max(1)).pow(2);
    u32::try_from(MAX_CARD_PIXELS / row).unwrap_or(u32::MAX)
}

/// Rasterize `layout` at `density` physical pixels per logical pixel on a white background.
pub fn rasterize(layout: &CardLayout, density: u32) -> Result<RgbImage, ExportError> {
    let density = density.max(1);
    let max = max_card_height(layout.width, density);
    if layout.height > max {
        return Err(ExportError::TooLarge {
            height: layout.height,
            max,
        });
    }

    let mut canvas = RgbImage::from_pixel(layout.width * density, layout.height * density, BACKGROUND);

    for command in &layout.commands {
        match command {
            PaintCommand::SolidRect {
                x,
                y,
                width,
                height,
                color,
            } => fill_rect(
                &mut canvas,
                x * density,
                y * density,
                width * density,
                height * density,
                Rgb(*color),
            ),
            PaintCommand::Text {
                x,
                y,
                text,
                scale,
                color,
            } => draw_text(
                &mut canvas,
                x * density,
                y * density,
                text,
                scale * density,
                Rgb(*color),
            ),
        }
    }

    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(commands: Vec<PaintCommand>) -> CardLayout {
        CardLayout {
            width: 40,
            height: 20,
            commands,
        }
    }

    #[test]
    fn test_empty_layout_is_white() {
        let canvas = rasterize(&layout(vec![]), 2).unwrap();
        assert_eq!(canvas.dimensions(), (80, 40));
        assert!(canvas.pixels().all(|p| *p == BACKGROUND));
    }

    #[test]
    fn test_rect_scaled_by_density() {
        let canvas = rasterize(
            &layout(vec![PaintCommand::SolidRect {
                x: 1,
                y: 1,
                width: 2,
                height: 2,
                color: [255, 0, 0],
            }]),
            2,
        )
        .unwrap();

        assert_eq!(*canvas.get_pixel(1, 1), BACKGROUND);
        assert_eq!(*canvas.get_pixel(2, 2), Rgb([255, 0, 0]));
        assert_eq!(*canvas.get_pixel(5, 5), Rgb([255, 0, 0]));
        assert_eq!(*canvas.get_pixel(6, 6), BACKGROUND);
    }

    #[test]
    fn test_text_is_clipped_not_panicking() {
        let canvas = rasterize(
            &layout(vec![PaintCommand::Text {
                x: 30,
                y: 15,
                text: "overflowing text".to_string(),
                scale: 2,
                color: [0, 0, 0],
            }]),
            2,
        )
        .unwrap();

        assert!(canvas.pixels().any(|p| *p == Rgb([0, 0, 0])));
    }

    #[test]
    fn test_budget_scales_with_width() {
        assert_eq!(max_card_height(800, 2), 20_000);
        assert_eq!(max_card_height(10, 2), 1_600_000);
        assert_eq!(max_card_height(0, 0), 64_000_000);
    }

    #[test]
    fn test_over_budget_rejected() {
        let tall = CardLayout {
            width: 800,
            height: max_card_height(800, 2) + 1,
            commands: vec![],
        };
        assert!(matches!(
            rasterize(&tall, 2),
            Err(ExportError::TooLarge { height: 20_001, max: 20_000 })
        ));
    }

    #[test]
    fn test_unknown_glyph_falls_back() {
        assert_eq!(glyph('\u{4e2d}'), BASIC_FONTS.get('?').unwrap());
        assert_ne!(glyph('\u{b0}'), [0; 8]);
    }
}
