//! Recipe card export to PNG.
//!
//! A card is laid out at a fixed logical width, rasterized at 2x pixel density
//! on an opaque white background and encoded as PNG. Export failures never
//! touch recipe state.

mod layout;
mod raster;

pub use layout::{layout_card, wrap_text, CardLayout, PaintCommand, CARD_WIDTH};
pub use raster::{max_card_height, rasterize, MAX_CARD_PIXELS};

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::ImageFormat;

use crate::error::ExportError;
use crate::types::Recipe;

/// Physical pixels per logical pixel.
pub const PIXEL_DENSITY: u32 = 2;

/// A rendered card.
#[derive(Debug, Clone)]
pub struct RenderedCard {
    /// Physical width
    pub width: u32,
    /// Physical height
    pub height: u32,
    pub png: Vec<u8>,
}

/// Result of a completed export.
#[derive(Debug, Clone)]
pub struct ExportedImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub bytes: usize,
}

/// Download filename for a recipe, e.g. "Apple Pie" -> "apple-pie-recipe.png".
pub fn export_filename(recipe_name: &str) -> String {
    let slug = recipe_name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .replace(['/', '\\'], "-");
    format!("{}-recipe.png", slug)
}

/// Lay out, rasterize and encode the card for `recipe` scaled to `target_servings`.
pub fn render_card_png(recipe: &Recipe, target_servings: f64) -> Result<RenderedCard, ExportError> {
    let layout = layout_card(recipe, target_servings);
    let canvas = rasterize(&layout, PIXEL_DENSITY)?;

    let mut buf = Cursor::new(Vec::new());
    canvas.write_to(&mut buf, ImageFormat::Png)?;

    Ok(RenderedCard {
        width: canvas.width(),
        height: canvas.height(),
        png: buf.into_inner(),
    })
}

/// Render the card and write it into `out_dir` as one unit of work.
///
/// Rendering runs on the blocking pool; the caller gets a single completion or failure.
pub async fn export_recipe(
    recipe: &Recipe,
    target_servings: f64,
    out_dir: &Path,
) -> Result<ExportedImage, ExportError> {
    let recipe = recipe.clone();
    let path = out_dir.join(export_filename(&recipe.name));

    tracing::debug!(id = %recipe.id, path = %path.display(), target_servings, "exporting recipe card");

    let card = tokio::task::spawn_blocking(move || render_card_png(&recipe, target_servings))
        .await
        .map_err(|e| ExportError::Task(e.to_string()))??;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| ExportError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
    }
    tokio::fs::write(&path, &card.png)
        .await
        .map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;

    tracing::info!(path = %path.display(), bytes = card.png.len(), "exported recipe card");

    Ok(ExportedImage {
        path,
        width: card.width,
        height: card.height,
        bytes: card.png.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename("Apple Pie"), "apple-pie-recipe.png");
        assert_eq!(
            export_filename("Grandma's  Sourdough\tLoaf"),
            "grandma's-sourdough-loaf-recipe.png"
        );
        assert_eq!(export_filename("Pie 1/2"), "pie-1-2-recipe.png");
    }
}
