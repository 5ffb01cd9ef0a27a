//! Recipe card layout, expressed as paint commands in logical pixels.

use crate::scale::{format_ratio, format_servings, scale_recipe};
use crate::types::Recipe;

/// Logical width of every card.
pub const CARD_WIDTH: u32 = 800;
pub const PADDING: u32 = 40;
/// Glyph cell size of the bitmap font at scale 1.
pub const GLYPH_SIZE: u32 = 8;

const TITLE_SCALE: u32 = 4;
const BODY_SCALE: u32 = 2;
const FOOTER_SCALE: u32 = 1;

pub type Rgb = [u8; 3];

const INK: Rgb = [33, 33, 33];
const MUTED: Rgb = [110, 110, 110];
const ACCENT: Rgb = [180, 83, 9];
const RULE: Rgb = [229, 221, 210];

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    SolidRect {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        color: Rgb,
    },
    Text {
        x: u32,
        y: u32,
        text: String,
        scale: u32,
        color: Rgb,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<PaintCommand>,
}

/// Width in logical pixels of `text` drawn at `scale`.
pub fn text_width(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * GLYPH_SIZE * scale
}

/// Greedy word wrap to at most `max_chars` characters per line.
/// Words longer than a line are split.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > max_chars {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };
        if needed > max_chars && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Tracks the vertical cursor while commands are appended top to bottom.
struct CardBuilder {
    y: u32,
    commands: Vec<PaintCommand>,
}

impl CardBuilder {
    fn line_height(scale: u32) -> u32 {
        GLYPH_SIZE * scale + scale * 4
    }

    fn max_chars(scale: u32, indent: u32, reserve: u32) -> usize {
        let room = (CARD_WIDTH - 2 * PADDING).saturating_sub(indent + reserve);
        (room / (GLYPH_SIZE * scale)) as usize
    }

    fn text(&mut self, x: u32, text: impl Into<String>, scale: u32, color: Rgb) {
        self.commands.push(PaintCommand::Text {
            x,
            y: self.y,
            text: text.into(),
            scale,
            color,
        });
    }

    /// Wrapped paragraph starting at `PADDING + indent`.
    fn paragraph(&mut self, text: &str, scale: u32, indent: u32, color: Rgb) {
        self.paragraph_reserving(text, scale, indent, 0, color);
    }

    /// Wrapped paragraph that leaves `reserve` pixels free at the right edge.
    fn paragraph_reserving(
        &mut self,
        text: &str,
        scale: u32,
        indent: u32,
        reserve: u32,
        color: Rgb,
    ) {
        for line in wrap_text(text, Self::max_chars(scale, indent, reserve)) {
            self.text(PADDING + indent, line, scale, color);
            self.y += Self::line_height(scale);
        }
    }

    fn rule(&mut self) {
        self.y += 12;
        self.commands.push(PaintCommand::SolidRect {
            x: PADDING,
            y: self.y,
            width: CARD_WIDTH - 2 * PADDING,
            height: 2,
            color: RULE,
        });
        self.y += 2 + 20;
    }

    fn gap(&mut self, px: u32) {
        self.y += px;
    }
}

fn format_minutes(minutes: f64) -> String {
    format!("{} min", format_servings(minutes))
}

/// Lay out the card for `recipe` with ingredient weights scaled to `target_servings`.
pub fn layout_card(recipe: &Recipe, target_servings: f64) -> CardLayout {
    let scaled = scale_recipe(recipe, target_servings);
    let mut card = CardBuilder {
        y: PADDING,
        commands: Vec::new(),
    };

    card.paragraph(&recipe.name, TITLE_SCALE, 0, INK);

    if let Some(description) = recipe
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
    {
        card.gap(4);
        card.paragraph(description, BODY_SCALE, 0, MUTED);
    }

    card.gap(8);
    let facts = format!(
        "Prep {} | Bake {} | {}\u{b0}F | Serves {}",
        format_minutes(recipe.prep_time),
        format_minutes(recipe.bake_time),
        format_servings(recipe.temperature),
        recipe.servings
    );
    card.paragraph(&facts, BODY_SCALE, 0, MUTED);

    card.rule();
    card.paragraph(
        &format!(
            "Ingredients for {} servings ({})",
            format_servings(scaled.target_servings),
            format_ratio(scaled.ratio)
        ),
        BODY_SCALE,
        0,
        ACCENT,
    );
    card.gap(8);

    for ingredient in &scaled.ingredients {
        let weight = format!("{} g", ingredient.display_weight());
        let weight_width = text_width(&weight, BODY_SCALE);
        card.text(
            CARD_WIDTH.saturating_sub(PADDING + weight_width).max(PADDING),
            weight,
            BODY_SCALE,
            INK,
        );
        let reserve = weight_width + GLYPH_SIZE * BODY_SCALE;
        card.paragraph_reserving(&ingredient.name, BODY_SCALE, 0, reserve, INK);
    }

    card.rule();
    card.paragraph("Instructions", BODY_SCALE, 0, ACCENT);
    card.gap(8);

    let indent = GLYPH_SIZE * BODY_SCALE * 4;
    for (i, step) in recipe.instructions.iter().enumerate() {
        card.text(PADDING, format!("{}.", i + 1), BODY_SCALE, ACCENT);
        card.paragraph(step, BODY_SCALE, indent, INK);
        card.gap(4);
    }

    card.gap(16);
    card.paragraph("Made with Bakebook", FOOTER_SCALE, 0, MUTED);

    CardLayout {
        width: CARD_WIDTH,
        height: card.y + PADDING,
        commands: card.commands,
    }
}
