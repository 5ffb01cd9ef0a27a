//! Serving-size scaling.
//!
//! Every ingredient weight is multiplied by `target / original`. Results keep
//! full precision; rounding to one decimal only happens for display.

use crate::types::{Ingredient, Recipe};

/// An ingredient with its weight adjusted for a target serving count.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledIngredient {
    pub name: String,
    /// Unrounded grams
    pub weight: f64,
}

impl ScaledIngredient {
    /// Weight rounded to one decimal place, matching the displayed value.
    pub fn rounded_weight(&self) -> f64 {
        round_to_tenth(self.weight)
    }

    /// Weight formatted for display, e.g. "16.7".
    pub fn display_weight(&self) -> String {
        format_weight(self.weight)
    }
}

/// A recipe's ingredients scaled for a target serving count.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledRecipe {
    pub original_servings: f64,
    pub target_servings: f64,
    pub ratio: f64,
    pub ingredients: Vec<ScaledIngredient>,
}

/// Serving count used as the divisor. Zero, negative or non-finite counts become 1.
fn effective_original(original: f64) -> f64 {
    if original.is_finite() && original > 0.0 {
        original
    } else {
        1.0
    }
}

/// Ratio applied to every weight: `target / original`.
///
/// An invalid original is treated as 1. An invalid target falls back to the
/// original, giving a ratio of 1.
pub fn scaling_ratio(original_servings: f64, target_servings: f64) -> f64 {
    let original = effective_original(original_servings);
    if target_servings.is_finite() && target_servings > 0.0 {
        target_servings / original
    } else {
        1.0
    }
}

pub fn scale(
    ingredients: &[Ingredient],
    original_servings: f64,
    target_servings: f64,
) -> Vec<ScaledIngredient> {
    let ratio = scaling_ratio(original_servings, target_servings);
    ingredients
        .iter()
        .map(|ingredient| ScaledIngredient {
            name: ingredient.name.clone(),
            weight: ingredient.weight * ratio,
        })
        .collect()
}

/// Scale a stored recipe from its baseline servings to `target_servings`.
pub fn scale_recipe(recipe: &Recipe, target_servings: f64) -> ScaledRecipe {
    let original = effective_original(f64::from(recipe.servings));
    let ratio = scaling_ratio(original, target_servings);
    ScaledRecipe {
        original_servings: original,
        target_servings: original * ratio,
        ratio,
        ingredients: scale(&recipe.ingredients, original, target_servings),
    }
}

pub fn round_to_tenth(value: f64) -> f64 {
    format_weight(value).parse().unwrap_or(value)
}

/// One decimal place, e.g. "200.0".
///
/// Rounds the exact binary value, so 1.15 (stored as 1.1499..) shows as "1.1".
/// Exact ties such as 0.25 round up.
pub fn format_weight(grams: f64) -> String {
    let quarters = grams * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        return format!("{:.1}", grams + 0.05);
    }
    format!("{:.1}", grams)
}

/// Two decimal places with an `x` suffix, e.g. "0.33x".
pub fn format_ratio(ratio: f64) -> String {
    format!("{:.2}x", ratio)
}

/// Serving count without a trailing ".0" for whole numbers.
pub fn format_servings(servings: f64) -> String {
    if servings.fract() == 0.0 {
        format!("{}", servings as i64)
    } else {
        format!("{}", servings)
    }
}
