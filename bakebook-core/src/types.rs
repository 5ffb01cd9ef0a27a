use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single ingredient, always measured in grams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    /// Weight in grams
    pub weight: f64,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }

    /// A row the form drops before saving.
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty() || self.weight.is_nan() || self.weight <= 0.0
    }
}

/// A stored recipe. Serialized with camelCase keys to match the persisted layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Minutes
    pub prep_time: f64,
    /// Minutes
    pub bake_time: f64,
    /// Degrees Fahrenheit
    pub temperature: f64,
    /// Baseline serving count the stored weights correspond to
    pub servings: u32,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub thumbnail: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The mutable part of a recipe: everything except id, thumbnail and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeFields {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub prep_time: f64,
    pub bake_time: f64,
    pub temperature: f64,
    pub servings: u32,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
}

impl Recipe {
    /// Build a new record from validated fields plus the values assigned at creation.
    pub fn from_fields(
        id: String,
        thumbnail: String,
        now: DateTime<Utc>,
        fields: RecipeFields,
    ) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            prep_time: fields.prep_time,
            bake_time: fields.bake_time,
            temperature: fields.temperature,
            servings: fields.servings,
            ingredients: fields.ingredients,
            instructions: fields.instructions,
            thumbnail,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn fields(&self) -> RecipeFields {
        RecipeFields {
            name: self.name.clone(),
            description: self.description.clone(),
            prep_time: self.prep_time,
            bake_time: self.bake_time,
            temperature: self.temperature,
            servings: self.servings,
            ingredients: self.ingredients.clone(),
            instructions: self.instructions.clone(),
        }
    }

    /// Replace every mutable field. id, thumbnail and created_at are untouched.
    pub fn replace_fields(&mut self, fields: RecipeFields, now: DateTime<Utc>) {
        self.name = fields.name;
        self.description = fields.description;
        self.prep_time = fields.prep_time;
        self.bake_time = fields.bake_time;
        self.temperature = fields.temperature;
        self.servings = fields.servings;
        self.ingredients = fields.ingredients;
        self.instructions = fields.instructions;
        self.updated_at = now;
    }
}
