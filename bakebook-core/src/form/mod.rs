//! Recipe form state and validation.
//!
//! A form holds raw, possibly invalid input. Submitting it drops blank
//! ingredient and instruction rows, checks the remaining values against the
//! recipe rules and, if they all pass, hands the fields to the store.

mod rows;

pub use rows::RowList;

use crate::error::ValidationErrors;
use crate::store::{BlobStorage, RecipeStore};
use crate::types::{Ingredient, Recipe, RecipeFields};

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 500;
pub const MAX_MINUTES: f64 = 1440.0;
pub const MIN_TEMPERATURE_F: f64 = 200.0;
pub const MAX_TEMPERATURE_F: f64 = 500.0;
pub const MIN_INGREDIENT_WEIGHT: f64 = 0.1;

pub const DEFAULT_TEMPERATURE_F: f64 = 350.0;

/// Whether a submission creates a new recipe or replaces an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(String),
}

/// What a submission did to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(Recipe),
    Updated(Recipe),
    /// The recipe being edited no longer exists.
    NotFound(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeForm {
    pub mode: FormMode,
    pub name: String,
    pub description: String,
    pub prep_time: f64,
    pub bake_time: f64,
    pub temperature: f64,
    pub servings: f64,
    pub ingredients: RowList<Ingredient>,
    pub instructions: RowList<String>,
}

impl Default for RecipeForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeForm {
    /// Blank form for a new recipe: one empty ingredient row and one empty step.
    pub fn new() -> Self {
        Self {
            mode: FormMode::Create,
            name: String::new(),
            description: String::new(),
            prep_time: 0.0,
            bake_time: 0.0,
            temperature: DEFAULT_TEMPERATURE_F,
            servings: 1.0,
            ingredients: RowList::from(vec![Ingredient::new("", 0.0)]),
            instructions: RowList::from(vec![String::new()]),
        }
    }

    /// Form pre-filled from an existing recipe, submitting as an edit.
    pub fn edit(recipe: &Recipe) -> Self {
        Self {
            mode: FormMode::Edit(recipe.id.clone()),
            name: recipe.name.clone(),
            description: recipe.description.clone().unwrap_or_default(),
            prep_time: recipe.prep_time,
            bake_time: recipe.bake_time,
            temperature: recipe.temperature,
            servings: f64::from(recipe.servings),
            ingredients: RowList::from(recipe.ingredients.clone()),
            instructions: RowList::from(recipe.instructions.clone()),
        }
    }

    /// Filter blank rows and validate. On success returns the fields to store.
    pub fn validate(&self) -> Result<RecipeFields, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = self.name.trim();
        let name_len = name.chars().count();
        if name_len < NAME_MIN_LEN {
            errors.add("name", "Recipe name must be at least 3 characters");
        } else if name_len > NAME_MAX_LEN {
            errors.add("name", "Recipe name is too long");
        }

        let description = self.description.trim();
        if description.chars().count() > DESCRIPTION_MAX_LEN {
            errors.add("description", "Description is too long");
        }

        check_minutes(&mut errors, "prepTime", "Prep time", self.prep_time);
        check_minutes(&mut errors, "bakeTime", "Bake time", self.bake_time);

        if !self.temperature.is_finite() {
            errors.add("temperature", "Temperature must be a number");
        } else if self.temperature < MIN_TEMPERATURE_F {
            errors.add("temperature", "Temperature must be at least 200°F");
        } else if self.temperature > MAX_TEMPERATURE_F {
            errors.add("temperature", "Temperature must not exceed 500°F");
        }

        let servings = if !self.servings.is_finite() {
            errors.add("servings", "Servings must be a number");
            None
        } else if self.servings < 1.0 {
            errors.add("servings", "Servings must be at least 1");
            None
        } else if self.servings.fract() != 0.0 || self.servings > f64::from(u32::MAX) {
            errors.add("servings", "Servings must be a whole number");
            None
        } else {
            Some(self.servings as u32)
        };

        let ingredients = self.retained_ingredients(&mut errors);
        let instructions: Vec<String> = self
            .instructions
            .iter()
            .map(|step| step.trim())
            .filter(|step| !step.is_empty())
            .map(str::to_string)
            .collect();
        if instructions.is_empty() {
            errors.add("instructions", "At least one instruction step is required");
        }

        match servings {
            Some(servings) if errors.is_empty() => Ok(RecipeFields {
                name: name.to_string(),
                description: (!description.is_empty()).then(|| description.to_string()),
                prep_time: self.prep_time,
                bake_time: self.bake_time,
                temperature: self.temperature,
                servings,
                ingredients,
                instructions,
            }),
            _ => {
                tracing::debug!(errors = %errors, "recipe form rejected");
                Err(errors)
            }
        }
    }

    /// Drop blank rows, then check each survivor. Errors name the row's position in the form.
    fn retained_ingredients(&self, errors: &mut ValidationErrors) -> Vec<Ingredient> {
        let mut retained = Vec::new();
        for (index, row) in self.ingredients.iter().enumerate() {
            if row.is_blank() {
                continue;
            }
            if !row.weight.is_finite() {
                errors.add(
                    format!("ingredients[{}].weight", index),
                    "Weight must be a number",
                );
            } else if row.weight < MIN_INGREDIENT_WEIGHT {
                errors.add(
                    format!("ingredients[{}].weight", index),
                    "Weight must be at least 0.1g",
                );
            }
            retained.push(Ingredient::new(row.name.trim(), row.weight));
        }

        if retained.is_empty() {
            errors.add("ingredients", "At least one ingredient is required");
        }
        retained
    }

    /// Validate and route to `create` or `update` depending on the form mode.
    pub fn submit<S: BlobStorage>(
        &self,
        store: &mut RecipeStore<S>,
    ) -> Result<SubmitOutcome, ValidationErrors> {
        let fields = self.validate()?;
        Ok(match &self.mode {
            FormMode::Create => SubmitOutcome::Created(store.create(fields)),
            FormMode::Edit(id) => match store.update(id, fields) {
                Some(recipe) => SubmitOutcome::Updated(recipe),
                None => SubmitOutcome::NotFound(id.clone()),
            },
        })
    }
}

fn check_minutes(errors: &mut ValidationErrors, field: &str, label: &str, value: f64) {
    if !value.is_finite() {
        errors.add(field, format!("{} must be a number", label));
    } else if value < 0.0 {
        errors.add(field, format!("{} must be positive", label));
    } else if value > MAX_MINUTES {
        errors.add(field, format!("{} seems unreasonably long", label));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;

    fn valid_form() -> RecipeForm {
        let mut form = RecipeForm::new();
        form.name = "Sugar Cookies".to_string();
        form.servings = 4.0;
        form.ingredients.set(0, Ingredient::new("Sugar", 100.0)).unwrap();
        form.instructions.set(0, "Bake".to_string()).unwrap();
        form
    }

    #[test]
    fn test_defaults() {
        let form = RecipeForm::new();
        assert_eq!(form.mode, FormMode::Create);
        assert_eq!(form.temperature, 350.0);
        assert_eq!(form.servings, 1.0);
        assert_eq!(form.ingredients.len(), 1);
        assert_eq!(form.instructions.len(), 1);
    }

    #[test]
    fn test_blank_form_reports_required_fields() {
        let errors = RecipeForm::new().validate().unwrap_err();

        assert!(errors.message_for("name").is_some());
        assert_eq!(
            errors.message_for("ingredients"),
            Some("At least one ingredient is required")
        );
        assert_eq!(
            errors.message_for("instructions"),
            Some("At least one instruction step is required")
        );
    }

    #[test]
    fn test_blank_rows_are_dropped() {
        let mut form = valid_form();
        form.ingredients.set(0, Ingredient::new("", 0.0)).unwrap();
        form.ingredients.push(Ingredient::new("Flour", 200.0));
        form.instructions.push("   ".to_string());

        let fields = form.validate().unwrap();
        assert_eq!(fields.ingredients, vec![Ingredient::new("Flour", 200.0)]);
        assert_eq!(fields.instructions, vec!["Bake".to_string()]);
        assert_eq!(fields.servings, 4);
    }

    #[test]
    fn test_name_bounds() {
        let mut form = valid_form();
        form.name = "Pi".to_string();
        assert!(form.validate().unwrap_err().message_for("name").is_some());

        form.name = "Pie".to_string();
        assert!(form.validate().is_ok());

        form.name = "x".repeat(100);
        assert!(form.validate().is_ok());

        form.name = "x".repeat(101);
        assert_eq!(
            form.validate().unwrap_err().message_for("name"),
            Some("Recipe name is too long")
        );
    }

    #[test]
    fn test_description_optional_and_bounded() {
        let mut form = valid_form();
        assert_eq!(form.validate().unwrap().description, None);

        form.description = "d".repeat(500);
        assert!(form.validate().is_ok());

        form.description = "d".repeat(501);
        assert!(form
            .validate()
            .unwrap_err()
            .message_for("description")
            .is_some());
    }

    #[test]
    fn test_time_and_temperature_ranges() {
        let mut form = valid_form();
        form.prep_time = 1440.0;
        form.bake_time = 0.0;
        form.temperature = 500.0;
        assert!(form.validate().is_ok());

        form.prep_time = -1.0;
        form.bake_time = 1441.0;
        form.temperature = 199.0;
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.message_for("prepTime"), Some("Prep time must be positive"));
        assert_eq!(
            errors.message_for("bakeTime"),
            Some("Bake time seems unreasonably long")
        );
        assert_eq!(
            errors.message_for("temperature"),
            Some("Temperature must be at least 200°F")
        );
    }

    #[test]
    fn test_servings_must_be_positive_whole() {
        let mut form = valid_form();
        form.servings = 0.0;
        assert_eq!(
            form.validate().unwrap_err().message_for("servings"),
            Some("Servings must be at least 1")
        );

        form.servings = 2.5;
        assert_eq!(
            form.validate().unwrap_err().message_for("servings"),
            Some("Servings must be a whole number")
        );
    }

    #[test]
    fn test_tiny_weight_rejected_with_row_index() {
        let mut form = valid_form();
        form.ingredients.push(Ingredient::new("", 10.0));
        form.ingredients.push(Ingredient::new("Salt", 0.05));

        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.message_for("ingredients[2].weight"),
            Some("Weight must be at least 0.1g")
        );
    }

    #[test]
    fn test_submit_creates_with_only_valid_ingredient() {
        let mut store = RecipeStore::open(MemoryStorage::new());
        let mut form = RecipeForm::new();
        form.name = "Bread".to_string();
        form.servings = 4.0;
        form.ingredients.push(Ingredient::new("Flour", 200.0));
        form.instructions.set(0, "Knead".to_string()).unwrap();

        let SubmitOutcome::Created(recipe) = form.submit(&mut store).unwrap() else {
            panic!("expected a created recipe");
        };
        let stored = store.get(&recipe.id).unwrap();
        assert_eq!(stored.ingredients, vec![Ingredient::new("Flour", 200.0)]);
        assert_eq!(stored.servings, 4);
    }

    #[test]
    fn test_submit_edit_routes_to_update() {
        let mut store = RecipeStore::open(MemoryStorage::new());
        let SubmitOutcome::Created(recipe) = valid_form().submit(&mut store).unwrap() else {
            panic!("expected a created recipe");
        };

        let mut form = RecipeForm::edit(&recipe);
        form.servings = 8.0;
        form.instructions.insert(0, "Preheat".to_string()).unwrap();

        let SubmitOutcome::Updated(updated) = form.submit(&mut store).unwrap() else {
            panic!("expected an update");
        };
        assert_eq!(updated.id, recipe.id);
        assert_eq!(updated.servings, 8);
        assert_eq!(updated.instructions, vec!["Preheat", "Bake"]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_submit_edit_of_deleted_recipe() {
        let mut store = RecipeStore::open(MemoryStorage::new());
        let SubmitOutcome::Created(recipe) = valid_form().submit(&mut store).unwrap() else {
            panic!("expected a created recipe");
        };
        let form = RecipeForm::edit(&recipe);
        store.delete(&recipe.id);

        assert_eq!(
            form.submit(&mut store).unwrap(),
            SubmitOutcome::NotFound(recipe.id.clone())
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_invalid_submission_leaves_store_untouched() {
        let mut store = RecipeStore::open(MemoryStorage::new());
        assert!(RecipeForm::new().submit(&mut store).is_err());
        assert!(store.is_empty());
        assert_eq!(store.storage().write_count(), 0);
    }
}
