use std::io::{IsTerminal, Write};

use anyhow::{bail, Context, Result};
use bakebook_core::scale::format_servings;
use bakebook_core::{
    format_ratio, scale_recipe, BlobStorage, Ingredient, Recipe, RecipeForm, RecipeStore,
    RowList, SubmitOutcome, ValidationErrors,
};

use crate::RecipeArgs;

pub fn list<S: BlobStorage>(store: &RecipeStore<S>) {
    if store.is_empty() {
        println!("No recipes yet. Add one with `bakebook add`.");
        return;
    }

    for recipe in store.list() {
        println!(
            "{}  {:<40}  {:>3} servings  updated {}",
            recipe.id,
            recipe.name,
            recipe.servings,
            recipe.updated_at.format("%Y-%m-%d")
        );
    }
    println!("\n{} recipe(s)", store.len());
}

pub fn show<S: BlobStorage>(store: &RecipeStore<S>, id: &str, servings: Option<f64>) -> Result<()> {
    let Some(recipe) = store.get(id) else {
        bail!("Recipe not found: {}", id);
    };
    print_recipe(recipe, servings.unwrap_or(f64::from(recipe.servings)));
    Ok(())
}

fn print_recipe(recipe: &Recipe, target_servings: f64) {
    let scaled = scale_recipe(recipe, target_servings);

    println!("{}", recipe.name);
    if let Some(description) = &recipe.description {
        println!("{}", description);
    }
    println!(
        "\nPrep {} min | Bake {} min | {}°F",
        recipe.prep_time, recipe.bake_time, recipe.temperature
    );

    println!(
        "\nIngredients for {} servings ({})",
        format_servings(scaled.target_servings),
        format_ratio(scaled.ratio)
    );
    for ingredient in &scaled.ingredients {
        println!("  {:<32} {:>8} g", ingredient.name, ingredient.display_weight());
    }

    println!("\nInstructions");
    for (i, step) in recipe.instructions.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
}

pub fn add<S: BlobStorage>(store: &mut RecipeStore<S>, args: RecipeArgs) -> Result<()> {
    let mut form = RecipeForm::new();
    apply_args(&mut form, args)?;

    match form.submit(store) {
        Ok(SubmitOutcome::Created(recipe)) => {
            println!("Created {} ({})", recipe.name, recipe.id);
            Ok(())
        }
        Ok(other) => bail!("Unexpected submit outcome: {:?}", other),
        Err(errors) => report_invalid(&errors),
    }
}

pub fn edit<S: BlobStorage>(store: &mut RecipeStore<S>, id: &str, args: RecipeArgs) -> Result<()> {
    let Some(existing) = store.get(id) else {
        bail!("Recipe not found: {}", id);
    };
    let mut form = RecipeForm::edit(existing);
    apply_args(&mut form, args)?;

    match form.submit(store) {
        Ok(SubmitOutcome::Updated(recipe)) => {
            println!("Updated {} ({})", recipe.name, recipe.id);
            Ok(())
        }
        Ok(SubmitOutcome::NotFound(id)) => bail!("Recipe not found: {}", id),
        Ok(other) => bail!("Unexpected submit outcome: {:?}", other),
        Err(errors) => report_invalid(&errors),
    }
}

/// Delete a recipe once `confirm` agrees. Declining leaves the store untouched.
pub fn delete<S, F>(store: &mut RecipeStore<S>, id: &str, confirm: F) -> Result<()>
where
    S: BlobStorage,
    F: FnOnce(&Recipe) -> Result<bool>,
{
    let Some(recipe) = store.get(id) else {
        bail!("Recipe not found: {}", id);
    };
    if !confirm(recipe)? {
        println!("Kept {}", recipe.name);
        return Ok(());
    }

    match store.delete(id) {
        Some(recipe) => {
            println!("Deleted {} ({})", recipe.name, recipe.id);
            Ok(())
        }
        None => bail!("Recipe not found: {}", id),
    }
}

/// Ask on the terminal before deleting. Without a terminal, refuse unless `--yes` was given.
pub fn confirm_delete(recipe: &Recipe) -> Result<bool> {
    if !std::io::stdin().is_terminal() {
        bail!("Refusing to delete {} without --yes", recipe.name);
    }

    print!("Delete \"{}\"? This cannot be undone. [y/N] ", recipe.name);
    std::io::stdout().flush().context("Failed to write prompt")?;

    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .context("Failed to read answer")?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn report_invalid(errors: &ValidationErrors) -> Result<()> {
    eprintln!("Recipe not saved:");
    for error in errors.iter() {
        eprintln!("  {}: {}", error.field, error.message);
    }
    bail!("{} validation error(s)", errors.len())
}

/// Overlay command-line values on a form. Given ingredients or steps replace
/// the whole list; omitted fields keep the form's values.
fn apply_args(form: &mut RecipeForm, args: RecipeArgs) -> Result<()> {
    if let Some(name) = args.name {
        form.name = name;
    }
    if let Some(description) = args.description {
        form.description = description;
    }
    if let Some(prep_time) = args.prep_time {
        form.prep_time = prep_time;
    }
    if let Some(bake_time) = args.bake_time {
        form.bake_time = bake_time;
    }
    if let Some(temperature) = args.temperature {
        form.temperature = temperature;
    }
    if let Some(servings) = args.servings {
        form.servings = servings;
    }
    if !args.ingredients.is_empty() {
        form.ingredients = args
            .ingredients
            .iter()
            .map(|raw| parse_ingredient(raw))
            .collect::<Result<RowList<Ingredient>>>()?;
    }
    if !args.steps.is_empty() {
        form.instructions = RowList::from(args.steps);
    }
    Ok(())
}

/// Parse `NAME=GRAMS`. The split is at the last `=` so names may contain one.
fn parse_ingredient(raw: &str) -> Result<Ingredient> {
    let Some((name, grams)) = raw.rsplit_once('=') else {
        bail!("Ingredient must be NAME=GRAMS, got '{}'", raw);
    };
    let weight = grams
        .trim()
        .parse::<f64>()
        .with_context(|| format!("Invalid weight in ingredient '{}'", raw))?;
    Ok(Ingredient::new(name.trim(), weight))
}
