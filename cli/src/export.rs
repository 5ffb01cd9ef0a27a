use std::path::Path;

use anyhow::{bail, Result};
use bakebook_core::scale::format_servings;
use bakebook_core::{export_recipe, BlobStorage, RecipeStore};

/// Export one recipe card as PNG. A failed export is reported and leaves the store untouched.
pub async fn export<S: BlobStorage>(
    store: &RecipeStore<S>,
    id: &str,
    servings: Option<f64>,
    out_dir: &Path,
) -> Result<()> {
    let Some(recipe) = store.get(id) else {
        bail!("Recipe not found: {}", id);
    };
    let target = servings.unwrap_or(f64::from(recipe.servings));

    match export_recipe(recipe, target, out_dir).await {
        Ok(exported) => {
            println!(
                "Exported {} for {} servings to {} ({}x{}, {} bytes)",
                recipe.name,
                format_servings(target),
                exported.path.display(),
                exported.width,
                exported.height,
                exported.bytes
            );
            Ok(())
        }
        Err(e) => {
            tracing::warn!(id = %recipe.id, error = %e, "export failed");
            bail!("Export failed: {}", e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bakebook_core::{Ingredient, MemoryStorage, RecipeFields};
    use tempfile::TempDir;

    fn store_with_scones() -> (RecipeStore<MemoryStorage>, String) {
        let mut store = RecipeStore::open(MemoryStorage::new());
        let recipe = store.create(RecipeFields {
            name: "Cheese Scones".to_string(),
            description: None,
            prep_time: 10.0,
            bake_time: 15.0,
            temperature: 425.0,
            servings: 6,
            ingredients: vec![Ingredient::new("Flour", 225.0)],
            instructions: vec!["Rub in the butter".to_string()],
        });
        (store, recipe.id)
    }

    #[tokio::test]
    async fn test_export_writes_card() {
        let out_dir = TempDir::new().unwrap();
        let (store, id) = store_with_scones();

        export(&store, &id, Some(12.0), out_dir.path()).await.unwrap();
        assert!(out_dir.path().join("cheese-scones-recipe.png").exists());
    }

    #[tokio::test]
    async fn test_unknown_recipe_is_error() {
        let out_dir = TempDir::new().unwrap();
        let (store, _) = store_with_scones();

        assert!(export(&store, "missing", None, out_dir.path()).await.is_err());
    }
}
