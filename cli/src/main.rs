mod export;
mod posts;
mod recipes;

use std::path::PathBuf;

use anyhow::{Context, Result};
use bakebook_core::{BlobStorage, Config, FileStorage, PersistenceFailure, RecipeStore};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bakebook")]
#[command(about = "Bakebook recipe manager", long_about = None)]
struct Cli {
    /// Data directory (default: ~/.bakebook)
    #[arg(long, global = true, env = "BAKEBOOK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Recipe fields shared by `add` and `edit`.
#[derive(Args, Debug, Default)]
pub struct RecipeArgs {
    /// Recipe name (3-100 characters)
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Prep time in minutes
    #[arg(long)]
    pub prep_time: Option<f64>,
    /// Bake time in minutes
    #[arg(long)]
    pub bake_time: Option<f64>,
    /// Oven temperature in °F
    #[arg(long)]
    pub temperature: Option<f64>,
    /// Servings the ingredient weights are written for
    #[arg(long)]
    pub servings: Option<f64>,
    /// Ingredient as NAME=GRAMS (repeatable, replaces the whole list)
    #[arg(long = "ingredient", value_name = "NAME=GRAMS")]
    pub ingredients: Vec<String>,
    /// Instruction step (repeatable, replaces the whole list)
    #[arg(long = "step")]
    pub steps: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Recipes(RecipeCommands),
    /// List published blog posts
    Posts {
        /// Blog API base URL
        #[arg(long, env = "BAKEBOOK_BLOG_URL")]
        url: Option<String>,
    },
}

#[derive(Subcommand)]
enum RecipeCommands {
    /// List recipes, newest first
    List,
    /// Show a recipe, optionally scaled to a serving count
    Show {
        id: String,
        /// Target servings
        #[arg(long)]
        servings: Option<f64>,
    },
    /// Add a recipe
    Add {
        #[command(flatten)]
        recipe: RecipeArgs,
    },
    /// Edit a recipe; unspecified fields keep their values
    Edit {
        id: String,
        #[command(flatten)]
        recipe: RecipeArgs,
    },
    /// Delete a recipe
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Export a recipe card as PNG
    Export {
        id: String,
        /// Target servings (default: the recipe's own)
        #[arg(long)]
        servings: Option<f64>,
        /// Output directory (default: current directory)
        #[arg(long, env = "BAKEBOOK_EXPORT_DIR")]
        out: Option<PathBuf>,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load and save failures to show the user, so neither replaced data nor
/// unsaved changes go unnoticed.
fn persistence_warnings<S: BlobStorage>(store: &RecipeStore<S>) -> Vec<String> {
    let mut warnings = Vec::new();
    if let Some(failure) = store.load_failure() {
        // Only a later successful save clears the error recorded at load.
        if store.persistence_error().is_none() {
            warnings.push(format!(
                "{} (the unreadable data has been replaced)",
                failure
            ));
        } else {
            warnings.push(failure.to_string());
        }
    }
    if let Some(failure @ PersistenceFailure::Save(_)) = store.persistence_error() {
        warnings.push(failure.to_string());
    }
    warnings
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = Config::from_env().context("Invalid configuration")?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    tracing::debug!(data_dir = %config.data_dir.display(), "opening recipe store");

    match cli.command {
        Commands::Posts { url } => posts::list_posts(url.as_deref()).await,
        Commands::Recipes(command) => run_recipe_command(command, &config).await,
    }
}

async fn run_recipe_command(command: RecipeCommands, config: &Config) -> Result<()> {
    let mut store = RecipeStore::open(FileStorage::new(&config.data_dir));
    let result = match command {
        RecipeCommands::List => {
            recipes::list(&store);
            Ok(())
        }
        RecipeCommands::Show { id, servings } => recipes::show(&store, &id, servings),
        RecipeCommands::Add { recipe } => recipes::add(&mut store, recipe),
        RecipeCommands::Edit { id, recipe } => recipes::edit(&mut store, &id, recipe),
        RecipeCommands::Delete { id, yes } => recipes::delete(&mut store, &id, |recipe| {
            if yes {
                Ok(true)
            } else {
                recipes::confirm_delete(recipe)
            }
        }),
        RecipeCommands::Export { id, servings, out } => {
            let out_dir = out.unwrap_or_else(|| config.export_dir.clone());
            export::export(&store, &id, servings, &out_dir).await
        }
    };

    for warning in persistence_warnings(&store) {
        eprintln!("Warning: {}", warning);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use bakebook_core::{Ingredient, MemoryStorage, RecipeFields, STORAGE_KEY};

    fn fields() -> RecipeFields {
        RecipeFields {
            name: "Shortbread".to_string(),
            description: None,
            prep_time: 10.0,
            bake_time: 20.0,
            temperature: 325.0,
            servings: 12,
            ingredients: vec![Ingredient::new("Butter", 225.0)],
            instructions: vec!["Bake".to_string()],
        }
    }

    #[test]
    fn test_no_warnings_for_healthy_store() {
        let mut store = RecipeStore::open(MemoryStorage::new());
        store.create(fields());
        assert!(persistence_warnings(&store).is_empty());
    }

    #[test]
    fn test_replaced_corrupt_data_is_reported() {
        let mut store =
            RecipeStore::open(MemoryStorage::new().with_entry(STORAGE_KEY, "[{\"id\": 1"));
        assert_eq!(persistence_warnings(&store).len(), 1);

        store.create(fields());
        let warnings = persistence_warnings(&store);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Failed to load recipes"));
        assert!(warnings[0].contains("replaced"));
    }

    #[test]
    fn test_save_failure_is_reported() {
        let mut store = RecipeStore::open(MemoryStorage::new());
        store.storage_mut().set_fail_writes(true);
        store.create(fields());

        let warnings = persistence_warnings(&store);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Failed to save recipes"));
    }

    #[test]
    fn test_posts_url_flag() {
        let cli = Cli::try_parse_from(["bakebook", "posts", "--url", "http://cms.local"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Posts { url: Some(ref u) } if u == "http://cms.local"
        ));
    }

    #[test]
    fn test_delete_accepts_yes() {
        let cli = Cli::try_parse_from(["bakebook", "delete", "abc", "--yes"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Recipes(RecipeCommands::Delete { ref id, yes: true }) if id == "abc"
        ));
    }
}
