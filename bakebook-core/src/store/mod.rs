//! Recipe store: the in-memory recipe collection mirrored to a persistence port.
//!
//! Every successful mutation re-serializes the whole collection and writes it
//! under [`STORAGE_KEY`]. Load and write failures are logged and kept as the
//! store's persistence error; they never abort an operation.

mod storage;
mod thumbnail;

pub use storage::{BlobStorage, FileStorage, MemoryStorage, STORAGE_KEY};
pub use thumbnail::{RandomThumbnail, ThumbnailPicker, THUMBNAILS};

use chrono::Utc;
use uuid::Uuid;

use crate::types::{Recipe, RecipeFields};

/// A load or write against the persistence port that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceFailure {
    /// Stored data could not be read or parsed; the store started empty.
    Load(String),
    /// The latest mutation is in memory only.
    Save(String),
}

impl std::fmt::Display for PersistenceFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistenceFailure::Load(e) => write!(f, "Failed to load recipes: {}", e),
            PersistenceFailure::Save(e) => write!(f, "Failed to save recipes: {}", e),
        }
    }
}

pub struct RecipeStore<S: BlobStorage> {
    storage: S,
    picker: Box<dyn ThumbnailPicker>,
    /// Newest-created first
    recipes: Vec<Recipe>,
    persistence_error: Option<PersistenceFailure>,
    /// Kept for the life of the store, even after a later save succeeds.
    load_failure: Option<PersistenceFailure>,
}

impl<S: BlobStorage> RecipeStore<S> {
    /// Hydrate a store from `storage` using random thumbnail assignment.
    pub fn open(storage: S) -> Self {
        Self::with_picker(storage, RandomThumbnail)
    }

    /// Hydrate a store from `storage` with a custom thumbnail picker.
    ///
    /// Missing data gives an empty store. Unreadable or corrupt data also gives
    /// an empty store and is recorded as a load failure.
    pub fn with_picker(storage: S, picker: impl ThumbnailPicker + 'static) -> Self {
        let mut store = Self {
            storage,
            picker: Box::new(picker),
            recipes: Vec::new(),
            persistence_error: None,
            load_failure: None,
        };
        store.hydrate();
        store.load_failure = store.persistence_error.clone();
        store
    }

    fn hydrate(&mut self) {
        let stored = match self.storage.read(STORAGE_KEY) {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                tracing::debug!(key = STORAGE_KEY, "no stored recipes, starting empty");
                return;
            }
            Err(e) => {
                tracing::warn!(key = STORAGE_KEY, error = %e, "failed to read stored recipes");
                self.persistence_error = Some(PersistenceFailure::Load(e.to_string()));
                return;
            }
        };

        match Self::from_json(&stored) {
            Ok(recipes) => {
                tracing::debug!(count = recipes.len(), "loaded recipes");
                self.recipes = recipes;
            }
            Err(e) => {
                tracing::warn!(key = STORAGE_KEY, error = %e, "stored recipes are corrupt, starting empty");
                self.persistence_error = Some(PersistenceFailure::Load(e.to_string()));
            }
        }
    }

    /// All recipes, newest-created first.
    pub fn list(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// Create a recipe from validated fields and put it at the front of the list.
    pub fn create(&mut self, fields: RecipeFields) -> Recipe {
        let id = self.fresh_id();
        let thumbnail = self.picker.pick(THUMBNAILS).to_string();
        let recipe = Recipe::from_fields(id, thumbnail, Utc::now(), fields);

        tracing::debug!(id = %recipe.id, name = %recipe.name, "created recipe");
        self.recipes.insert(0, recipe.clone());
        self.flush();
        recipe
    }

    /// Replace all mutable fields of the recipe with `id`.
    ///
    /// Returns `None` and leaves the collection untouched if there is no such recipe.
    pub fn update(&mut self, id: &str, fields: RecipeFields) -> Option<Recipe> {
        let Some(recipe) = self.recipes.iter_mut().find(|r| r.id == id) else {
            tracing::debug!(id, "update skipped, recipe not found");
            return None;
        };

        recipe.replace_fields(fields, Utc::now());
        let updated = recipe.clone();

        tracing::debug!(id, "updated recipe");
        self.flush();
        Some(updated)
    }

    /// Remove the recipe with `id`, returning it. No-op if absent.
    pub fn delete(&mut self, id: &str) -> Option<Recipe> {
        let Some(index) = self.recipes.iter().position(|r| r.id == id) else {
            tracing::debug!(id, "delete skipped, recipe not found");
            return None;
        };

        let removed = self.recipes.remove(index);
        tracing::debug!(id, "deleted recipe");
        self.flush();
        Some(removed)
    }

    /// The most recent load or save failure, cleared by the next successful save.
    pub fn persistence_error(&self) -> Option<&PersistenceFailure> {
        self.persistence_error.as_ref()
    }

    /// Why hydration started empty, if stored data could not be loaded.
    ///
    /// Unlike [`persistence_error`](Self::persistence_error) this is not cleared
    /// by a successful save, which replaces the unreadable data.
    pub fn load_failure(&self) -> Option<&PersistenceFailure> {
        self.load_failure.as_ref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Serialize the whole collection in its persisted form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.recipes)
    }

    /// Parse a persisted collection.
    pub fn from_json(json: &str) -> Result<Vec<Recipe>, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().simple().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    /// Write the whole collection. Failures are logged and remembered, never returned.
    fn flush(&mut self) {
        let result = self
            .to_json()
            .map_err(|e| e.to_string())
            .and_then(|json| {
                self.storage
                    .write(STORAGE_KEY, &json)
                    .map_err(|e| e.to_string())
            });

        match result {
            Ok(()) => {
                self.persistence_error = None;
            }
            Err(e) => {
                tracing::warn!(key = STORAGE_KEY, error = %e, "failed to save recipes, changes are in memory only");
                self.persistence_error = Some(PersistenceFailure::Save(e));
            }
        }
    }
}
