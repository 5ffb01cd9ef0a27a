pub mod blog;
pub mod config;
pub mod error;
pub mod export;
pub mod form;
pub mod scale;
pub mod store;
pub mod types;

pub use blog::{load_blog_listing, BlogClient, BlogListing, DirectusClient, MockBlogClient, Post};
pub use config::Config;
pub use error::{
    BlogError, ConfigError, ExportError, FieldError, RowIndexError, StorageError,
    ValidationErrors,
};
pub use export::{export_filename, export_recipe, render_card_png, ExportedImage, RenderedCard};
pub use form::{FormMode, RecipeForm, RowList, SubmitOutcome};
pub use scale::{
    format_ratio, format_weight, scale, scale_recipe, scaling_ratio, ScaledIngredient,
    ScaledRecipe,
};
pub use store::{
    BlobStorage, FileStorage, MemoryStorage, PersistenceFailure, RandomThumbnail, RecipeStore,
    ThumbnailPicker, STORAGE_KEY, THUMBNAILS,
};
pub use types::{Ingredient, Recipe, RecipeFields};
