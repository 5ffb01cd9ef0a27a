use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Recipe card is too tall to render ({height}px, max {max}px)")]
    TooLarge { height: u32, max: u32 },

    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Render task failed: {0}")]
    Task(String),
}

#[derive(Error, Debug)]
pub enum BlogError {
    #[error("Invalid blog URL: {0}")]
    InvalidUrl(String),

    #[error("Blog request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Blog unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable {0} is set but empty")]
    EmptyVar(String),

    #[error("Could not determine a data directory; set BAKEBOOK_DATA_DIR")]
    NoDataDir,
}

/// Raised by row-list edits addressed past the end of the list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Row index {index} out of range (len {len})")]
pub struct RowIndexError {
    pub index: usize,
    pub len: usize,
}

/// A single field-scoped validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field path, e.g. `name` or `ingredients[2].weight`.
    pub field: String,
    pub message: String,
}

/// All validation failures found in one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// First message reported for a field path, if any.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
