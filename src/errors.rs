use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridSightError {
    // Shape-related errors
    #[error("Unsupported shape variant: {variant}")]
    UnsupportedShape { variant: String },

    #[error("Invalid shape: {reason}")]
    InvalidShape { reason: String },

    // Map-related errors
    #[error("Invalid map data: {reason}")]
    InvalidMapData { reason: String },

    #[error("Map validation failed: {reason}")]
    MapValidationFailed { reason: String },

    #[error("Map file not found at path: {}", path.display())]
    MapFileNotFound { path: PathBuf },

    #[error("Corrupted map file: {reason}")]
    CorruptedMapFile { reason: String },

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    // Config-related errors
    #[error("Failed to get config directory")]
    ConfigDirNotFound,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize: {0}")]
    SerializationFailed(#[from] toml::ser::Error),

    #[error("Failed to deserialize: {0}")]
    DeserializationFailed(#[from] toml::de::Error),
}

/// Result type alias for all operations
pub type GridSightResult<T> = Result<T, GridSightError>;
