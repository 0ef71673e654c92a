use thiserror::Error;
use std::path::PathBuf;

#[derive(Error, Debug)]
pub enum TacticsError {
    // Config-related errors
    #[error("Failed to get config directory")]
    ConfigDirNotFound,

    #[error("Failed to create config directory: {0}")]
    ConfigDirCreationFailed(#[from] std::io::Error),

    #[error("Failed to serialize config: {0}")]
    SerializationFailed(#[from] toml::ser::Error),

    #[error("Failed to deserialize config: {0}")]
    DeserializationFailed(#[from] toml::de::Error),

    #[error("Config file not found at path: {path}")]
    ConfigFileNotFound { path: PathBuf },

    // Map-related errors
    #[error("Map file not found at path: {path}")]
    MapFileNotFound { path: PathBuf },

    #[error("Corrupted map file: {reason}")]
    CorruptedMapFile { reason: String },

    #[error("Map validation failed: {reason}")]
    MapValidationFailed { reason: String },

    #[error("Invalid map data: {reason}")]
    InvalidMapData { reason: String },

    #[error("Map file I/O failed at {}: {source}", .path.display())]
    MapIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Grid-related errors
    #[error("Tile already exists at grid coordinate ({x}, {z})")]
    DuplicateTile { x: i32, z: i32 },
}

/// Result type alias for all fallible operations
pub type TacticsResult<T> = Result<T, TacticsError>;
