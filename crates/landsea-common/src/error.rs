//! Error types shared across Landsea crates.

use thiserror::Error;

/// World and chunk errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    /// Chunk is not in the cache
    #[error("Chunk not loaded at ({x}, {y})")]
    ChunkNotLoaded {
        /// X coordinate
        x: i32,
        /// Y coordinate
        y: i32,
    },

    /// Local tile index outside the chunk
    #[error("Tile ({x}, {y}) is outside the chunk")]
    TileOutOfBounds {
        /// Local X
        x: u32,
        /// Local Y
        y: u32,
    },
}

/// Result type alias for world operations.
pub type WorldResult<T> = Result<T, WorldError>;
