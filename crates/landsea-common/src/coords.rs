//! Coordinate types for world, tile, chunk, and local positions.
//!
//! World positions are continuous pixel coordinates (`glam::Vec2`). The world
//! is tiled into square tiles of [`TILE_SIZE`] pixels, and tiles are grouped
//! into square chunks of [`CHUNK_SIZE`] tiles per side.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Tiles per chunk axis.
pub const CHUNK_SIZE: u32 = 16;

/// Pixels per tile axis.
pub const TILE_SIZE: f32 = 32.0;

/// Pixels per chunk axis.
pub const CHUNK_WORLD_SIZE: f32 = CHUNK_SIZE as f32 * TILE_SIZE;

/// World tile coordinate (global tile index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    /// X tile index in world space
    pub x: i32,
    /// Y tile index in world space
    pub y: i32,
}

impl TileCoord {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the tile containing a world pixel position.
    #[must_use]
    pub fn from_world(pos: Vec2) -> Self {
        Self {
            x: (pos.x / TILE_SIZE).floor() as i32,
            y: (pos.y / TILE_SIZE).floor() as i32,
        }
    }

    /// Converts to the coordinate of the chunk owning this tile.
    #[must_use]
    pub const fn to_chunk_coord(self) -> ChunkCoord {
        let size = CHUNK_SIZE as i32;
        ChunkCoord {
            x: self.x.div_euclid(size),
            y: self.y.div_euclid(size),
        }
    }

    /// Converts to local coordinate within the owning chunk.
    #[must_use]
    pub const fn to_local_coord(self) -> LocalCoord {
        let size = CHUNK_SIZE as i32;
        LocalCoord {
            x: self.x.rem_euclid(size) as u16,
            y: self.y.rem_euclid(size) as u16,
        }
    }

    /// Returns the world pixel position of the tile centre.
    #[must_use]
    pub fn center(self) -> Vec2 {
        Vec2::new(
            (self.x as f32 + 0.5) * TILE_SIZE,
            (self.y as f32 + 0.5) * TILE_SIZE,
        )
    }
}

/// Chunk coordinate (identifies a chunk in the world grid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    /// X coordinate in chunk space
    pub x: i32,
    /// Y coordinate in chunk space
    pub y: i32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the chunk containing a world pixel position.
    #[must_use]
    pub fn from_world(pos: Vec2) -> Self {
        TileCoord::from_world(pos).to_chunk_coord()
    }

    /// Returns the world tile at the chunk's minimum corner.
    #[must_use]
    pub const fn origin_tile(self) -> TileCoord {
        let size = CHUNK_SIZE as i32;
        TileCoord {
            x: self.x * size,
            y: self.y * size,
        }
    }

    /// Returns the world tile for a local coordinate in this chunk.
    #[must_use]
    pub const fn tile_at(self, local: LocalCoord) -> TileCoord {
        let origin = self.origin_tile();
        TileCoord {
            x: origin.x + local.x as i32,
            y: origin.y + local.y as i32,
        }
    }

    /// Returns the world pixel bounds `(min, max)` of the chunk.
    #[must_use]
    pub fn world_bounds(self) -> (Vec2, Vec2) {
        let min = Vec2::new(
            self.x as f32 * CHUNK_WORLD_SIZE,
            self.y as f32 * CHUNK_WORLD_SIZE,
        );
        (min, min + Vec2::splat(CHUNK_WORLD_SIZE))
    }

    /// Chebyshev distance to another chunk, in chunks.
    #[must_use]
    pub fn chebyshev_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

/// Local tile coordinate within a chunk (0 to CHUNK_SIZE-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalCoord {
    /// X coordinate within chunk
    pub x: u16,
    /// Y coordinate within chunk
    pub y: u16,
}

impl LocalCoord {
    /// Creates a new local coordinate.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Converts to linear index for array access.
    #[must_use]
    pub const fn to_index(self) -> usize {
        (self.y as usize) * (CHUNK_SIZE as usize) + (self.x as usize)
    }

    /// Creates from linear index.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        let size = CHUNK_SIZE as usize;
        Self {
            x: (index % size) as u16,
            y: (index / size) as u16,
        }
    }
}
