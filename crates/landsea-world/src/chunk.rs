//! Chunk data structure.

use landsea_common::{ChunkCoord, LocalCoord, WorldError, WorldResult, CHUNK_SIZE};
use serde::{Deserialize, Serialize};

use crate::biome::{Biome, WATER_LEVEL};
use crate::resource::ResourceNode;

/// Number of tiles in a chunk.
pub const TILES_PER_CHUNK: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;

/// A square block of tiles with its resource nodes.
///
/// Heights and biomes are fixed at generation time. Only the resource list
/// changes afterwards (nodes appended, nodes depleted).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk coordinate
    coord: ChunkCoord,
    /// Tile heights in [0, 1], row-major
    heights: Vec<f32>,
    /// Tile biomes, row-major
    biomes: Vec<Biome>,
    /// Resource nodes anchored inside this chunk
    resources: Vec<ResourceNode>,
}

impl Chunk {
    /// Creates an all-ocean chunk.
    #[must_use]
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            heights: vec![0.0; TILES_PER_CHUNK],
            biomes: vec![Biome::Ocean; TILES_PER_CHUNK],
            resources: Vec::new(),
        }
    }

    /// Returns the chunk coordinate.
    #[must_use]
    pub const fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Height at a local tile.
    #[must_use]
    pub fn height(&self, local: LocalCoord) -> f32 {
        self.heights[local.to_index()]
    }

    /// Biome at a local tile.
    #[must_use]
    pub fn biome(&self, local: LocalCoord) -> Biome {
        self.biomes[local.to_index()]
    }

    /// Whether a local tile is land.
    #[must_use]
    pub fn is_land(&self, local: LocalCoord) -> bool {
        self.height(local) > WATER_LEVEL
    }

    /// Bounds-checked lookup of `(height, biome)` at a local tile.
    pub fn tile(&self, x: u32, y: u32) -> WorldResult<(f32, Biome)> {
        if x >= CHUNK_SIZE || y >= CHUNK_SIZE {
            return Err(WorldError::TileOutOfBounds { x, y });
        }
        let index = LocalCoord::new(x as u16, y as u16).to_index();
        Ok((self.heights[index], self.biomes[index]))
    }

    /// Writes a tile during generation.
    pub(crate) fn set_tile(&mut self, local: LocalCoord, height: f32, biome: Biome) {
        let index = local.to_index();
        self.heights[index] = height;
        self.biomes[index] = biome;
    }

    /// All tile heights, row-major.
    #[must_use]
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// All tile biomes, row-major.
    #[must_use]
    pub fn biomes(&self) -> &[Biome] {
        &self.biomes
    }

    /// Resource nodes in insertion order.
    #[must_use]
    pub fn resources(&self) -> &[ResourceNode] {
        &self.resources
    }

    /// Mutable resource nodes in insertion order.
    pub fn resources_mut(&mut self) -> &mut [ResourceNode] {
        &mut self.resources
    }

    /// Appends a resource node.
    pub fn push_resource(&mut self, node: ResourceNode) {
        self.resources.push(node);
    }

    /// Number of land tiles.
    #[must_use]
    pub fn land_count(&self) -> usize {
        self.heights.iter().filter(|&&h| h > WATER_LEVEL).count()
    }
}
