//! Procedural archipelago generation.

use glam::Vec2;
use landsea_common::{ChunkCoord, LocalCoord, TileCoord, CHUNK_SIZE};
use tracing::debug;

use crate::biome::Biome;
use crate::chunk::Chunk;
use crate::noise::PerlinNoise;
use crate::resource::ResourceNode;

/// Noise frequencies and weights, in world-tile units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainParams {
    /// Frequency of the island-shape noise
    pub base_scale: f64,
    /// Frequency of the coastline detail noise
    pub detail_scale: f64,
    /// Weight of the detail octave relative to the base
    pub detail_weight: f64,
    /// Frequency of the archipelago cluster noise
    pub cluster_scale: f64,
    /// Weight of the cluster term
    pub cluster_weight: f64,
    /// Constant subtracted to thin out land
    pub sea_bias: f64,
    /// Frequency of the moisture channel
    pub moisture_scale: f64,
    /// Coordinate offset of the moisture channel
    pub moisture_offset: f64,
    /// Maximum resource jitter from the tile centre, in pixels
    pub resource_jitter: f32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            base_scale: 0.05,
            detail_scale: 0.10,
            detail_weight: 0.5,
            cluster_scale: 0.005,
            cluster_weight: 0.5,
            sea_bias: 0.12,
            moisture_scale: 0.05,
            moisture_offset: 1000.0,
            resource_jitter: 8.0,
        }
    }
}

/// Turns seeded noise into chunk heights, biomes and resources.
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    seed: u64,
    params: TerrainParams,
    /// Height channel
    terrain: PerlinNoise,
    /// Moisture channel
    moisture: PerlinNoise,
}

impl TerrainGenerator {
    /// Creates a generator with default parameters.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_params(seed, TerrainParams::default())
    }

    /// Creates a generator with custom parameters.
    #[must_use]
    pub fn with_params(seed: u64, params: TerrainParams) -> Self {
        Self {
            seed,
            params,
            terrain: PerlinNoise::new(seed),
            moisture: PerlinNoise::new(seed.wrapping_add(1)),
        }
    }

    /// World seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Height in [0, 1] of a world tile.
    #[must_use]
    pub fn height_at(&self, tile: TileCoord) -> f32 {
        let p = &self.params;
        let (x, y) = (f64::from(tile.x), f64::from(tile.y));

        let base = self.terrain.noise(x * p.base_scale, y * p.base_scale);
        let detail = self.terrain.noise(x * p.detail_scale, y * p.detail_scale);
        let shape = (base + p.detail_weight * detail) / (1.0 + p.detail_weight);
        let shape = (shape + 1.0) * 0.5;

        let cluster = self.terrain.noise(x * p.cluster_scale, y * p.cluster_scale);
        let height = shape + cluster * p.cluster_weight - p.sea_bias;

        height.clamp(0.0, 1.0) as f32
    }

    /// Moisture in [-1, 1] of a world tile.
    #[must_use]
    pub fn moisture_at(&self, tile: TileCoord) -> f64 {
        let p = &self.params;
        self.moisture.noise(
            (f64::from(tile.x) + p.moisture_offset) * p.moisture_scale,
            (f64::from(tile.y) + p.moisture_offset) * p.moisture_scale,
        )
    }

    /// Generates a complete chunk. Same coordinate, same output.
    #[must_use]
    pub fn generate(&self, coord: ChunkCoord) -> Chunk {
        let mut chunk = Chunk::new(coord);

        for ly in 0..CHUNK_SIZE as u16 {
            for lx in 0..CHUNK_SIZE as u16 {
                let local = LocalCoord::new(lx, ly);
                let tile = coord.tile_at(local);
                let height = self.height_at(tile);
                let biome = Biome::classify(height, self.moisture_at(tile));
                chunk.set_tile(local, height, biome);

                if let Some(node) = self.spawn_resource(tile, biome) {
                    chunk.push_resource(node);
                }
            }
        }

        debug!(
            "Generated chunk ({}, {}): {} land tiles, {} resources",
            coord.x,
            coord.y,
            chunk.land_count(),
            chunk.resources().len()
        );
        chunk
    }

    /// Rolls the resource for one tile from its own RNG stream.
    fn spawn_resource(&self, tile: TileCoord, biome: Biome) -> Option<ResourceNode> {
        if !biome.is_land() {
            return None;
        }

        let mut rng = fastrand::Rng::with_seed(tile_seed(tile, self.seed));
        let kind = biome.resource_for_roll(rng.f32())?;

        let jitter = self.params.resource_jitter;
        let offset = Vec2::new(
            (rng.f32() * 2.0 - 1.0) * jitter,
            (rng.f32() * 2.0 - 1.0) * jitter,
        );
        Some(ResourceNode::new(kind, tile.center() + offset))
    }
}

/// Mixes a tile coordinate and the world seed into one RNG seed (splitmix64).
fn tile_seed(tile: TileCoord, seed: u64) -> u64 {
    let packed = (u64::from(tile.x as u32) << 32) | u64::from(tile.y as u32);
    let mut z = packed ^ seed.rotate_left(17) ^ 0x9E37_79B9_7F4A_7C15;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
