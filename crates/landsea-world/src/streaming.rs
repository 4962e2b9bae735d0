//! Chunk store: lazy generation, caching and spatial queries.

use ahash::AHashMap;
use glam::Vec2;
use landsea_common::{ChunkCoord, TileCoord, WorldError, WorldResult, CHUNK_WORLD_SIZE};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::chunk::Chunk;
use crate::generation::TerrainGenerator;
use crate::resource::ResourceNode;

/// World configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// World seed
    pub seed: u64,
    /// Chunk radius kept loaded around the player
    pub load_radius: u32,
    /// Cache bound; `None` keeps every generated chunk
    pub max_cached_chunks: Option<usize>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            load_radius: 2,
            max_cached_chunks: None,
        }
    }
}

impl WorldConfig {
    /// Smallest cache that can hold the full load square.
    #[must_use]
    pub fn min_cache_size(&self) -> usize {
        let side = 2 * self.load_radius as usize + 1;
        side * side
    }
}

/// Sole owner of every generated chunk.
///
/// All land/water answers and resource placements go through here, and a
/// chunk is generated by the same routine whether it was requested by
/// [`ChunkStore::ensure_loaded`] or by an [`ChunkStore::is_land`] probe.
#[derive(Debug)]
pub struct ChunkStore {
    config: WorldConfig,
    generator: TerrainGenerator,
    chunks: AHashMap<ChunkCoord, Chunk>,
}

impl ChunkStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new(config: WorldConfig) -> Self {
        let generator = TerrainGenerator::new(config.seed);
        info!("World store created with seed {}", config.seed);
        Self {
            config,
            generator,
            chunks: AHashMap::new(),
        }
    }

    /// Creates a store with default settings and the given seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(WorldConfig {
            seed,
            ..Default::default()
        })
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Terrain generator in use.
    #[must_use]
    pub const fn generator(&self) -> &TerrainGenerator {
        &self.generator
    }

    /// Generates every missing chunk within `radius` chunks of `centre`.
    pub fn ensure_loaded(&mut self, centre: Vec2, radius: u32) {
        let centre_chunk = ChunkCoord::from_world(centre);
        let r = radius as i32;

        for dy in -r..=r {
            for dx in -r..=r {
                self.load(ChunkCoord::new(centre_chunk.x + dx, centre_chunk.y + dy));
            }
        }

        if let Some(limit) = self.config.max_cached_chunks {
            self.evict_beyond(centre_chunk, limit);
        }
    }

    /// Loads the configured radius around `centre`.
    pub fn update(&mut self, centre: Vec2) {
        self.ensure_loaded(centre, self.config.load_radius);
    }

    /// Returns the chunk at `coord`, generating it if missing.
    pub fn load(&mut self, coord: ChunkCoord) -> &mut Chunk {
        let generator = &self.generator;
        self.chunks
            .entry(coord)
            .or_insert_with(|| generator.generate(coord))
    }

    /// Whether the tile under a world pixel position is land.
    pub fn is_land(&mut self, pos: Vec2) -> bool {
        let tile = TileCoord::from_world(pos);
        self.load(tile.to_chunk_coord())
            .is_land(tile.to_local_coord())
    }

    /// Appends a node to its owning chunk. Returns `false` if that chunk
    /// is not loaded.
    pub fn add_resource_node(&mut self, node: ResourceNode) -> bool {
        let coord = ChunkCoord::from_world(node.position);
        match self.chunks.get_mut(&coord) {
            Some(chunk) => {
                debug!(
                    "Placed {:?} at ({:.0}, {:.0})",
                    node.kind, node.position.x, node.position.y
                );
                chunk.push_resource(node);
                true
            },
            None => {
                warn!(
                    "Dropped {:?} at ({:.0}, {:.0}): chunk ({}, {}) not loaded",
                    node.kind, node.position.x, node.position.y, coord.x, coord.y
                );
                false
            },
        }
    }

    /// Nearest live node within `radius` of `pos`.
    #[must_use]
    pub fn closest_resource(&self, pos: Vec2, radius: f32) -> Option<&ResourceNode> {
        let (coord, index) = self.find_closest(pos, radius)?;
        self.chunks.get(&coord)?.resources().get(index)
    }

    /// Mutable variant of [`ChunkStore::closest_resource`].
    pub fn closest_resource_mut(&mut self, pos: Vec2, radius: f32) -> Option<&mut ResourceNode> {
        let (coord, index) = self.find_closest(pos, radius)?;
        self.chunks.get_mut(&coord)?.resources_mut().get_mut(index)
    }

    /// Scans the 3x3 loaded neighbourhood. Ties keep the first node found.
    fn find_closest(&self, pos: Vec2, radius: f32) -> Option<(ChunkCoord, usize)> {
        let centre = ChunkCoord::from_world(pos);
        let mut best: Option<(ChunkCoord, usize)> = None;
        let mut best_dist = radius * radius;

        for dy in -1..=1 {
            for dx in -1..=1 {
                let coord = ChunkCoord::new(centre.x + dx, centre.y + dy);
                let Some(chunk) = self.chunks.get(&coord) else {
                    continue;
                };
                for (index, node) in chunk.resources().iter().enumerate() {
                    if node.depleted {
                        continue;
                    }
                    let dist = node.position.distance_squared(pos);
                    if dist < best_dist || (best.is_none() && dist <= best_dist) {
                        best_dist = dist;
                        best = Some((coord, index));
                    }
                }
            }
        }

        best
    }

    /// Nodes of every loaded chunk overlapping the camera view, padded by
    /// one chunk on each side. `camera` is the view centre.
    pub fn visible_resources(
        &self,
        camera: Vec2,
        view_w: f32,
        view_h: f32,
    ) -> impl Iterator<Item = &ResourceNode> {
        let half = Vec2::new(view_w, view_h) * 0.5 + Vec2::splat(CHUNK_WORLD_SIZE);
        let (view_min, view_max) = (camera - half, camera + half);

        self.chunks
            .values()
            .filter(move |chunk| {
                let (min, max) = chunk.coord().world_bounds();
                min.x < view_max.x && max.x > view_min.x && min.y < view_max.y && max.y > view_min.y
            })
            .flat_map(|chunk| chunk.resources().iter())
    }

    /// Looks up a cached chunk.
    pub fn chunk(&self, coord: ChunkCoord) -> WorldResult<&Chunk> {
        self.chunks.get(&coord).ok_or(WorldError::ChunkNotLoaded {
            x: coord.x,
            y: coord.y,
        })
    }

    /// Whether a chunk is cached.
    #[must_use]
    pub fn is_loaded(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    /// Number of cached chunks.
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.chunks.len()
    }

    /// Iterates cached chunks in no particular order.
    pub fn loaded_chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Drops the chunks farthest from `centre` until at most `limit` remain.
    fn evict_beyond(&mut self, centre: ChunkCoord, limit: usize) {
        if self.chunks.len() <= limit {
            return;
        }

        let mut coords: Vec<ChunkCoord> = self.chunks.keys().copied().collect();
        coords.sort_by_key(|c| (std::cmp::Reverse(c.chebyshev_distance(centre)), c.x, c.y));

        let excess = self.chunks.len() - limit;
        for coord in coords.into_iter().take(excess) {
            self.chunks.remove(&coord);
        }
        debug!("Evicted {excess} chunks, {} cached", self.chunks.len());
    }
}
