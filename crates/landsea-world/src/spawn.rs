//! Safe spawn search.

use glam::Vec2;
use landsea_common::TILE_SIZE;
use tracing::{info, warn};

use crate::streaming::ChunkStore;

/// Ring step of the spawn search, in tiles.
pub const SPAWN_SEARCH_STEP: i32 = 2;

/// Ring limit of the spawn search, in tiles.
pub const SPAWN_SEARCH_LIMIT: i32 = 128;

/// Half-width of the square that must be all water, in tiles.
pub const SPAWN_CLEARANCE: i32 = 4;

/// Distance of the eight compass probes, in tiles.
pub const SPAWN_PROBE_DISTANCE: f32 = 20.0;

impl ChunkStore {
    /// Whether `pos` has open water around it: the surrounding
    /// ±[`SPAWN_CLEARANCE`] tile square is all water and eight points at
    /// [`SPAWN_PROBE_DISTANCE`] tiles (every 45 degrees) are water too.
    pub fn is_open_ocean(&mut self, pos: Vec2) -> bool {
        for dy in -SPAWN_CLEARANCE..=SPAWN_CLEARANCE {
            for dx in -SPAWN_CLEARANCE..=SPAWN_CLEARANCE {
                let offset = Vec2::new(dx as f32, dy as f32) * TILE_SIZE;
                if self.is_land(pos + offset) {
                    return false;
                }
            }
        }

        (0..8).all(|i| {
            let angle = (i as f32 * 45.0).to_radians();
            let probe = Vec2::new(angle.cos(), angle.sin()) * SPAWN_PROBE_DISTANCE * TILE_SIZE;
            !self.is_land(pos + probe)
        })
    }

    /// Expanding square-ring search from the origin for open water.
    pub fn find_safe_spawn_checked(&mut self) -> Option<Vec2> {
        if self.is_open_ocean(Vec2::ZERO) {
            return Some(Vec2::ZERO);
        }

        let mut ring = SPAWN_SEARCH_STEP;
        while ring <= SPAWN_SEARCH_LIMIT {
            for dy in (-ring..=ring).step_by(SPAWN_SEARCH_STEP as usize) {
                for dx in (-ring..=ring).step_by(SPAWN_SEARCH_STEP as usize) {
                    if dx.abs() != ring && dy.abs() != ring {
                        continue;
                    }
                    let candidate = Vec2::new(dx as f32, dy as f32) * TILE_SIZE;
                    if self.is_open_ocean(candidate) {
                        return Some(candidate);
                    }
                }
            }
            ring += SPAWN_SEARCH_STEP;
        }

        None
    }

    /// Like [`ChunkStore::find_safe_spawn_checked`], falling back to the
    /// origin when nothing qualifies.
    pub fn find_safe_spawn(&mut self) -> Vec2 {
        match self.find_safe_spawn_checked() {
            Some(spawn) => {
                info!("Safe spawn found at ({:.0}, {:.0})", spawn.x, spawn.y);
                spawn
            },
            None => {
                warn!(
                    "No open water within {SPAWN_SEARCH_LIMIT} tiles of the origin, spawning at (0, 0)"
                );
                Vec2::ZERO
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_spawn_is_open_ocean() {
        let mut store = ChunkStore::with_seed(12345);
        let spawn = store.find_safe_spawn_checked().expect("open water near origin");
        assert!(store.is_open_ocean(spawn));
        assert_eq!(store.find_safe_spawn(), spawn);
    }

    #[test]
    fn test_checked_spawn_qualifies() {
        for seed in [1, 42, 9001] {
            let mut store = ChunkStore::with_seed(seed);
            if let Some(spawn) = store.find_safe_spawn_checked() {
                assert!(store.is_open_ocean(spawn));
                assert!(!store.is_land(spawn));
            }
        }
    }

    #[test]
    fn test_spawn_search_is_deterministic() {
        let a = ChunkStore::with_seed(777).find_safe_spawn();
        let b = ChunkStore::with_seed(777).find_safe_spawn();
        assert_eq!(a, b);
    }
}
