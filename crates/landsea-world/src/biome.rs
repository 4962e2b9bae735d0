//! Island biomes and their resource spawn tables.

use serde::{Deserialize, Serialize};

use crate::resource::ResourceType;

/// Height above which a tile is land.
pub const WATER_LEVEL: f32 = 0.5;

/// Upper height bound of the beach band.
pub const BEACH_LEVEL: f32 = 0.55;

/// Height above which land turns rocky.
pub const ROCK_LEVEL: f32 = 0.85;

/// Moisture above which interior land is jungle.
pub const JUNGLE_MOISTURE: f64 = 0.2;

/// Moisture below which interior land is swamp.
pub const SWAMP_MOISTURE: f64 = -0.2;

/// Biome tag of a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Biome {
    /// Open water
    #[default]
    Ocean,
    /// Sandy beach ring around islands
    Tropical,
    /// Standard green interior
    Grassland,
    /// Wet, murky interior
    Swamp,
    /// Dense, humid interior
    Jungle,
    /// Bare peaks
    Rocky,
}

impl Biome {
    /// Classifies a tile from its height and moisture sample.
    #[must_use]
    pub fn classify(height: f32, moisture: f64) -> Self {
        match height {
            h if h <= WATER_LEVEL => Self::Ocean,
            h if h < BEACH_LEVEL => Self::Tropical,
            h if h <= ROCK_LEVEL => {
                if moisture > JUNGLE_MOISTURE {
                    Self::Jungle
                } else if moisture < SWAMP_MOISTURE {
                    Self::Swamp
                } else {
                    Self::Grassland
                }
            },
            _ => Self::Rocky,
        }
    }

    /// Whether this biome is land.
    #[must_use]
    pub const fn is_land(self) -> bool {
        !matches!(self, Self::Ocean)
    }

    /// Picks the resource (if any) spawned by a uniform roll in [0, 1).
    #[must_use]
    pub fn resource_for_roll(self, roll: f32) -> Option<ResourceType> {
        match self {
            Self::Ocean => None,
            Self::Tropical => (roll < 0.05).then_some(ResourceType::PalmTree),
            Self::Jungle => {
                if roll < 0.15 {
                    Some(ResourceType::Mahogany)
                } else if roll < 0.25 {
                    Some(ResourceType::Bush)
                } else {
                    None
                }
            },
            Self::Swamp => (roll < 0.05).then_some(ResourceType::Mangrove),
            Self::Rocky => (roll < 0.05).then_some(ResourceType::Rock),
            Self::Grassland => (roll < 0.02).then_some(ResourceType::BerryBush),
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ocean => "Ocean",
            Self::Tropical => "Tropical",
            Self::Grassland => "Grassland",
            Self::Swamp => "Swamp",
            Self::Jungle => "Jungle",
            Self::Rocky => "Rocky",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_bands() {
        assert_eq!(Biome::classify(0.2, 0.0), Biome::Ocean);
        assert_eq!(Biome::classify(0.5, 0.0), Biome::Ocean);
        assert_eq!(Biome::classify(0.52, 0.9), Biome::Tropical);
        assert_eq!(Biome::classify(0.7, 0.5), Biome::Jungle);
        assert_eq!(Biome::classify(0.7, -0.5), Biome::Swamp);
        assert_eq!(Biome::classify(0.7, 0.0), Biome::Grassland);
        assert_eq!(Biome::classify(0.9, 0.0), Biome::Rocky);
    }

    #[test]
    fn test_resource_table() {
        assert_eq!(Biome::Ocean.resource_for_roll(0.0), None);
        assert_eq!(Biome::Tropical.resource_for_roll(0.01), Some(ResourceType::PalmTree));
        assert_eq!(Biome::Tropical.resource_for_roll(0.06), None);
        assert_eq!(Biome::Jungle.resource_for_roll(0.1), Some(ResourceType::Mahogany));
        assert_eq!(Biome::Jungle.resource_for_roll(0.2), Some(ResourceType::Bush));
        assert_eq!(Biome::Jungle.resource_for_roll(0.3), None);
        assert_eq!(Biome::Grassland.resource_for_roll(0.019), Some(ResourceType::BerryBush));
        assert_eq!(Biome::Grassland.resource_for_roll(0.021), None);
    }
}
