//! Harvestable world objects.

use glam::Vec2;
use landsea_common::{ItemStack, ItemType};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Kind of a resource node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    /// Generic tree
    Tree,
    /// Beach palm
    PalmTree,
    /// Swamp mangrove
    Mangrove,
    /// Jungle hardwood
    Mahogany,
    /// Boulder
    Rock,
    /// Fibrous shrub
    Bush,
    /// Shrub with berries
    BerryBush,
    /// Player-built fire
    Campfire,
}

impl ResourceType {
    /// Starting health of a fresh node.
    #[must_use]
    pub const fn max_health(self) -> f32 {
        match self {
            Self::Tree | Self::PalmTree | Self::Mangrove => 60.0,
            Self::Mahogany | Self::Campfire => 100.0,
            Self::Rock => 80.0,
            Self::Bush | Self::BerryBush => 20.0,
        }
    }

    /// Whether an axe deals bonus damage.
    #[must_use]
    pub const fn is_tree(self) -> bool {
        matches!(
            self,
            Self::Tree | Self::PalmTree | Self::Mangrove | Self::Mahogany
        )
    }

    /// Whether a pickaxe deals bonus damage.
    #[must_use]
    pub const fn is_rock(self) -> bool {
        matches!(self, Self::Rock)
    }
}

/// Effect of resting at a campfire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RestEffect {
    /// Health restored
    pub heal: f32,
    /// Stamina restored
    pub stamina: f32,
}

/// Rest effect granted by a campfire.
pub const CAMPFIRE_REST: RestEffect = RestEffect {
    heal: 10.0,
    stamina: 50.0,
};

/// A damageable object anchored to a world pixel position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceNode {
    /// World pixel position
    pub position: Vec2,
    /// Node kind
    pub kind: ResourceType,
    /// Remaining health
    pub health: f32,
    /// Health when fresh
    pub max_health: f32,
    /// Set once health reaches zero; never cleared
    pub depleted: bool,
}

impl ResourceNode {
    /// Creates a fresh node at full health.
    #[must_use]
    pub fn new(kind: ResourceType, position: Vec2) -> Self {
        let max_health = kind.max_health();
        Self {
            position,
            kind,
            health: max_health,
            max_health,
            depleted: false,
        }
    }

    /// Applies damage. Returns the drop when this hit depletes the node.
    pub fn take_damage(&mut self, amount: f32, rng: &mut fastrand::Rng) -> Option<ItemStack> {
        if self.depleted {
            return None;
        }

        self.health -= amount;
        if self.health > 0.0 {
            return None;
        }

        self.health = 0.0;
        self.depleted = true;
        let drop = self.roll_drop(rng);
        debug!(
            "{:?} at ({:.0}, {:.0}) depleted, dropped {} {}",
            self.kind, self.position.x, self.position.y, drop.count, drop.item
        );
        Some(drop)
    }

    fn roll_drop(&self, rng: &mut fastrand::Rng) -> ItemStack {
        match self.kind {
            ResourceType::Tree | ResourceType::Mangrove => ItemStack::new(ItemType::Wood, 3),
            ResourceType::PalmTree => {
                let item = if rng.bool() {
                    ItemType::Wood
                } else {
                    ItemType::Coconut
                };
                ItemStack::new(item, 3)
            },
            ResourceType::Mahogany => ItemStack::new(ItemType::Wood, 5),
            ResourceType::Rock => ItemStack::new(ItemType::Stone, 3),
            ResourceType::Bush => ItemStack::new(ItemType::Fiber, 2),
            ResourceType::BerryBush => {
                let item = if rng.bool() {
                    ItemType::Fiber
                } else {
                    ItemType::Berry
                };
                ItemStack::new(item, 2)
            },
            ResourceType::Campfire => ItemStack::new(ItemType::Stone, 2),
        }
    }

    /// Rest at this node. Only live campfires have an effect.
    #[must_use]
    pub fn interact(&self) -> Option<RestEffect> {
        (self.kind == ResourceType::Campfire && !self.depleted).then_some(CAMPFIRE_REST)
    }

    /// Remaining health as a fraction (0.0-1.0).
    #[must_use]
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health).clamp(0.0, 1.0)
    }
}
