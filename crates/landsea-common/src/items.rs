//! Item catalogue and item stacks.

use serde::{Deserialize, Serialize};

/// Starting durability for tools.
pub const TOOL_DURABILITY: f32 = 100.0;

/// Every item that can exist in an inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemType {
    /// Basic building material
    Wood,
    /// Metal debris from the old world
    Scrap,
    /// Common waste, useful for crafting
    Plastic,
    /// Heavy rock
    Stone,
    /// Plant material for rope
    Fiber,
    /// Generic sustenance
    Food,
    /// Hydrating fruit
    Coconut,
    /// Small sweet fruit
    Berry,
    /// Fresh water
    Water,
    /// Twisted fiber
    Rope,
    /// Processed wood
    Plank,
    /// A placeable fire
    Campfire,
    /// Chops wood efficiently
    Axe,
    /// Breaks rocks efficiently
    Pickaxe,
}

impl ItemType {
    /// All item types in catalogue order.
    pub const ALL: [Self; 14] = [
        Self::Wood,
        Self::Scrap,
        Self::Plastic,
        Self::Stone,
        Self::Fiber,
        Self::Food,
        Self::Coconut,
        Self::Berry,
        Self::Water,
        Self::Rope,
        Self::Plank,
        Self::Campfire,
        Self::Axe,
        Self::Pickaxe,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wood => "Wood",
            Self::Scrap => "Scrap",
            Self::Plastic => "Plastic",
            Self::Stone => "Stone",
            Self::Fiber => "Fiber",
            Self::Food => "Food",
            Self::Coconut => "Coconut",
            Self::Berry => "Berry",
            Self::Water => "Water",
            Self::Rope => "Rope",
            Self::Plank => "Plank",
            Self::Campfire => "Campfire",
            Self::Axe => "Axe",
            Self::Pickaxe => "Pickaxe",
        }
    }

    /// Flavour text shown in the inventory.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Wood => "Basic building material",
            Self::Scrap => "Metal debris from the old world",
            Self::Plastic => "Common waste, useful for crafting",
            Self::Stone => "Heavy rock",
            Self::Fiber => "Plant material for rope",
            Self::Food => "Generic sustenance",
            Self::Coconut => "Hydrating fruit",
            Self::Berry => "Small sweet fruit",
            Self::Water => "Fresh water",
            Self::Rope => "Twisted fiber",
            Self::Plank => "Processed wood",
            Self::Campfire => "A warm fire",
            Self::Axe => "Chops wood efficiently",
            Self::Pickaxe => "Breaks rocks efficiently",
        }
    }

    /// Whether this item wears down with use.
    #[must_use]
    pub const fn is_tool(self) -> bool {
        matches!(self, Self::Axe | Self::Pickaxe)
    }

    /// Hunger and health restored when eaten, if edible.
    #[must_use]
    pub const fn nourishment(self) -> Option<Nourishment> {
        match self {
            Self::Berry => Some(Nourishment::new(10.0, 2.0)),
            Self::Coconut => Some(Nourishment::new(15.0, 5.0)),
            Self::Food => Some(Nourishment::new(30.0, 5.0)),
            Self::Water => Some(Nourishment::new(5.0, 1.0)),
            _ => None,
        }
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What eating an item restores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Nourishment {
    /// Hunger restored
    pub hunger: f32,
    /// Health restored
    pub health: f32,
}

impl Nourishment {
    /// Creates a nourishment value.
    #[must_use]
    pub const fn new(hunger: f32, health: f32) -> Self {
        Self { hunger, health }
    }
}

/// Current and maximum durability of a tool stack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Durability {
    /// Remaining durability
    pub current: f32,
    /// Durability when new
    pub max: f32,
}

impl Durability {
    /// Creates a fresh durability pair.
    #[must_use]
    pub const fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Whether the tool has worn out.
    #[must_use]
    pub fn is_broken(&self) -> bool {
        self.current <= 0.0
    }

    /// Remaining durability as a fraction (0.0-1.0).
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            return 0.0;
        }
        (self.current / self.max).clamp(0.0, 1.0)
    }
}

/// A quantity of one item type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Item type
    pub item: ItemType,
    /// Number of items
    pub count: u32,
    /// Wear state, tools only
    pub durability: Option<Durability>,
}

impl ItemStack {
    /// Creates a stack, giving tools full durability.
    #[must_use]
    pub fn new(item: ItemType, count: u32) -> Self {
        Self {
            item,
            count,
            durability: item.is_tool().then(|| Durability::new(TOOL_DURABILITY)),
        }
    }

    /// Whether the stack holds nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Reduces durability; returns `true` when the tool just broke.
    /// Non-tools are unaffected.
    pub fn wear(&mut self, amount: f32) -> bool {
        match self.durability.as_mut() {
            Some(durability) => {
                durability.current = (durability.current - amount).max(0.0);
                durability.is_broken()
            },
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_tools_have_durability() {
        assert!(ItemStack::new(ItemType::Axe, 1).durability.is_some());
        assert!(ItemStack::new(ItemType::Pickaxe, 1).durability.is_some());
        assert!(ItemStack::new(ItemType::Wood, 10).durability.is_none());
    }

    #[test]
    fn test_wear_breaks_at_zero() {
        let mut axe = ItemStack::new(ItemType::Axe, 1);
        assert!(!axe.wear(60.0));
        assert!(axe.wear(60.0));
        let durability = axe.durability.expect("tool durability");
        assert!(durability.current.abs() < f32::EPSILON);
        assert_eq!(axe.count, 1);
    }

    #[test]
    fn test_wear_ignores_materials() {
        let mut wood = ItemStack::new(ItemType::Wood, 3);
        assert!(!wood.wear(500.0));
        assert_eq!(wood, ItemStack::new(ItemType::Wood, 3));
    }

    #[test]
    fn test_food_nourishment() {
        assert!(ItemType::Berry.nourishment().is_some());
        assert!(ItemType::Stone.nourishment().is_none());
        assert_eq!(ItemType::Plank.to_string(), "Plank");
    }
}
