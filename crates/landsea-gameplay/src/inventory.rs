//! Inventory system.

use landsea_common::{Durability, ItemStack, ItemType, TOOL_DURABILITY};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Slots in the player's inventory.
pub const PLAYER_INVENTORY_SLOTS: usize = 20;

/// Slots in a boat crate.
pub const CRATE_INVENTORY_SLOTS: usize = 5;

/// Inventory error types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InventoryError {
    /// Not enough items
    #[error("Not enough {item}: need {needed}, have {have}")]
    NotEnough {
        /// Item asked for
        item: ItemType,
        /// Amount needed
        needed: u32,
        /// Amount available
        have: u32,
    },
    /// No free slot for a new item type; the stack is handed back
    #[error("Inventory full: capacity {capacity}")]
    Full {
        /// Inventory capacity
        capacity: usize,
        /// The stack that did not fit
        rejected: ItemStack,
    },
    /// Item not found
    #[error("Item not found: {0}")]
    NotFound(ItemType),
}

impl InventoryError {
    /// Takes back the stack refused by a full inventory.
    #[must_use]
    pub fn into_rejected(self) -> Option<ItemStack> {
        match self {
            Self::Full { rejected, .. } => Some(rejected),
            _ => None,
        }
    }
}

/// Result type for inventory operations.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Bounded, ordered item stacks. At most one stack per item type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    /// Stacks in insertion order
    slots: Vec<ItemStack>,
    /// Maximum number of stacks
    capacity: usize,
}

impl Inventory {
    /// Creates an empty inventory with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns the capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the stacks in slot order.
    #[must_use]
    pub fn slots(&self) -> &[ItemStack] {
        &self.slots
    }

    /// Whether every slot is taken.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    /// Whether the inventory holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the count of a specific item.
    #[must_use]
    pub fn count(&self, item: ItemType) -> u32 {
        self.find(item).map_or(0, |stack| stack.count)
    }

    /// Checks if the inventory contains at least the given amount.
    #[must_use]
    pub fn has(&self, item: ItemType, amount: u32) -> bool {
        self.count(item) >= amount
    }

    /// Returns the stack of an item type, if any.
    #[must_use]
    pub fn find(&self, item: ItemType) -> Option<&ItemStack> {
        self.slots.iter().find(|stack| stack.item == item)
    }

    /// Whether `item` could be added without error.
    #[must_use]
    pub fn can_accept(&self, item: ItemType) -> bool {
        self.find(item).is_some() || !self.is_full()
    }

    /// Adds a stack, merging into an existing stack of the same type.
    pub fn add(&mut self, stack: ItemStack) -> InventoryResult<()> {
        if stack.is_empty() {
            return Ok(());
        }
        if let Some(existing) = self.slots.iter_mut().find(|s| s.item == stack.item) {
            existing.count += stack.count;
            return Ok(());
        }
        if self.is_full() {
            return Err(InventoryError::Full {
                capacity: self.capacity,
                rejected: stack,
            });
        }
        self.slots.push(stack);
        Ok(())
    }

    /// Adds `amount` fresh items of a type.
    pub fn add_item(&mut self, item: ItemType, amount: u32) -> InventoryResult<()> {
        self.add(ItemStack::new(item, amount))
    }

    /// Removes items. Leaves the inventory untouched on error.
    pub fn remove(&mut self, item: ItemType, amount: u32) -> InventoryResult<()> {
        let Some(index) = self.slots.iter().position(|s| s.item == item) else {
            return Err(InventoryError::NotEnough {
                item,
                needed: amount,
                have: 0,
            });
        };

        let have = self.slots[index].count;
        if have < amount {
            return Err(InventoryError::NotEnough {
                item,
                needed: amount,
                have,
            });
        }

        self.slots[index].count -= amount;
        if self.slots[index].is_empty() {
            self.slots.remove(index);
        }
        Ok(())
    }

    /// Wears the tool of type `item`. A tool that breaks is removed from
    /// its stack; the next one in the stack starts fresh. Returns `true`
    /// when a tool broke.
    pub fn damage_tool(&mut self, item: ItemType, amount: f32) -> InventoryResult<bool> {
        let index = self
            .slots
            .iter()
            .position(|s| s.item == item)
            .ok_or(InventoryError::NotFound(item))?;

        let stack = &mut self.slots[index];
        if !stack.wear(amount) {
            return Ok(false);
        }

        debug!("{item} broke");
        stack.count -= 1;
        if stack.is_empty() {
            self.slots.remove(index);
        } else {
            stack.durability = Some(Durability::new(TOOL_DURABILITY));
        }
        Ok(true)
    }
}
