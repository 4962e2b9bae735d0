//! Crafting recipes and the recipe book.

use landsea_common::ItemType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::inventory::{Inventory, InventoryError};

/// Crafting error types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CraftingError {
    /// Recipe not found
    #[error("Recipe not found: #{0}")]
    RecipeNotFound(usize),
    /// Missing specific ingredient
    #[error("Missing ingredient: {item}, need {needed}, have {have}")]
    MissingIngredient {
        /// Item that's missing
        item: ItemType,
        /// Amount needed
        needed: u32,
        /// Amount available
        have: u32,
    },
    /// Inventory full (can't add output)
    #[error("Inventory full: cannot add crafted {0}")]
    InventoryFull(ItemType),
    /// Inventory error
    #[error("Inventory error: {0}")]
    Inventory(#[from] InventoryError),
}

/// Result type for crafting operations.
pub type CraftingResult<T> = Result<T, CraftingError>;

/// An ingredient for a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Item type required
    pub item: ItemType,
    /// Quantity required
    pub quantity: u32,
}

impl Ingredient {
    /// Creates a new ingredient requirement.
    #[must_use]
    pub const fn new(item: ItemType, quantity: u32) -> Self {
        Self { item, quantity }
    }
}

/// An immutable crafting recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Required ingredients
    pub ingredients: Vec<Ingredient>,
    /// Output item
    pub output: ItemType,
    /// Output quantity
    pub output_quantity: u32,
}

impl Recipe {
    /// Starts a recipe producing `quantity` of `output`.
    #[must_use]
    pub fn builder(output: ItemType, quantity: u32) -> RecipeBuilder {
        RecipeBuilder {
            ingredients: Vec::new(),
            output,
            output_quantity: quantity,
        }
    }

    /// Display name, taken from the output item.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.output.name()
    }
}

/// Builder for creating recipes.
#[derive(Debug)]
pub struct RecipeBuilder {
    ingredients: Vec<Ingredient>,
    output: ItemType,
    output_quantity: u32,
}

impl RecipeBuilder {
    /// Adds an ingredient requirement.
    #[must_use]
    pub fn ingredient(mut self, item: ItemType, quantity: u32) -> Self {
        self.ingredients.push(Ingredient::new(item, quantity));
        self
    }

    /// Builds the recipe.
    #[must_use]
    pub fn build(self) -> Recipe {
        Recipe {
            ingredients: self.ingredients,
            output: self.output,
            output_quantity: self.output_quantity,
        }
    }
}

/// Ordered recipe catalogue. Recipes are addressed by index.
#[derive(Debug, Clone)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
}

impl Default for RecipeBook {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeBook {
    /// The standard catalogue: Rope, Plank, Campfire, Axe, Pickaxe.
    #[must_use]
    pub fn new() -> Self {
        let recipes = vec![
            Recipe::builder(ItemType::Rope, 1)
                .ingredient(ItemType::Fiber, 2)
                .build(),
            Recipe::builder(ItemType::Plank, 1)
                .ingredient(ItemType::Wood, 2)
                .build(),
            Recipe::builder(ItemType::Campfire, 1)
                .ingredient(ItemType::Stone, 4)
                .ingredient(ItemType::Wood, 4)
                .build(),
            Recipe::builder(ItemType::Axe, 1)
                .ingredient(ItemType::Stone, 2)
                .ingredient(ItemType::Wood, 2)
                .ingredient(ItemType::Rope, 1)
                .build(),
            Recipe::builder(ItemType::Pickaxe, 1)
                .ingredient(ItemType::Stone, 3)
                .ingredient(ItemType::Wood, 2)
                .ingredient(ItemType::Rope, 1)
                .build(),
        ];
        Self { recipes }
    }

    /// All recipes in catalogue order.
    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Recipe at `index`.
    pub fn get(&self, index: usize) -> CraftingResult<&Recipe> {
        self.recipes
            .get(index)
            .ok_or(CraftingError::RecipeNotFound(index))
    }

    /// Number of recipes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Whether the book is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Applies a recipe to a copy of `inventory` and returns the copy.
    fn stage(recipe: &Recipe, inventory: &Inventory) -> CraftingResult<Inventory> {
        for ingredient in &recipe.ingredients {
            let have = inventory.count(ingredient.item);
            if have < ingredient.quantity {
                return Err(CraftingError::MissingIngredient {
                    item: ingredient.item,
                    needed: ingredient.quantity,
                    have,
                });
            }
        }

        let mut staged = inventory.clone();
        for ingredient in &recipe.ingredients {
            staged.remove(ingredient.item, ingredient.quantity)?;
        }
        staged
            .add_item(recipe.output, recipe.output_quantity)
            .map_err(|_| CraftingError::InventoryFull(recipe.output))?;
        Ok(staged)
    }

    /// Checks every requirement, including room for the output.
    pub fn validate_craft(&self, index: usize, inventory: &Inventory) -> CraftingResult<()> {
        Self::stage(self.get(index)?, inventory).map(|_| ())
    }

    /// Whether the recipe at `index` can be crafted right now.
    #[must_use]
    pub fn can_craft(&self, index: usize, inventory: &Inventory) -> bool {
        self.validate_craft(index, inventory).is_ok()
    }

    /// Crafts all-or-nothing: on error the inventory is unchanged.
    pub fn craft(&self, index: usize, inventory: &mut Inventory) -> CraftingResult<ItemType> {
        let recipe = self.get(index)?;
        *inventory = Self::stage(recipe, inventory)?;
        Ok(recipe.output)
    }

    /// Recipes that can be crafted with the given inventory.
    pub fn available_recipes<'a>(
        &'a self,
        inventory: &'a Inventory,
    ) -> impl Iterator<Item = &'a Recipe> {
        self.recipes
            .iter()
            .enumerate()
            .filter(move |(index, _)| self.can_craft(*index, inventory))
            .map(|(_, recipe)| recipe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_order() {
        let book = RecipeBook::new();
        let outputs: Vec<_> = book.recipes().iter().map(|r| r.output).collect();
        assert_eq!(
            outputs,
            vec![
                ItemType::Rope,
                ItemType::Plank,
                ItemType::Campfire,
                ItemType::Axe,
                ItemType::Pickaxe
            ]
        );
        assert_eq!(book.get(3).expect("axe").name(), "Axe");
        assert_eq!(book.get(9), Err(CraftingError::RecipeNotFound(9)));
    }

    #[test]
    fn test_craft_consumes_and_produces() {
        let book = RecipeBook::new();
        let mut inv = Inventory::new(5);
        inv.add_item(ItemType::Stone, 2).expect("add");
        inv.add_item(ItemType::Wood, 3).expect("add");
        inv.add_item(ItemType::Rope, 1).expect("add");

        assert!(book.can_craft(3, &inv));
        assert_eq!(book.craft(3, &mut inv), Ok(ItemType::Axe));
        assert_eq!(inv.count(ItemType::Axe), 1);
        assert_eq!(inv.count(ItemType::Wood), 1);
        assert_eq!(inv.count(ItemType::Stone), 0);
        assert_eq!(inv.count(ItemType::Rope), 0);
        assert!(inv.find(ItemType::Axe).and_then(|s| s.durability).is_some());
    }

    #[test]
    fn test_missing_ingredient_leaves_inventory() {
        let book = RecipeBook::new();
        let mut inv = Inventory::new(5);
        inv.add_item(ItemType::Stone, 4).expect("add");
        inv.add_item(ItemType::Wood, 3).expect("add");
        let before = inv.clone();

        assert!(!book.can_craft(2, &inv));
        assert_eq!(
            book.craft(2, &mut inv),
            Err(CraftingError::MissingIngredient {
                item: ItemType::Wood,
                needed: 4,
                have: 3
            })
        );
        assert_eq!(inv, before);
    }

    #[test]
    fn test_craft_atomic_when_output_does_not_fit() {
        let book = RecipeBook::new();
        let mut inv = Inventory::new(2);
        inv.add_item(ItemType::Wood, 5).expect("add");
        inv.add_item(ItemType::Stone, 1).expect("add");
        let before = inv.clone();

        assert_eq!(
            book.craft(1, &mut inv),
            Err(CraftingError::InventoryFull(ItemType::Plank))
        );
        assert_eq!(inv, before);
    }

    #[test]
    fn test_craft_fits_when_ingredients_free_a_slot() {
        let book = RecipeBook::new();
        let mut inv = Inventory::new(1);
        inv.add_item(ItemType::Fiber, 2).expect("add");
        assert_eq!(book.craft(0, &mut inv), Ok(ItemType::Rope));
        assert_eq!(inv.count(ItemType::Rope), 1);
        assert_eq!(inv.slots().len(), 1);
    }

    #[test]
    fn test_available_recipes() {
        let book = RecipeBook::new();
        let mut inv = Inventory::new(5);
        inv.add_item(ItemType::Wood, 2).expect("add");
        let available: Vec<_> = book.available_recipes(&inv).map(|r| r.output).collect();
        assert_eq!(available, vec![ItemType::Plank]);
    }
}
