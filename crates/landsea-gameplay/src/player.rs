//! Player controller.
//!
//! The player is either aboard, with a position in boat-local space that
//! rides along with the hull, or ashore with a world position. Walking off
//! the deck onto land goes ashore; walking onto a deck tile boards.

use glam::Vec2;
use landsea_common::{ItemStack, ItemType, TILE_SIZE};
use landsea_world::{ChunkStore, RestEffect, ResourceNode, ResourceType};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::boat::{BuildError, Boat, LandQuery};
use crate::inventory::{Inventory, InventoryError, InventoryResult, PLAYER_INVENTORY_SLOTS};
use crate::parts::PartInteraction;
use crate::vitals::Vitals;

/// Walking speed in pixels per second.
pub const PLAYER_SPEED: f32 = 150.0;
/// Reach for attacks and campfires.
pub const REACH: f32 = 48.0;
/// Stamina per swing.
pub const ATTACK_STAMINA: f32 = 5.0;
/// Bare-handed damage.
pub const BASE_DAMAGE: f32 = 20.0;
/// Durability a tool loses per bonus hit.
pub const TOOL_WEAR: f32 = 5.0;
/// Planks per hull tile.
pub const HULL_PLANK_COST: u32 = 2;

/// Items tried in order when eating.
const FOOD_PREFERENCE: [ItemType; 4] = [
    ItemType::Berry,
    ItemType::Coconut,
    ItemType::Food,
    ItemType::Water,
];

/// Errors from placing things.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaceError {
    /// Missing materials
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    /// Hull placement rejected
    #[error(transparent)]
    Build(#[from] BuildError),
    /// Campfires need solid ground
    #[error("Cannot place a campfire on water at ({x:.0}, {y:.0})")]
    NotOnLand {
        /// World X
        x: f32,
        /// World Y
        y: f32,
    },
    /// The chunk under the target was not loaded
    #[error("Chunk under ({x:.0}, {y:.0}) is not loaded")]
    ChunkNotLoaded {
        /// World X
        x: f32,
        /// World Y
        y: f32,
    },
}

/// Cardinal facing, used to pick build targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// +Y
    #[default]
    Up,
    /// -Y
    Down,
    /// -X
    Left,
    /// +X
    Right,
}

impl Direction {
    /// Unit cell offset.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, 1),
            Self::Down => (0, -1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Unit vector.
    #[must_use]
    pub fn to_vec2(self) -> Vec2 {
        let (x, y) = self.offset();
        Vec2::new(x as f32, y as f32)
    }

    /// Dominant axis of a movement vector.
    #[must_use]
    pub fn from_vec2(v: Vec2) -> Option<Self> {
        if v == Vec2::ZERO {
            return None;
        }
        Some(if v.x.abs() > v.y.abs() {
            if v.x > 0.0 {
                Self::Right
            } else {
                Self::Left
            }
        } else if v.y > 0.0 {
            Self::Up
        } else {
            Self::Down
        })
    }
}

/// Where the player stands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Location {
    /// On deck, in boat-local pixels
    Aboard(Vec2),
    /// On an island, in world pixels
    Ashore(Vec2),
}

/// Result of the interact command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InteractOutcome {
    /// Let go of the tiller
    StoppedSteering,
    /// Used a boat part
    Part(PartInteraction),
    /// Rested at a campfire
    Rested(RestEffect),
    /// Nothing in reach
    Nothing,
}

/// Result of an attack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttackOutcome {
    /// Too tired to swing
    Exhausted,
    /// Nothing in reach
    Missed,
    /// Struck a resource
    Hit {
        /// What was struck
        target: ResourceType,
        /// Damage dealt
        damage: f32,
        /// What the node dropped, if it was depleted
        drop: Option<ItemStack>,
        /// Part of the drop the inventory had no room for
        overflow: Option<ItemStack>,
    },
}

/// What a successful place command built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Placed {
    /// A hull tile at a grid cell
    Hull {
        /// Grid X
        x: i32,
        /// Grid Y
        y: i32,
    },
    /// A campfire at a world position
    Campfire(Vec2),
}

/// The player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    location: Location,
    facing: Direction,
    steering: bool,
    /// Health, stamina and hunger
    pub vitals: Vitals,
    /// Carried items
    pub inventory: Inventory,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    /// A fresh player standing at the centre of the deck.
    #[must_use]
    pub fn new() -> Self {
        Self {
            location: Location::Aboard(Vec2::ZERO),
            facing: Direction::default(),
            steering: false,
            vitals: Vitals::default(),
            inventory: Inventory::new(PLAYER_INVENTORY_SLOTS),
        }
    }

    /// Current location.
    #[must_use]
    pub const fn location(&self) -> Location {
        self.location
    }

    /// Moves the player without collision checks.
    pub fn set_location(&mut self, location: Location) {
        self.location = location;
        if matches!(location, Location::Ashore(_)) {
            self.steering = false;
        }
    }

    /// Facing direction.
    #[must_use]
    pub const fn facing(&self) -> Direction {
        self.facing
    }

    /// Whether movement input drives the rudder.
    #[must_use]
    pub const fn is_steering(&self) -> bool {
        self.steering
    }

    /// Whether the player is on deck.
    #[must_use]
    pub const fn is_aboard(&self) -> bool {
        matches!(self.location, Location::Aboard(_))
    }

    /// World position, following the boat while aboard.
    #[must_use]
    pub fn world_position(&self, boat: &Boat) -> Vec2 {
        match self.location {
            Location::Aboard(local) => boat.local_to_world(local),
            Location::Ashore(world) => world,
        }
    }

    /// Applies movement input. While steering the horizontal axis turns the
    /// rudder instead.
    pub fn update(
        &mut self,
        dt: f32,
        move_x: f32,
        move_y: f32,
        boat: &mut Boat,
        land: &mut impl LandQuery,
    ) {
        if self.steering {
            boat.steer(move_x, dt);
            return;
        }

        let mut dir = Vec2::new(move_x, move_y);
        if dir.x != 0.0 && dir.y != 0.0 {
            dir = dir.normalize();
        }
        let Some(facing) = Direction::from_vec2(dir) else {
            return;
        };
        self.facing = facing;

        let step = dir * PLAYER_SPEED * dt;
        for axis_step in [Vec2::new(step.x, 0.0), Vec2::new(0.0, step.y)] {
            if axis_step == Vec2::ZERO {
                continue;
            }
            match self.location {
                Location::Aboard(local) => self.step_aboard(local + axis_step, boat, land),
                Location::Ashore(world) => self.step_ashore(world + axis_step, boat, land),
            }
        }
    }

    fn step_aboard(&mut self, next: Vec2, boat: &Boat, land: &mut impl LandQuery) {
        if boat.is_tile_walkable(next) {
            self.location = Location::Aboard(next);
            return;
        }
        let world = boat.local_to_world(next);
        if land.is_land(world) {
            debug!("Went ashore at ({:.0}, {:.0})", world.x, world.y);
            self.location = Location::Ashore(world);
        }
    }

    fn step_ashore(&mut self, next: Vec2, boat: &Boat, land: &mut impl LandQuery) {
        let local = boat.world_to_local(next);
        if boat.is_tile_walkable(local) {
            debug!("Boarded the boat");
            self.location = Location::Aboard(local);
        } else if land.is_land(next) {
            self.location = Location::Ashore(next);
        }
    }

    /// Leaves steering, uses the nearest part aboard, or rests at a nearby
    /// campfire.
    pub fn interact(&mut self, boat: &mut Boat, world: &ChunkStore) -> InteractOutcome {
        if self.steering {
            self.steering = false;
            return InteractOutcome::StoppedSteering;
        }

        if let Location::Aboard(local) = self.location {
            if let Some(index) = boat.nearest_part(local, 1.0) {
                let result = boat.interact_part(index);
                if result == PartInteraction::Steer {
                    self.steering = true;
                }
                return InteractOutcome::Part(result);
            }
        }

        let pos = self.world_position(boat);
        match world.closest_resource(pos, REACH).and_then(ResourceNode::interact) {
            Some(effect) => {
                self.vitals.rest(effect);
                InteractOutcome::Rested(effect)
            },
            None => InteractOutcome::Nothing,
        }
    }

    /// Swings at the closest resource in reach.
    ///
    /// A drop that does not fit comes back as `overflow` for the caller to
    /// put somewhere else.
    pub fn attack(
        &mut self,
        boat: &Boat,
        world: &mut ChunkStore,
        rng: &mut fastrand::Rng,
    ) -> InventoryResult<AttackOutcome> {
        if !self.vitals.try_spend_stamina(ATTACK_STAMINA) {
            return Ok(AttackOutcome::Exhausted);
        }

        let pos = self.world_position(boat);
        let Some(node) = world.closest_resource_mut(pos, REACH) else {
            return Ok(AttackOutcome::Missed);
        };

        let target = node.kind;
        let tool = if target.is_tree() {
            Some(ItemType::Axe)
        } else if target.is_rock() {
            Some(ItemType::Pickaxe)
        } else {
            None
        }
        .filter(|tool| self.inventory.has(*tool, 1));

        let damage = if tool.is_some() {
            BASE_DAMAGE * 2.0
        } else {
            BASE_DAMAGE
        };
        let drop = node.take_damage(damage, rng);

        if let Some(tool) = tool {
            self.inventory.damage_tool(tool, TOOL_WEAR)?;
        }
        let overflow = match &drop {
            Some(stack) => self
                .inventory
                .add(stack.clone())
                .err()
                .and_then(InventoryError::into_rejected),
            None => None,
        };

        Ok(AttackOutcome::Hit {
            target,
            damage,
            drop,
            overflow,
        })
    }

    /// Builds a hull tile in the facing cell when aboard, or a campfire in
    /// the facing tile when ashore.
    pub fn place(&mut self, boat: &mut Boat, world: &mut ChunkStore) -> Result<Placed, PlaceError> {
        match self.location {
            Location::Aboard(local) => {
                let have = self.inventory.count(ItemType::Plank);
                if have < HULL_PLANK_COST {
                    return Err(InventoryError::NotEnough {
                        item: ItemType::Plank,
                        needed: HULL_PLANK_COST,
                        have,
                    }
                    .into());
                }

                let geometry = boat.geometry();
                let here = ((local - geometry.origin()) / geometry.tile_size).floor();
                let (dx, dy) = self.facing.offset();
                let (x, y) = (here.x as i32 + dx, here.y as i32 + dy);

                boat.place_hull(x, y)?;
                self.inventory.remove(ItemType::Plank, HULL_PLANK_COST)?;
                Ok(Placed::Hull { x, y })
            },
            Location::Ashore(pos) => {
                let have = self.inventory.count(ItemType::Campfire);
                if have == 0 {
                    return Err(InventoryError::NotEnough {
                        item: ItemType::Campfire,
                        needed: 1,
                        have,
                    }
                    .into());
                }

                let target = pos + self.facing.to_vec2() * TILE_SIZE;
                if !world.is_land(target) {
                    return Err(PlaceError::NotOnLand {
                        x: target.x,
                        y: target.y,
                    });
                }
                if !world.add_resource_node(ResourceNode::new(ResourceType::Campfire, target)) {
                    return Err(PlaceError::ChunkNotLoaded {
                        x: target.x,
                        y: target.y,
                    });
                }
                self.inventory.remove(ItemType::Campfire, 1)?;
                Ok(Placed::Campfire(target))
            },
        }
    }

    /// Eats the first food available. Returns what was eaten.
    pub fn consume(&mut self) -> Option<ItemType> {
        let item = FOOD_PREFERENCE
            .into_iter()
            .find(|item| self.inventory.has(*item, 1))?;
        let nourishment = item.nourishment()?;
        self.inventory.remove(item, 1).ok()?;
        self.vitals.eat(nourishment);
        debug!("Ate {item}");
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Land on an explicit set of world tiles.
    #[derive(Default)]
    struct TileLand(HashSet<(i32, i32)>);

    impl LandQuery for TileLand {
        fn is_land(&mut self, pos: Vec2) -> bool {
            let tile = (pos / TILE_SIZE).floor();
            self.0.contains(&(tile.x as i32, tile.y as i32))
        }
    }

    fn land_tile(store: &mut ChunkStore) -> Vec2 {
        for ty in -256..256 {
            for tx in -256..256 {
                let pos = Vec2::new(tx as f32 * 32.0 + 16.0, ty as f32 * 32.0 + 16.0);
                if store.is_land(pos)
                    && store.is_land(pos + Vec2::new(0.0, 32.0))
                    && store.is_land(pos + Vec2::new(0.0, -32.0))
                {
                    return pos;
                }
            }
        }
        panic!("no land near the origin");
    }

    #[test]
    fn test_direction_from_vec2() {
        assert_eq!(Direction::from_vec2(Vec2::ZERO), None);
        assert_eq!(Direction::from_vec2(Vec2::new(1.0, 0.2)), Some(Direction::Right));
        assert_eq!(Direction::from_vec2(Vec2::new(-0.1, -1.0)), Some(Direction::Down));
        assert_eq!(Direction::Up.offset(), (0, 1));
    }

    #[test]
    fn test_walks_on_deck_and_stops_at_edge() {
        let mut boat = Boat::new(Vec2::ZERO);
        let mut land = TileLand::default();
        let mut player = Player::new();

        player.update(0.1, 1.0, 0.0, &mut boat, &mut land);
        assert_eq!(player.location(), Location::Aboard(Vec2::new(15.0, 0.0)));
        assert_eq!(player.facing(), Direction::Right);

        // The deck ends at local x = 32; water beyond.
        for _ in 0..20 {
            player.update(0.1, 1.0, 0.0, &mut boat, &mut land);
        }
        let Location::Aboard(local) = player.location() else {
            panic!("fell off the boat");
        };
        assert!(local.x < 32.0);
        assert!(boat.is_tile_walkable(local));
    }

    #[test]
    fn test_diagonal_is_normalised() {
        let mut boat = Boat::new(Vec2::ZERO);
        let mut land = TileLand::default();
        let mut player = Player::new();
        player.update(0.1, -1.0, 1.0, &mut boat, &mut land);
        let Location::Aboard(local) = player.location() else {
            panic!("not aboard");
        };
        assert!((local.length() - 15.0).abs() < 1e-3);
    }

    #[test]
    fn test_steering_routes_input_to_rudder() {
        let mut boat = Boat::new(Vec2::ZERO);
        let store = ChunkStore::with_seed(1);
        let mut land = TileLand::default();
        let mut player = Player::new();
        player.set_location(Location::Aboard(Vec2::new(0.0, -40.0)));

        assert_eq!(
            player.interact(&mut boat, &store),
            InteractOutcome::Part(PartInteraction::Steer)
        );
        assert!(player.is_steering());

        player.update(0.25, 1.0, 0.0, &mut boat, &mut land);
        assert_eq!(boat.rudder_angle(), Some(-22.5));
        assert_eq!(player.location(), Location::Aboard(Vec2::new(0.0, -40.0)));

        assert_eq!(player.interact(&mut boat, &store), InteractOutcome::StoppedSteering);
        assert!(!player.is_steering());
    }

    #[test]
    fn test_interact_toggles_sail() {
        let mut boat = Boat::new(Vec2::ZERO);
        let store = ChunkStore::with_seed(1);
        let mut player = Player::new();
        player.set_location(Location::Aboard(Vec2::new(-16.0, -10.0)));
        assert_eq!(
            player.interact(&mut boat, &store),
            InteractOutcome::Part(PartInteraction::Sail(false))
        );
        assert!(!boat.sail_raised());
    }

    #[test]
    fn test_goes_ashore_and_boards_again() {
        let mut boat = Boat::new(Vec2::ZERO);
        let mut land = TileLand::default();
        // Tiles right of the deck edge (world x 32..96) are land.
        for y in -3..3 {
            land.0.insert((1, y));
            land.0.insert((2, y));
        }
        let mut player = Player::new();
        player.set_location(Location::Aboard(Vec2::new(20.0, 0.0)));

        player.update(0.1, 1.0, 0.0, &mut boat, &mut land);
        let Location::Ashore(world) = player.location() else {
            panic!("still aboard");
        };
        assert!((world.x - 35.0).abs() < 1e-3);

        player.update(0.1, -1.0, 0.0, &mut boat, &mut land);
        assert!(player.is_aboard());
    }

    #[test]
    fn test_ashore_blocked_by_water() {
        let mut boat = Boat::new(Vec2::new(-1000.0, 0.0));
        let mut land = TileLand::default();
        land.0.insert((0, 0));
        let mut player = Player::new();
        player.set_location(Location::Ashore(Vec2::new(16.0, 16.0)));

        for _ in 0..10 {
            player.update(0.1, 1.0, 0.0, &mut boat, &mut land);
        }
        let Location::Ashore(world) = player.location() else {
            panic!("boarded a distant boat");
        };
        assert!(world.x < 32.0);
    }

    #[test]
    fn test_attack_harvests_with_tool_bonus() {
        let boat = Boat::new(Vec2::new(-9024.0, 9024.0));
        let mut store = ChunkStore::with_seed(12345);
        let target = Vec2::new(-9024.0, 9024.0);
        store.ensure_loaded(target, 1);
        for node in store.loaded_chunks().flat_map(|c| c.resources()).cloned().collect::<Vec<_>>() {
            if let Some(n) = store.closest_resource_mut(node.position, 0.5) {
                n.depleted = true;
            }
        }
        assert!(store.add_resource_node(ResourceNode::new(ResourceType::Tree, target)));

        let mut player = Player::new();
        player.inventory.add_item(ItemType::Axe, 1).expect("axe");
        let mut rng = fastrand::Rng::with_seed(1);

        let first = player.attack(&boat, &mut store, &mut rng).expect("attack");
        assert_eq!(
            first,
            AttackOutcome::Hit {
                target: ResourceType::Tree,
                damage: 40.0,
                drop: None,
                overflow: None,
            }
        );
        let second = player.attack(&boat, &mut store, &mut rng).expect("attack");
        assert!(matches!(second, AttackOutcome::Hit { drop: Some(_), .. }));
        assert_eq!(player.inventory.count(ItemType::Wood), 3);

        let axe = player.inventory.find(ItemType::Axe).and_then(|s| s.durability).expect("axe");
        assert!((axe.current - 90.0).abs() < f32::EPSILON);
        assert!((player.vitals.stamina.current() - 90.0).abs() < f32::EPSILON);

        assert_eq!(
            player.attack(&boat, &mut store, &mut rng).expect("attack"),
            AttackOutcome::Missed
        );
    }

    #[test]
    fn test_attack_overflow_hands_back_drop() {
        let boat = Boat::new(Vec2::new(-9024.0, 9024.0));
        let mut store = ChunkStore::with_seed(12345);
        let target = Vec2::new(-9024.0, 9024.0);
        store.ensure_loaded(target, 0);
        assert!(store.add_resource_node(ResourceNode::new(ResourceType::Bush, target)));

        let mut player = Player::new();
        player.inventory = Inventory::new(1);
        player.inventory.add_item(ItemType::Stone, 1).expect("stone");
        let mut rng = fastrand::Rng::with_seed(1);

        // The bush is the closest node since it sits on the player.
        let outcome = player.attack(&boat, &mut store, &mut rng).expect("attack");
        let AttackOutcome::Hit { target, drop, overflow, .. } = outcome else {
            panic!("expected a hit, got {outcome:?}");
        };
        assert_eq!(target, ResourceType::Bush);
        assert_eq!(drop, Some(ItemStack::new(ItemType::Fiber, 2)));
        assert_eq!(overflow, Some(ItemStack::new(ItemType::Fiber, 2)));
        assert_eq!(player.inventory.count(ItemType::Fiber), 0);
    }

    #[test]
    fn test_attack_exhausted() {
        let boat = Boat::new(Vec2::ZERO);
        let mut store = ChunkStore::with_seed(1);
        let mut player = Player::new();
        player.vitals.stamina.deplete(97.0);
        let mut rng = fastrand::Rng::with_seed(1);
        assert_eq!(
            player.attack(&boat, &mut store, &mut rng).expect("attack"),
            AttackOutcome::Exhausted
        );
    }

    #[test]
    fn test_place_hull_costs_planks() {
        let mut boat = Boat::new(Vec2::ZERO);
        let mut store = ChunkStore::with_seed(1);
        let mut player = Player::new();
        let mut land = TileLand::default();

        assert!(matches!(
            player.place(&mut boat, &mut store),
            Err(PlaceError::Inventory(InventoryError::NotEnough { have: 0, .. }))
        ));

        player.inventory.add_item(ItemType::Plank, 5).expect("planks");
        // Stand on cell (5, 5) and face right: target (6, 5).
        player.update(0.01, 1.0, 0.0, &mut boat, &mut land);
        assert_eq!(player.place(&mut boat, &mut store), Ok(Placed::Hull { x: 6, y: 5 }));
        assert_eq!(player.inventory.count(ItemType::Plank), 3);
        assert_eq!(boat.hull_count(), 9);

        assert_eq!(
            player.place(&mut boat, &mut store),
            Err(PlaceError::Build(BuildError::Occupied { x: 6, y: 5 }))
        );
        assert_eq!(player.inventory.count(ItemType::Plank), 3);
    }

    #[test]
    fn test_place_campfire_ashore_and_rest() {
        let mut store = ChunkStore::with_seed(12345);
        let pos = land_tile(&mut store);
        let mut boat = Boat::new(pos + Vec2::new(5000.0, 5000.0));
        let mut player = Player::new();
        player.set_location(Location::Ashore(pos));
        player.inventory.add_item(ItemType::Campfire, 1).expect("campfire");

        let placed = player.place(&mut boat, &mut store).expect("placed");
        assert_eq!(placed, Placed::Campfire(pos + Vec2::new(0.0, 32.0)));
        assert_eq!(player.inventory.count(ItemType::Campfire), 0);

        player.set_location(Location::Ashore(pos + Vec2::new(0.0, 32.0)));
        player.vitals.health.deplete(50.0);
        assert!(matches!(
            player.interact(&mut boat, &store),
            InteractOutcome::Rested(_)
        ));
        assert!((player.vitals.health.current() - 60.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_consume_prefers_berries() {
        let mut player = Player::new();
        player.vitals.hunger.deplete(50.0);
        player.inventory.add_item(ItemType::Water, 1).expect("water");
        player.inventory.add_item(ItemType::Berry, 1).expect("berry");

        assert_eq!(player.consume(), Some(ItemType::Berry));
        assert_eq!(player.consume(), Some(ItemType::Water));
        assert_eq!(player.consume(), None);
        assert!((player.vitals.hunger.current() - 65.0).abs() < f32::EPSILON);
    }
}
