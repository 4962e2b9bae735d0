//! Game session: owns every subsystem and advances them in a fixed order.

use std::collections::VecDeque;

use glam::Vec2;
use landsea_common::{ItemStack, ItemType};
use landsea_world::{ChunkStore, WorldConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::boat::Boat;
use crate::crafting::{CraftingError, RecipeBook};
use crate::input::InputState;
use crate::inventory::InventoryError;
use crate::player::{AttackOutcome, InteractOutcome, Location, PlaceError, Placed, Player};
use crate::time::DayClock;
use crate::weather::{WeatherConfig, WeatherState, WeatherSystem};
use crate::wind::{Wind, WindSource};

/// Boat speed above which the wake trail grows.
const WAKE_MIN_SPEED: f32 = 10.0;
/// Seconds between wake points.
const WAKE_INTERVAL: f32 = 0.1;
/// Wake points kept.
const WAKE_LENGTH: usize = 50;

/// Prevailing wind settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindConfig {
    /// Speed before weather scaling
    pub base_speed: f32,
    /// Prevailing direction in degrees, 0 is east
    pub base_angle: f32,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            base_speed: 100.0,
            base_angle: 0.0,
        }
    }
}

/// Everything needed to start a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// World generation and streaming
    pub world: WorldConfig,
    /// Weather timing
    pub weather: WeatherConfig,
    /// Prevailing wind
    pub wind: WindConfig,
}

/// Open overlay menu. At most one is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Menu {
    /// No menu
    #[default]
    Closed,
    /// Inventory grid
    Inventory,
    /// Recipe list
    Crafting,
}

/// Something that happened during a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Weather spell ended
    WeatherChanged(WeatherState),
    /// Boat hit land and bounced
    Collided,
    /// Interact did something
    Interacted(InteractOutcome),
    /// Attack resolved
    Attacked(AttackOutcome),
    /// A drop went into the boat crate because the player was full
    Stashed(ItemStack),
    /// A drop fit nowhere
    ItemLost(ItemStack),
    /// Place succeeded
    Placed(Placed),
    /// Place failed
    PlaceFailed(PlaceError),
    /// Player ate
    Ate(ItemType),
    /// Boat pushed off
    Kicked,
    /// Overlay menu changed
    MenuChanged(Menu),
    /// Recipe crafted
    Crafted(ItemType),
    /// Recipe could not be crafted
    CraftFailed(CraftingError),
}

/// Boat state for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct BoatSnapshot {
    /// World position
    pub position: Vec2,
    /// Velocity
    pub velocity: Vec2,
    /// Heading in degrees
    pub angle: f32,
    /// Hull tiles
    pub hull_count: u32,
    /// Current mass
    pub mass: f32,
    /// Sail state
    pub sail_raised: bool,
    /// Anchor state
    pub anchor_dropped: bool,
    /// Rudder deflection
    pub rudder_angle: Option<f32>,
    /// Crate contents
    pub crate_items: Vec<ItemStack>,
}

/// Player state for the HUD.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSnapshot {
    /// World position
    pub position: Vec2,
    /// On deck or ashore
    pub aboard: bool,
    /// Holding the tiller
    pub steering: bool,
    /// Health
    pub health: f32,
    /// Stamina
    pub stamina: f32,
    /// Hunger
    pub hunger: f32,
    /// Carried stacks
    pub items: Vec<ItemStack>,
}

/// Serializable view of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    /// Seconds simulated
    pub elapsed: f32,
    /// Boat
    pub boat: BoatSnapshot,
    /// Player
    pub player: PlayerSnapshot,
    /// Wind vector
    pub wind: Vec2,
    /// Weather name
    pub weather: &'static str,
    /// `Day N - HH:MM`
    pub clock: String,
    /// Ambient light
    pub light: f32,
    /// Night flag
    pub night: bool,
    /// Open menu
    pub menu: Menu,
    /// Names of craftable recipes
    pub craftable: Vec<&'static str>,
    /// Chunks in memory
    pub loaded_chunks: usize,
    /// Recent rudder positions, oldest first
    pub wake: Vec<Vec2>,
}

/// A running game.
#[derive(Debug)]
pub struct GameSession {
    world: ChunkStore,
    boat: Boat,
    player: Player,
    wind: Wind,
    weather: WeatherSystem,
    clock: DayClock,
    recipes: RecipeBook,
    rng: fastrand::Rng,
    menu: Menu,
    previous_input: InputState,
    wake: VecDeque<Vec2>,
    wake_timer: f32,
    elapsed: f32,
}

impl GameSession {
    /// Builds the world, spawns the boat in open water and puts the player
    /// on deck.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let seed = config.world.seed;
        let mut world = ChunkStore::new(config.world);
        let spawn = world.find_safe_spawn();
        world.update(spawn);

        info!(
            "Session started with seed {seed}, boat at ({:.0}, {:.0})",
            spawn.x, spawn.y
        );

        Self {
            world,
            boat: Boat::new(spawn),
            player: Player::new(),
            wind: Wind::new(config.wind.base_speed, config.wind.base_angle),
            weather: WeatherSystem::with_config(seed.wrapping_add(2), config.weather),
            clock: DayClock::new(),
            recipes: RecipeBook::new(),
            rng: fastrand::Rng::with_seed(seed.wrapping_add(3)),
            menu: Menu::Closed,
            previous_input: InputState::default(),
            wake: VecDeque::with_capacity(WAKE_LENGTH),
            wake_timer: 0.0,
            elapsed: 0.0,
        }
    }

    /// Chunk store.
    #[must_use]
    pub const fn world(&self) -> &ChunkStore {
        &self.world
    }

    /// Mutable chunk store.
    pub fn world_mut(&mut self) -> &mut ChunkStore {
        &mut self.world
    }

    /// The boat.
    #[must_use]
    pub const fn boat(&self) -> &Boat {
        &self.boat
    }

    /// Mutable boat.
    pub fn boat_mut(&mut self) -> &mut Boat {
        &mut self.boat
    }

    /// The player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable player.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Wind.
    #[must_use]
    pub const fn wind(&self) -> &Wind {
        &self.wind
    }

    /// Weather.
    #[must_use]
    pub const fn weather(&self) -> &WeatherSystem {
        &self.weather
    }

    /// Clock.
    #[must_use]
    pub const fn clock(&self) -> &DayClock {
        &self.clock
    }

    /// Recipe catalogue.
    #[must_use]
    pub const fn recipes(&self) -> &RecipeBook {
        &self.recipes
    }

    /// Open menu.
    #[must_use]
    pub const fn menu(&self) -> Menu {
        self.menu
    }

    /// Advances the game by `dt` seconds.
    pub fn tick(&mut self, dt: f32, input: &InputState) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        let previous = std::mem::replace(&mut self.previous_input, *input);
        let pressed = |now: bool, before: bool| now && !before;

        self.elapsed += dt;
        self.wind.update(dt);
        self.clock.update(dt);
        if let Some(state) = self.weather.update(dt) {
            events.push(SessionEvent::WeatherChanged(state));
        }
        self.wind.set_intensity(self.weather.intensity());

        let player_pos = self.player.world_position(&self.boat);
        self.world.update(player_pos);

        if self.boat.update(dt, self.wind.current_wind(), &mut self.world) {
            events.push(SessionEvent::Collided);
        }

        self.player.vitals.update(dt);
        let (move_x, move_y) = input.axes();
        self.player
            .update(dt, move_x, move_y, &mut self.boat, &mut self.world);

        if pressed(input.interact, previous.interact) {
            match self.player.interact(&mut self.boat, &self.world) {
                InteractOutcome::Nothing => {},
                outcome => {
                    debug!("Interact: {outcome:?}");
                    events.push(SessionEvent::Interacted(outcome));
                },
            }
        }

        if pressed(input.attack, previous.attack) {
            match self.player.attack(&self.boat, &mut self.world, &mut self.rng) {
                Ok(outcome) => {
                    let overflow = match &outcome {
                        AttackOutcome::Hit { overflow, .. } => overflow.clone(),
                        _ => None,
                    };
                    events.push(SessionEvent::Attacked(outcome));
                    if let Some(stack) = overflow {
                        events.push(self.stash(stack));
                    }
                },
                Err(err) => warn!("Attack failed: {err}"),
            }
        }

        if pressed(input.place, previous.place) {
            match self.player.place(&mut self.boat, &mut self.world) {
                Ok(placed) => events.push(SessionEvent::Placed(placed)),
                Err(err) => {
                    debug!("Place failed: {err}");
                    events.push(SessionEvent::PlaceFailed(err));
                },
            }
        }

        if pressed(input.consume, previous.consume) {
            if let Some(item) = self.player.consume() {
                events.push(SessionEvent::Ate(item));
            }
        }

        if pressed(input.kick, previous.kick) && self.boat.kick_off(&mut self.world, &mut self.rng) {
            events.push(SessionEvent::Kicked);
        }

        if pressed(input.open_inventory, previous.open_inventory) {
            self.menu = if self.menu == Menu::Inventory {
                Menu::Closed
            } else {
                Menu::Inventory
            };
            events.push(SessionEvent::MenuChanged(self.menu));
        }
        if pressed(input.open_crafting, previous.open_crafting) {
            self.menu = if self.menu == Menu::Crafting {
                Menu::Closed
            } else {
                Menu::Crafting
            };
            events.push(SessionEvent::MenuChanged(self.menu));
        }

        if self.menu == Menu::Crafting && input.number_pressed != previous.number_pressed {
            if let Some(event) = input.number_pressed.and_then(|n| self.craft_slot(n)) {
                events.push(event);
            }
        }

        self.update_wake(dt);
        events
    }

    /// Crafts the recipe behind a 1-based number key.
    fn craft_slot(&mut self, number: u8) -> Option<SessionEvent> {
        let index = usize::from(number).checked_sub(1)?;
        if index >= self.recipes.len() {
            return None;
        }
        Some(match self.recipes.craft(index, &mut self.player.inventory) {
            Ok(item) => {
                info!("Crafted {item}");
                SessionEvent::Crafted(item)
            },
            Err(err) => {
                debug!("Cannot craft: {err}");
                SessionEvent::CraftFailed(err)
            },
        })
    }

    /// Puts an overflowing drop in the boat crate, or records its loss.
    fn stash(&mut self, stack: ItemStack) -> SessionEvent {
        let Some(storage) = self.boat.crate_inventory_mut() else {
            warn!("Inventory full, lost {} {}", stack.count, stack.item);
            return SessionEvent::ItemLost(stack);
        };
        match storage.add(stack.clone()) {
            Ok(()) => {
                debug!("Inventory full, stashed {} {} in the crate", stack.count, stack.item);
                SessionEvent::Stashed(stack)
            },
            Err(InventoryError::Full { rejected, .. }) => {
                warn!(
                    "Inventory and crate full, lost {} {}",
                    rejected.count, rejected.item
                );
                SessionEvent::ItemLost(rejected)
            },
            Err(err) => {
                warn!("Could not stash {}: {err}", stack.item);
                SessionEvent::ItemLost(stack)
            },
        }
    }

    fn update_wake(&mut self, dt: f32) {
        if self.boat.velocity().length() <= WAKE_MIN_SPEED {
            return;
        }
        self.wake_timer += dt;
        if self.wake_timer > WAKE_INTERVAL {
            self.wake_timer = 0.0;
            if self.wake.len() == WAKE_LENGTH {
                self.wake.pop_front();
            }
            self.wake.push_back(self.boat.rudder_world_position());
        }
    }

    /// Serializable view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let player_position = self.player.world_position(&self.boat);
        SessionSnapshot {
            elapsed: self.elapsed,
            boat: BoatSnapshot {
                position: self.boat.position(),
                velocity: self.boat.velocity(),
                angle: self.boat.angle(),
                hull_count: self.boat.hull_count(),
                mass: self.boat.mass(),
                sail_raised: self.boat.sail_raised(),
                anchor_dropped: self.boat.anchor_dropped(),
                rudder_angle: self.boat.rudder_angle(),
                crate_items: self
                    .boat
                    .crate_inventory()
                    .map(|inv| inv.slots().to_vec())
                    .unwrap_or_default(),
            },
            player: PlayerSnapshot {
                position: player_position,
                aboard: matches!(self.player.location(), Location::Aboard(_)),
                steering: self.player.is_steering(),
                health: self.player.vitals.health.current(),
                stamina: self.player.vitals.stamina.current(),
                hunger: self.player.vitals.hunger.current(),
                items: self.player.inventory.slots().to_vec(),
            },
            wind: self.wind.current_wind(),
            weather: self.weather.current().display_name(),
            clock: self.clock.format(),
            light: self.clock.ambient_light(),
            night: self.clock.is_night(),
            menu: self.menu,
            craftable: self
                .recipes
                .available_recipes(&self.player.inventory)
                .map(|r| r.name())
                .collect(),
            loaded_chunks: self.world.loaded_count(),
            wake: self.wake.iter().copied().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::Inventory;
    use landsea_world::{ResourceNode, ResourceType};

    const DT: f32 = 1.0 / 60.0;

    fn session() -> GameSession {
        GameSession::new(SessionConfig::default())
    }

    #[test]
    fn test_new_session_state() {
        let session = session();
        assert!(session.player().is_aboard());
        assert_eq!(session.weather().current(), WeatherState::Clear);
        assert_eq!(session.clock().format(), "Day 1 - 08:00");
        assert_eq!(session.menu(), Menu::Closed);
        assert!(session.world().loaded_count() >= 25);
        assert_eq!(
            session.player().world_position(session.boat()),
            session.boat().position()
        );
    }

    #[test]
    fn test_idle_ticks_keep_boat_off_land() {
        let mut session = session();
        let idle = InputState::default();
        for _ in 0..600 {
            session.tick(DT, &idle);
        }
        let snapshot = session.snapshot();
        assert!((snapshot.elapsed - 10.0).abs() < 1e-2);
        assert!((session.clock().hour() - 8.4).abs() < 1e-3);

        let hulls: Vec<Vec2> = session.boat().hull_world_positions().collect();
        for pos in hulls {
            assert!(!session.world_mut().is_land(pos));
        }
    }

    #[test]
    fn test_menu_toggles_are_edge_triggered() {
        let mut session = session();
        let held = InputState {
            open_inventory: true,
            ..Default::default()
        };
        let first = session.tick(DT, &held);
        assert!(first.contains(&SessionEvent::MenuChanged(Menu::Inventory)));
        session.tick(DT, &held);
        session.tick(DT, &held);
        assert_eq!(session.menu(), Menu::Inventory);

        session.tick(DT, &InputState::default());
        let crafting = InputState {
            open_crafting: true,
            ..Default::default()
        };
        session.tick(DT, &crafting);
        assert_eq!(session.menu(), Menu::Crafting);

        session.tick(DT, &InputState::default());
        session.tick(DT, &crafting);
        assert_eq!(session.menu(), Menu::Closed);
    }

    #[test]
    fn test_number_keys_craft_only_in_crafting_menu() {
        let mut session = session();
        session
            .player_mut()
            .inventory
            .add_item(ItemType::Fiber, 4)
            .expect("fiber");

        let one = InputState {
            number_pressed: Some(1),
            ..Default::default()
        };
        assert!(session.tick(DT, &one).is_empty());
        session.tick(DT, &InputState::default());

        session.tick(
            DT,
            &InputState {
                open_crafting: true,
                ..Default::default()
            },
        );
        let events = session.tick(DT, &one);
        assert!(events.contains(&SessionEvent::Crafted(ItemType::Rope)));
        assert_eq!(session.player().inventory.count(ItemType::Rope), 1);
        assert_eq!(session.player().inventory.count(ItemType::Fiber), 2);

        // Holding the key does not craft again.
        assert!(session.tick(DT, &one).is_empty());

        let events = session.tick(
            DT,
            &InputState {
                number_pressed: Some(4),
                ..Default::default()
            },
        );
        assert!(matches!(
            events.as_slice(),
            [SessionEvent::CraftFailed(CraftingError::MissingIngredient { .. })]
        ));

        let nine = InputState {
            number_pressed: Some(9),
            ..Default::default()
        };
        assert!(session.tick(DT, &nine).is_empty());
    }

    #[test]
    fn test_full_inventory_drop_goes_to_crate() {
        let mut session = session();
        {
            let player = session.player_mut();
            player.inventory = Inventory::new(1);
            player.inventory.add_item(ItemType::Stone, 1).expect("stone");
        }
        let pos = session.player().world_position(session.boat());
        assert!(session
            .world_mut()
            .add_resource_node(ResourceNode::new(ResourceType::Bush, pos)));

        let attack = InputState {
            attack: true,
            ..Default::default()
        };
        let events = session.tick(0.0, &attack);
        let fiber = ItemStack::new(ItemType::Fiber, 2);
        assert!(events.iter().any(|e| matches!(
            e,
            SessionEvent::Attacked(AttackOutcome::Hit {
                target: ResourceType::Bush,
                overflow: Some(stack),
                ..
            }) if *stack == fiber
        )));
        assert!(events.contains(&SessionEvent::Stashed(fiber)));
        let crate_inv = session.boat().crate_inventory().expect("crate");
        assert_eq!(crate_inv.count(ItemType::Fiber), 2);
    }

    #[test]
    fn test_interact_takes_tiller_once_per_press() {
        let mut session = session();
        session
            .player_mut()
            .set_location(Location::Aboard(Vec2::new(0.0, -40.0)));
        let interact = InputState {
            interact: true,
            ..Default::default()
        };
        let events = session.tick(DT, &interact);
        assert!(events.contains(&SessionEvent::Interacted(InteractOutcome::Part(
            crate::parts::PartInteraction::Steer
        ))));
        for _ in 0..10 {
            session.tick(DT, &interact);
        }
        assert!(session.player().is_steering());
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = session();
        let json = serde_json::to_string(&session.snapshot()).expect("json");
        assert!(json.contains("\"weather\":\"Clear\""));
        assert!(json.contains("\"clock\":\"Day 1 - 08:00\""));
    }
}
