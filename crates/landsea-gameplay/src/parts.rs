//! Boat parts anchored to the deck grid.

use glam::Vec2;
use landsea_common::TILE_SIZE;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::inventory::{Inventory, CRATE_INVENTORY_SLOTS};

/// Maximum rudder deflection in degrees.
pub const RUDDER_MAX_ANGLE: f32 = 45.0;

/// Rudder turn rate in degrees per second.
pub const RUDDER_TURN_SPEED: f32 = 90.0;

/// Seconds a part ignores interaction after being used.
pub const INTERACT_COOLDOWN: f32 = 0.3;

/// Deck grid dimensions. Local space is centred on the grid, which is also
/// the boat's centre of mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoatGeometry {
    /// Cells along local X
    pub width: u32,
    /// Cells along local Y
    pub height: u32,
    /// Cell edge in pixels
    pub tile_size: f32,
}

impl Default for BoatGeometry {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            tile_size: TILE_SIZE,
        }
    }
}

impl BoatGeometry {
    /// Local position of the grid's minimum corner.
    #[must_use]
    pub fn origin(&self) -> Vec2 {
        -Vec2::new(self.width as f32, self.height as f32) * self.tile_size * 0.5
    }

    /// Local position of the centre of a (possibly fractional) cell.
    #[must_use]
    pub fn cell_center(&self, grid_x: f32, grid_y: f32) -> Vec2 {
        self.origin() + Vec2::new(grid_x, grid_y) * self.tile_size + Vec2::splat(self.tile_size * 0.5)
    }

    /// Cell containing a local position, if inside the grid.
    #[must_use]
    pub fn cell_at(&self, local: Vec2) -> Option<(i32, i32)> {
        let cell = ((local - self.origin()) / self.tile_size).floor();
        let (x, y) = (cell.x as i32, cell.y as i32);
        self.contains(x, y).then_some((x, y))
    }

    /// Whether a cell index is inside the grid.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }
}

/// Per-variant part state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PartKind {
    /// Walkable deck tile
    Hull,
    /// Catches the wind when raised
    Sail {
        /// Whether the sail is up
        raised: bool,
    },
    /// Steers the boat
    Rudder {
        /// Deflection in degrees, within ±[`RUDDER_MAX_ANGLE`]
        angle: f32,
    },
    /// Holds the boat in place when dropped
    Anchor {
        /// Whether the anchor is down
        dropped: bool,
    },
    /// Small storage box
    Crate {
        /// Crate contents
        inventory: Inventory,
    },
}

impl PartKind {
    /// Display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Hull => "Hull",
            Self::Sail { .. } => "Sail",
            Self::Rudder { .. } => "Rudder",
            Self::Anchor { .. } => "Anchor",
            Self::Crate { .. } => "Crate",
        }
    }
}

/// What an interaction with a part did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartInteraction {
    /// Player took the tiller
    Steer,
    /// Sail toggled; holds the new raised state
    Sail(bool),
    /// Anchor toggled; holds the new dropped state
    Anchor(bool),
    /// Crate opened
    CrateOpened,
    /// Part is still cooling down or has no interaction
    Ignored,
}

/// A part at a grid position. Coordinates are fractional so a part can sit
/// between cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoatPart {
    /// Grid X, in cells
    pub grid_x: f32,
    /// Grid Y, in cells
    pub grid_y: f32,
    /// Variant and its state
    pub kind: PartKind,
    /// Remaining interaction cooldown in seconds
    cooldown: f32,
}

impl BoatPart {
    /// Creates a part of any kind.
    #[must_use]
    pub fn new(kind: PartKind, grid_x: f32, grid_y: f32) -> Self {
        Self {
            grid_x,
            grid_y,
            kind,
            cooldown: 0.0,
        }
    }

    /// A hull tile on an integer cell.
    #[must_use]
    pub fn hull(grid_x: i32, grid_y: i32) -> Self {
        Self::new(PartKind::Hull, grid_x as f32, grid_y as f32)
    }

    /// A raised sail.
    #[must_use]
    pub fn sail(grid_x: f32, grid_y: f32) -> Self {
        Self::new(PartKind::Sail { raised: true }, grid_x, grid_y)
    }

    /// A centred rudder.
    #[must_use]
    pub fn rudder(grid_x: f32, grid_y: f32) -> Self {
        Self::new(PartKind::Rudder { angle: 0.0 }, grid_x, grid_y)
    }

    /// A raised anchor.
    #[must_use]
    pub fn anchor(grid_x: f32, grid_y: f32) -> Self {
        Self::new(PartKind::Anchor { dropped: false }, grid_x, grid_y)
    }

    /// An empty storage crate.
    #[must_use]
    pub fn storage(grid_x: f32, grid_y: f32) -> Self {
        Self::new(
            PartKind::Crate {
                inventory: Inventory::new(CRATE_INVENTORY_SLOTS),
            },
            grid_x,
            grid_y,
        )
    }

    /// Whether this part is a hull tile.
    #[must_use]
    pub const fn is_hull(&self) -> bool {
        matches!(self.kind, PartKind::Hull)
    }

    /// Whether this hull occupies integer cell `(x, y)`.
    #[must_use]
    pub fn is_hull_at(&self, x: i32, y: i32) -> bool {
        self.is_hull() && self.grid_x as i32 == x && self.grid_y as i32 == y
    }

    /// Remaining interaction cooldown.
    #[must_use]
    pub const fn cooldown(&self) -> f32 {
        self.cooldown
    }

    /// Position relative to the centre of mass.
    #[must_use]
    pub fn local_position(&self, geometry: &BoatGeometry) -> Vec2 {
        geometry.cell_center(self.grid_x, self.grid_y)
    }

    /// Advances timers.
    pub fn update(&mut self, dt: f32) {
        self.cooldown = (self.cooldown - dt).max(0.0);
    }

    /// Uses the part. Ignored while cooling down.
    pub fn interact(&mut self) -> PartInteraction {
        if self.cooldown > 0.0 {
            return PartInteraction::Ignored;
        }

        let result = match &mut self.kind {
            PartKind::Hull => PartInteraction::Ignored,
            PartKind::Rudder { .. } => PartInteraction::Steer,
            PartKind::Sail { raised } => {
                *raised = !*raised;
                PartInteraction::Sail(*raised)
            },
            PartKind::Anchor { dropped } => {
                *dropped = !*dropped;
                PartInteraction::Anchor(*dropped)
            },
            PartKind::Crate { inventory } => {
                debug!("Crate opened, {} stacks inside", inventory.slots().len());
                PartInteraction::CrateOpened
            },
        };

        if result != PartInteraction::Ignored {
            self.cooldown = INTERACT_COOLDOWN;
        }
        result
    }

    /// Turns a rudder by `input` (-1..1). Positive input turns toward
    /// negative angles. No effect on other parts.
    pub fn steer(&mut self, input: f32, dt: f32) {
        if let PartKind::Rudder { angle } = &mut self.kind {
            if input != 0.0 {
                *angle = (*angle - input * RUDDER_TURN_SPEED * dt)
                    .clamp(-RUDDER_MAX_ANGLE, RUDDER_MAX_ANGLE);
            }
        }
    }
}
