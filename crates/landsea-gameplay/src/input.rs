//! Per-tick input snapshot.
//!
//! The platform layer samples its devices once per frame and hands the
//! session an [`InputState`]. Buttons are level-triggered: `true` while held.
//! Edge detection for menu toggles happens in the session.

use serde::{Deserialize, Serialize};

/// Controls held during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InputState {
    /// Horizontal axis, -1 (left) to 1 (right)
    pub move_x: f32,
    /// Vertical axis, -1 (down) to 1 (up)
    pub move_y: f32,
    /// Use the part or campfire in reach
    pub interact: bool,
    /// Swing at the nearest resource
    pub attack: bool,
    /// Build a hull tile or campfire
    pub place: bool,
    /// Eat something
    pub consume: bool,
    /// Push the boat off
    pub kick: bool,
    /// Inventory menu key
    pub open_inventory: bool,
    /// Crafting menu key
    pub open_crafting: bool,
    /// Number key pressed this tick, 1-based
    pub number_pressed: Option<u8>,
}

impl InputState {
    /// Sets the movement axes from four directional keys.
    #[must_use]
    pub fn with_keys(mut self, up: bool, down: bool, left: bool, right: bool) -> Self {
        self.move_x = f32::from(u8::from(right)) - f32::from(u8::from(left));
        self.move_y = f32::from(u8::from(up)) - f32::from(u8::from(down));
        self
    }

    /// Movement axes clamped to `[-1, 1]`.
    #[must_use]
    pub fn axes(&self) -> (f32, f32) {
        (self.move_x.clamp(-1.0, 1.0), self.move_y.clamp(-1.0, 1.0))
    }
}
