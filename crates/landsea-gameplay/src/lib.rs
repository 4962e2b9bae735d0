//! # Landsea Gameplay
//!
//! Everything that happens on and around the boat.
//!
//! This crate provides:
//! - Boat parts on a deck grid and the rigid-body boat simulation
//! - Inventory and crafting
//! - Wind, weather and the day/night clock
//! - The player controller and survival vitals
//! - The game session that ties them together each tick

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod boat;
pub mod crafting;
pub mod input;
pub mod inventory;
pub mod parts;
pub mod player;
pub mod session;
pub mod time;
pub mod vitals;
pub mod weather;
pub mod wind;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::boat::*;
    pub use crate::crafting::*;
    pub use crate::input::*;
    pub use crate::inventory::*;
    pub use crate::parts::*;
    pub use crate::player::*;
    pub use crate::session::*;
    pub use crate::time::*;
    pub use crate::vitals::*;
    pub use crate::weather::*;
    pub use crate::wind::*;
}

pub use prelude::*;
