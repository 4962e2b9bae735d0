//! # Landsea Common
//!
//! Common types shared by every Landsea crate:
//! - Coordinate types (world, tile, chunk, local) and grid constants
//! - Item catalogue and item stacks
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod coords;
pub mod error;
pub mod items;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::coords::*;
    pub use crate::error::*;
    pub use crate::items::*;
}

pub use prelude::*;
