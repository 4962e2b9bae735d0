//! # Landsea World
//!
//! The archipelago the boat sails through.
//!
//! This crate handles:
//! - Seeded gradient noise
//! - Island, biome and resource generation per chunk
//! - The chunk store: lazy loading, land queries, resource lookup
//! - Safe spawn search

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod biome;
pub mod chunk;
pub mod generation;
pub mod noise;
pub mod resource;
pub mod spawn;
pub mod streaming;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::biome::*;
    pub use crate::chunk::*;
    pub use crate::generation::*;
    pub use crate::noise::*;
    pub use crate::resource::*;
    pub use crate::spawn::*;
    pub use crate::streaming::*;
}

pub use prelude::*;
