//! # Landsea Engine
//!
//! Headless runner for Landsea: loads configuration, drives a game session
//! at a fixed tick rate, and reports a JSON snapshot of the final state.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod app;
pub mod config;
pub mod timing;

pub use config::{ConfigError, LandseaConfig, RunnerConfig};
