//! Fizz Core - Foundational types for the fizz particle playground
//!
//! This crate provides the types every other fizz crate depends on:
//! - `ParticleId` - Stable particle identifiers
//! - `Vec2`, `Color`, `Shape` - Spatial and visual types
//! - `Config` - All gameplay tunables in one place
//! - `SimRng` - Deterministic PRNG for spawn randomness
//! - Error types and Result alias

mod config;
mod error;
mod id;
mod rand;
mod types;

pub use config::Config;
pub use error::{FizzError, Result};
pub use id::ParticleId;
pub use rand::SimRng;
pub use types::{Color, Shape, Vec2};
