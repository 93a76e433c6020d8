//! Fizz Sim - particle lifecycle and acid dissolution
//!
//! The [`World`] is the single authoritative particle store: particles are
//! keyed by stable id, and the selected/locked collections are id sets over
//! that store, so flag/set consistency is a single-source-of-truth property
//! rather than a three-way sync obligation. Every deletion path routes
//! through [`World::remove`].
//!
//! [`AcidEngine`] drives the dissolution algorithm on top of the store:
//! timer-driven self-decay plus collision-driven corrosion.

mod acid;
mod events;
mod particle;
mod world;

pub use acid::AcidEngine;
pub use events::{SimEvent, SimEvents};
pub use particle::Particle;
pub use world::{ShrinkOutcome, World};
