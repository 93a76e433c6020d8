//! Fizz Physics - rigid-body capability interface and backends
//!
//! The simulation consumes physics through the narrow [`Physics`] trait:
//! create/remove bodies, set velocity and static flags, query pose, and
//! drain collision-start events. Two backends implement it:
//! - [`RapierPhysics`] - production backend wrapping Rapier 2D
//! - [`FakePhysics`] - deterministic in-memory backend for tests and
//!   headless runs
//!
//! Velocities cross this interface in pixels per tick (1/60 s), matching
//! the playground's tuning constants; backends convert to their own units.

mod body;
mod fake;
mod rapier;

pub use body::{BodyHandle, BodyLabel, BodyOptions, Contact, ContactBody, Physics};
pub use fake::FakePhysics;
pub use rapier::RapierPhysics;

/// Reference tick rate the velocity unit is defined against
pub const TICKS_PER_SECOND: f32 = 60.0;
