//! Fizz Select - pointer and gesture selection over the particle store
//!
//! [`SelectionController`] owns the session-level interaction mode
//! (idle / marquee / long-press drag-select) and the sticky latches that
//! modify particle clicks. Particle-level state lives in the store; the
//! controller only orchestrates mutations and emits the matching events.

mod controller;

pub use controller::{Mode, SelectionController, SpawnParams};
