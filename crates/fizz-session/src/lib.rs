//! Fizz Session - the playground loop
//!
//! [`Session`] owns the world, the acid engine, the selection controller,
//! the sound stack, and the frame clock, and runs them in the canonical
//! per-frame order: physics step, contact ingestion, acid effects, decay,
//! input handlers, sound dispatch. The windowing/rendering host feeds it
//! input events and reads [`UiSnapshot`] for the toolbar.

mod palette;
mod session;

pub use palette::Palette;
pub use session::{Session, UiSnapshot};
