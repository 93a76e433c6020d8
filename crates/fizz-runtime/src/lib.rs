//! Fizz Runtime - frame timing, input state, and preferences

mod clock;
mod input;
mod prefs;

pub use clock::FrameClock;
pub use input::InputState;
pub use prefs::PrefStore;
