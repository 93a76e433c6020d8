//! Fizz Audio - procedural sound feedback
//!
//! Sound is organized in three layers:
//! - [`ToneSynthesizer`] renders tone/arpeggio/glissando/noise primitives
//!   straight to sample buffers and plays them through Kira. With no audio
//!   device every call degrades to a no-op after a single warning.
//! - [`SoundPack`] is the fixed 21-event capability contract. Each pack
//!   (Original, Retro8Bit, Orchestral) renders every event in its own
//!   timbral identity; conformance is checked at compile time.
//! - [`SoundPackManager`] owns the synthesizer and the active pack,
//!   carries volume/mute across hot-swaps, and persists the selection.
//!   [`SoundDirector`] translates simulation events into pack calls.

mod director;
mod limiter;
mod manager;
mod pack;
mod packs;
mod synth;

pub use director::SoundDirector;
pub use limiter::RateLimiter;
pub use manager::SoundPackManager;
pub use pack::{collision_pitch, density_scale, midi_to_freq, PackState, SoundPack};
pub use packs::{OrchestralPack, OriginalPack, Retro8BitPack};
pub use synth::{ToneSynthesizer, Waveform, SAMPLE_RATE};
