//! The shipped sound packs

mod orchestral;
mod original;
mod retro;

pub use orchestral::OrchestralPack;
pub use original::OriginalPack;
pub use retro::Retro8BitPack;
