//! The sound-pack capability contract
//!
//! Every pack must render all 21 playground events; a pack that skips one
//! does not compile. The four volume/mute accessors are shared across packs
//! through [`PackState`].

use crate::limiter::RateLimiter;
use crate::synth::ToneSynthesizer;
use fizz_core::Shape;
use std::time::Duration;

/// Volume, mute, and the per-event cooldown gates every pack carries.
///
/// Collision, wall-bounce, and hover events are independently gated
/// (50ms / 100ms / 200ms); calls inside a window are silently dropped.
pub struct PackState {
    volume: f64,
    muted: bool,
    collision_gate: RateLimiter,
    wall_gate: RateLimiter,
    hover_gate: RateLimiter,
}

impl Default for PackState {
    fn default() -> Self {
        Self::new()
    }
}

impl PackState {
    pub fn new() -> Self {
        Self {
            volume: 0.7,
            muted: false,
            collision_gate: RateLimiter::new(Duration::from_millis(50)),
            wall_gate: RateLimiter::new(Duration::from_millis(100)),
            hover_gate: RateLimiter::new(Duration::from_millis(200)),
        }
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Effective output gain: zero while muted
    pub fn gain(&self) -> f64 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }

    pub fn allow_collision(&mut self) -> bool {
        self.collision_gate.try_fire()
    }

    pub fn allow_wall_bounce(&mut self) -> bool {
        self.wall_gate.try_fire()
    }

    pub fn allow_hover(&mut self) -> bool {
        self.hover_gate.try_fire()
    }
}

/// The fixed 21-event sound contract.
///
/// Packs are pure timbre strategies: the synthesizer is owned by the
/// manager and lent to each call. The volume/mute accessors are shared
/// provided methods over [`PackState`].
pub trait SoundPack {
    /// Registry identifier, also the persisted selection value
    fn id(&self) -> &'static str;

    fn state(&self) -> &PackState;
    fn state_mut(&mut self) -> &mut PackState;

    // --- Particle physics events ---

    /// A batch of particles spawned
    fn particle_create(&mut self, synth: &mut ToneSynthesizer, count: u32);
    /// Particle-particle contact. `load` is particle_count / max_particles.
    fn collision(&mut self, synth: &mut ToneSynthesizer, impact_speed: f32, avg_size: f32, load: f32);
    /// Particle-boundary contact
    fn wall_bounce(&mut self, synth: &mut ToneSynthesizer, impact_speed: f32, size: f32);
    /// A particle became acid
    fn acid_convert(&mut self, synth: &mut ToneSynthesizer);
    /// Acid took a bite out of a target of the given size
    fn acid_corrosion(&mut self, synth: &mut ToneSynthesizer, target_size: f32);
    /// A particle burst into fragments
    fn particle_split(&mut self, synth: &mut ToneSynthesizer, fragments: u32);

    // --- UI button events ---

    fn color_toggle(&mut self, synth: &mut ToneSynthesizer, random_mode: bool);
    fn shape_select(&mut self, synth: &mut ToneSynthesizer, shape: Shape);
    fn cut(&mut self, synth: &mut ToneSynthesizer, count: usize);
    fn lock(&mut self, synth: &mut ToneSynthesizer, count: usize);
    fn unlock(&mut self, synth: &mut ToneSynthesizer, count: usize);
    fn clear(&mut self, synth: &mut ToneSynthesizer, count: usize);
    fn help_toggle(&mut self, synth: &mut ToneSynthesizer, open: bool);

    // --- Selection / gesture events ---

    fn select(&mut self, synth: &mut ToneSynthesizer);
    fn deselect(&mut self, synth: &mut ToneSynthesizer);
    /// Marquee finalized; timbre tiers on the count
    fn marquee_select(&mut self, synth: &mut ToneSynthesizer, count: usize);
    fn hover(&mut self, synth: &mut ToneSynthesizer);
    fn long_press(&mut self, synth: &mut ToneSynthesizer, count: usize);
    fn two_finger_removal(&mut self, synth: &mut ToneSynthesizer, count: usize);
    fn three_finger_removal(&mut self, synth: &mut ToneSynthesizer, count: usize);
    /// Selection deleted; scales with the count
    fn delete_selection(&mut self, synth: &mut ToneSynthesizer, count: usize);

    // --- Shared accessors ---

    fn volume(&self) -> f64 {
        self.state().volume()
    }

    fn set_volume(&mut self, volume: f64) {
        self.state_mut().set_volume(volume);
    }

    fn muted(&self) -> bool {
        self.state().muted()
    }

    fn set_muted(&mut self, muted: bool) {
        self.state_mut().set_muted(muted);
    }
}

/// Equal-tempered frequency for a MIDI note number
pub fn midi_to_freq(note: f32) -> f32 {
    440.0 * 2f32.powf((note - 69.0) / 12.0)
}

/// Collision pitch: rises with impact speed, falls with particle size,
/// clamped into [lo, hi] Hz
pub fn collision_pitch(impact_speed: f32, avg_size: f32, lo: f32, hi: f32) -> f32 {
    let speed_term = (impact_speed / 15.0).clamp(0.0, 1.0);
    let size_term = 1.0 - (avg_size / 60.0).clamp(0.0, 1.0);
    let t = speed_term * 0.6 + size_term * 0.4;
    lo + (hi - lo) * t
}

/// Density scaling: collision volume fades as the particle count
/// approaches the configured maximum, but never fully to silence
pub fn density_scale(load: f32) -> f64 {
    (1.0 - load.clamp(0.0, 1.0) as f64).max(0.05)
}

/// Collision loudness (before pack volume): scales with impact speed and
/// the density factor, clamped
pub fn collision_loudness(impact_speed: f32, load: f32) -> f64 {
    let speed = (0.2 + impact_speed as f64 * 0.08).min(1.0);
    speed * density_scale(load)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_clamped() {
        let mut state = PackState::new();
        state.set_volume(1.8);
        assert_eq!(state.volume(), 1.0);
        state.set_volume(-0.3);
        assert_eq!(state.volume(), 0.0);
    }

    #[test]
    fn test_mute_zeroes_gain_without_losing_volume() {
        let mut state = PackState::new();
        state.set_volume(0.4);
        state.set_muted(true);
        assert_eq!(state.gain(), 0.0);
        assert_eq!(state.volume(), 0.4);

        state.set_muted(false);
        assert_eq!(state.gain(), 0.4);
    }

    #[test]
    fn test_midi_to_freq_reference_points() {
        assert!((midi_to_freq(69.0) - 440.0).abs() < 1e-3);
        assert!((midi_to_freq(57.0) - 220.0).abs() < 1e-3);
        assert!((midi_to_freq(81.0) - 880.0).abs() < 1e-3);
    }

    #[test]
    fn test_collision_pitch_monotonic() {
        // Faster impacts pitch up
        let slow = collision_pitch(2.0, 30.0, 100.0, 800.0);
        let fast = collision_pitch(12.0, 30.0, 100.0, 800.0);
        assert!(fast > slow);

        // Bigger particles pitch down
        let small = collision_pitch(5.0, 10.0, 100.0, 800.0);
        let big = collision_pitch(5.0, 55.0, 100.0, 800.0);
        assert!(big < small);

        // Clamped to range
        let extreme = collision_pitch(1000.0, 0.0, 100.0, 800.0);
        assert!(extreme <= 800.0);
    }

    #[test]
    fn test_density_scale_degrades_gracefully() {
        assert!((density_scale(0.0) - 1.0).abs() < 1e-9);
        assert!(density_scale(0.5) < density_scale(0.1));
        // Never fully silent, even past the maximum
        assert!(density_scale(2.0) >= 0.05);
    }
}
