//! Tone synthesizer: renders audio primitives to sample buffers
//!
//! Every sound in the playground is synthesized on the fly; there are no
//! audio assets. Rendered buffers are handed to Kira as static sound data,
//! optionally with a delayed start time for arpeggio notes. Delayed sounds
//! are fire-and-forget: once scheduled they cannot be cancelled, so they
//! carry only the parameters they were rendered with.
//!
//! Degrades gracefully when no audio device is available.

use fizz_core::SimRng;
use kira::sound::static_sound::StaticSoundData;
use kira::{AudioManager, AudioManagerSettings, DefaultBackend, Frame, StartTime};
use std::time::Duration;

/// Output sample rate for all rendered buffers
pub const SAMPLE_RATE: u32 = 44_100;

/// Attack length applied to every rendered sound
const ATTACK: f32 = 0.005;

/// Basic oscillator shapes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
    Saw,
}

impl Waveform {
    /// Sample the waveform at a phase in [0, 1)
    fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (phase * std::f32::consts::TAU).sin(),
            Waveform::Triangle => {
                if phase < 0.5 {
                    4.0 * phase - 1.0
                } else {
                    3.0 - 4.0 * phase
                }
            }
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Saw => 2.0 * phase - 1.0,
        }
    }
}

/// Renders and plays synthesis primitives
pub struct ToneSynthesizer {
    manager: Option<AudioManager<DefaultBackend>>,
    noise_rng: SimRng,
}

impl Default for ToneSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ToneSynthesizer {
    pub fn new() -> Self {
        // Try to create the audio manager; gracefully fail if no device
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| eprintln!("Audio: no device available ({e}), running silent"))
            .ok();

        Self {
            manager,
            noise_rng: SimRng::new(0x5EED),
        }
    }

    /// Whether audio is actually available
    pub fn is_available(&self) -> bool {
        self.manager.is_some()
    }

    /// Play a single tone
    pub fn tone(&mut self, freq: f32, duration: f32, volume: f64, waveform: Waveform) {
        let frames = render_tone(freq, duration, waveform);
        self.play(frames, volume, 0.0);
    }

    /// Play a tone after a delay (seconds)
    pub fn tone_delayed(
        &mut self,
        freq: f32,
        duration: f32,
        volume: f64,
        waveform: Waveform,
        delay: f32,
    ) {
        let frames = render_tone(freq, duration, waveform);
        self.play(frames, volume, delay);
    }

    /// Play a note sequence, each note delayed behind the last
    pub fn arpeggio(
        &mut self,
        freqs: &[f32],
        note_duration: f32,
        gap: f32,
        volume: f64,
        waveform: Waveform,
    ) {
        for (i, freq) in freqs.iter().enumerate() {
            self.tone_delayed(*freq, note_duration, volume, waveform, i as f32 * gap);
        }
    }

    /// Play a continuous exponential pitch sweep
    pub fn glissando(
        &mut self,
        start_freq: f32,
        end_freq: f32,
        duration: f32,
        volume: f64,
        waveform: Waveform,
    ) {
        let frames = render_glissando(start_freq, end_freq, duration, waveform);
        self.play(frames, volume, 0.0);
    }

    /// Play a filtered noise burst; brightness in [0, 1] opens the filter
    pub fn noise_burst(&mut self, duration: f32, volume: f64, brightness: f32) {
        let frames = render_noise(&mut self.noise_rng, duration, brightness);
        self.play(frames, volume, 0.0);
    }

    fn play(&mut self, frames: Vec<Frame>, volume: f64, delay: f32) {
        let Some(manager) = &mut self.manager else {
            return;
        };
        if volume <= 0.0 || frames.is_empty() {
            return;
        }

        let mut sound = StaticSoundData {
            sample_rate: SAMPLE_RATE,
            frames: frames.into(),
            settings: Default::default(),
            slice: None,
        }
        .volume(amplitude_to_db(volume));

        if delay > 0.0 {
            sound = sound.start_time(StartTime::Delayed(Duration::from_secs_f32(delay)));
        }

        if let Err(e) = manager.play(sound) {
            eprintln!("Audio: playback failed ({e})");
        }
    }
}

/// Render a fixed-pitch tone with an attack/decay envelope
pub(crate) fn render_tone(freq: f32, duration: f32, waveform: Waveform) -> Vec<Frame> {
    let samples = (duration * SAMPLE_RATE as f32) as usize;
    let mut frames = Vec::with_capacity(samples);
    let mut phase = 0.0f32;

    for i in 0..samples {
        let t = i as f32 / SAMPLE_RATE as f32;
        let value = waveform.sample(phase) * envelope(t, duration);
        frames.push(Frame::from_mono(value));

        phase += freq / SAMPLE_RATE as f32;
        phase -= phase.floor();
    }
    frames
}

/// Render an exponential frequency sweep from `start_freq` to `end_freq`
pub(crate) fn render_glissando(
    start_freq: f32,
    end_freq: f32,
    duration: f32,
    waveform: Waveform,
) -> Vec<Frame> {
    let samples = (duration * SAMPLE_RATE as f32) as usize;
    let mut frames = Vec::with_capacity(samples);
    let mut phase = 0.0f32;
    let ratio = end_freq / start_freq.max(1.0);

    for i in 0..samples {
        let t = i as f32 / SAMPLE_RATE as f32;
        let freq = start_freq * ratio.powf(t / duration);
        let value = waveform.sample(phase) * envelope(t, duration);
        frames.push(Frame::from_mono(value));

        phase += freq / SAMPLE_RATE as f32;
        phase -= phase.floor();
    }
    frames
}

/// Render low-pass-filtered noise; brightness in [0, 1] sets the cutoff
pub(crate) fn render_noise(rng: &mut SimRng, duration: f32, brightness: f32) -> Vec<Frame> {
    let samples = (duration * SAMPLE_RATE as f32) as usize;
    let mut frames = Vec::with_capacity(samples);

    // One-pole low-pass; higher brightness tracks the raw noise closer
    let alpha = 0.02 + brightness.clamp(0.0, 1.0) * 0.9;
    let mut filtered = 0.0f32;

    for i in 0..samples {
        let t = i as f32 / SAMPLE_RATE as f32;
        let white = rng.range(-1.0, 1.0);
        filtered += alpha * (white - filtered);
        frames.push(Frame::from_mono(filtered * envelope(t, duration)));
    }
    frames
}

/// Linear attack, exponential decay, hard stop at `duration`
fn envelope(t: f32, duration: f32) -> f32 {
    if t >= duration {
        return 0.0;
    }
    let attack = (t / ATTACK).min(1.0);
    let decay = (-(t / (duration / 4.0))).exp();
    attack * decay
}

/// Convert linear amplitude (0.0-1.0) to decibels
fn amplitude_to_db(amplitude: f64) -> kira::Decibels {
    if amplitude <= 0.0 {
        kira::Decibels(-60.0)
    } else {
        kira::Decibels((20.0 * (amplitude as f32).log10()).max(-60.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_length_and_bounds() {
        let frames = render_tone(440.0, 0.1, Waveform::Sine);
        assert_eq!(frames.len(), 4410);
        for frame in &frames {
            assert!(frame.left.abs() <= 1.0);
            assert!(frame.right.abs() <= 1.0);
        }
    }

    #[test]
    fn test_tone_attack_starts_quiet() {
        let frames = render_tone(440.0, 0.1, Waveform::Square);
        // First sample sits at the very start of the attack ramp
        assert!(frames[0].left.abs() < 0.01);
    }

    #[test]
    fn test_glissando_bounds() {
        let frames = render_glissando(880.0, 110.0, 0.2, Waveform::Triangle);
        assert_eq!(frames.len(), 8820);
        for frame in &frames {
            assert!(frame.left.abs() <= 1.0);
        }
    }

    #[test]
    fn test_noise_is_bounded() {
        let mut rng = SimRng::new(1);
        let frames = render_noise(&mut rng, 0.05, 0.5);
        assert_eq!(frames.len(), 2205);
        for frame in &frames {
            assert!(frame.left.abs() <= 1.0);
        }
    }

    #[test]
    fn test_waveform_shapes() {
        assert!((Waveform::Sine.sample(0.25) - 1.0).abs() < 1e-5);
        assert!((Waveform::Square.sample(0.25) - 1.0).abs() < 1e-5);
        assert!((Waveform::Square.sample(0.75) + 1.0).abs() < 1e-5);
        assert!((Waveform::Triangle.sample(0.5) - 1.0).abs() < 1e-5);
        assert!(Waveform::Saw.sample(0.0) < -0.99);
    }

    #[test]
    fn test_envelope_ends_at_zero() {
        assert_eq!(envelope(0.2, 0.1), 0.0);
        assert!(envelope(0.05, 0.1) > 0.0);
    }
}
