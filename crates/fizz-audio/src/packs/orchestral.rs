//! Orchestral pack: strings, brass, woodwind, and percussion timbres
//!
//! The sections map onto the synthesizer's waveforms: saw for strings,
//! square for brass, sine for woodwinds, filtered noise for percussion.
//! Phrases run longer and softer than the other packs.

use crate::pack::{collision_loudness, collision_pitch, midi_to_freq, PackState, SoundPack};
use crate::synth::{ToneSynthesizer, Waveform};
use fizz_core::Shape;

/// Root note D3
const ROOT: f32 = 50.0;

/// Major scale semitone offsets
const MAJOR: [f32; 7] = [0.0, 2.0, 4.0, 5.0, 7.0, 9.0, 11.0];

const MAX_ARP_NOTES: usize = 8;

pub struct OrchestralPack {
    state: PackState,
}

impl OrchestralPack {
    pub fn new() -> Self {
        Self {
            state: PackState::new(),
        }
    }

    fn degree(degree: usize) -> f32 {
        let octave = (degree / MAJOR.len()) as f32;
        let offset = MAJOR[degree % MAJOR.len()];
        midi_to_freq(ROOT + octave * 12.0 + offset)
    }

    /// Ascending scale phrase of `count` notes (capped)
    fn phrase(count: usize) -> Vec<f32> {
        (0..count.min(MAX_ARP_NOTES)).map(Self::degree).collect()
    }

    /// Root-third-fifth of the home key
    fn triad() -> [f32; 3] {
        [Self::degree(0), Self::degree(2), Self::degree(4)]
    }
}

impl Default for OrchestralPack {
    fn default() -> Self {
        Self::new()
    }
}

impl SoundPack for OrchestralPack {
    fn id(&self) -> &'static str {
        "orchestral"
    }

    fn state(&self) -> &PackState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PackState {
        &mut self.state
    }

    fn particle_create(&mut self, synth: &mut ToneSynthesizer, count: u32) {
        // Strings sweep up the scale
        let gain = self.state.gain();
        let notes = Self::phrase(count as usize);
        synth.arpeggio(&notes, 0.12, 0.08, gain * 0.35, Waveform::Saw);
    }

    fn collision(&mut self, synth: &mut ToneSynthesizer, impact_speed: f32, avg_size: f32, load: f32) {
        if !self.state.allow_collision() {
            return;
        }
        // Timpani: a pitched thump under a soft skin noise
        let gain = self.state.gain();
        let freq = collision_pitch(impact_speed, avg_size, 73.0, 220.0);
        let loudness = collision_loudness(impact_speed, load);
        synth.tone(freq, 0.12, gain * loudness * 0.8, Waveform::Triangle);
        synth.noise_burst(0.04, gain * loudness * 0.2, 0.25);
    }

    fn wall_bounce(&mut self, synth: &mut ToneSynthesizer, impact_speed: f32, _size: f32) {
        if !self.state.allow_wall_bounce() {
            return;
        }
        // Low brass pedal tone
        let gain = self.state.gain();
        let freq = (58.0 + impact_speed * 8.0).min(117.0);
        synth.tone(freq, 0.15, gain * 0.3, Waveform::Square);
    }

    fn acid_convert(&mut self, synth: &mut ToneSynthesizer) {
        // Woodwind slide into the low register
        let gain = self.state.gain();
        synth.glissando(587.0, 147.0, 0.5, gain * 0.4, Waveform::Sine);
    }

    fn acid_corrosion(&mut self, synth: &mut ToneSynthesizer, target_size: f32) {
        // Brushed cymbal
        let gain = self.state.gain();
        let brightness = (1.0 - target_size / 100.0).clamp(0.3, 0.7);
        synth.noise_burst(0.12, gain * 0.25, brightness);
    }

    fn particle_split(&mut self, synth: &mut ToneSynthesizer, fragments: u32) {
        // Brass fanfare over the triad
        let gain = self.state.gain();
        let notes: Vec<f32> = Self::triad()
            .into_iter()
            .cycle()
            .take((fragments as usize).min(MAX_ARP_NOTES))
            .collect();
        synth.arpeggio(&notes, 0.08, 0.05, gain * 0.4, Waveform::Square);
    }

    fn color_toggle(&mut self, synth: &mut ToneSynthesizer, random_mode: bool) {
        let gain = self.state.gain();
        let (first, second) = if random_mode { (0, 4) } else { (4, 0) };
        synth.arpeggio(
            &[Self::degree(first), Self::degree(second)],
            0.12,
            0.09,
            gain * 0.35,
            Waveform::Saw,
        );
    }

    fn shape_select(&mut self, synth: &mut ToneSynthesizer, shape: Shape) {
        // Each shape gets its own section
        let gain = self.state.gain();
        match shape {
            Shape::Circle => synth.tone(Self::degree(7), 0.18, gain * 0.35, Waveform::Sine),
            Shape::Square => synth.tone(Self::degree(4), 0.18, gain * 0.35, Waveform::Square),
            Shape::Triangle => synth.tone(Self::degree(9), 0.18, gain * 0.35, Waveform::Saw),
        }
    }

    fn cut(&mut self, synth: &mut ToneSynthesizer, count: usize) {
        let gain = self.state.gain();
        let loudness = (0.3 + count as f64 * 0.02).min(0.6);
        synth.glissando(440.0, 220.0, 0.25, gain * loudness, Waveform::Saw);
        synth.noise_burst(0.05, gain * 0.15, 0.4);
    }

    fn lock(&mut self, synth: &mut ToneSynthesizer, _count: usize) {
        // Low strings settle on the root
        let gain = self.state.gain();
        synth.tone(Self::degree(0), 0.3, gain * 0.4, Waveform::Saw);
    }

    fn unlock(&mut self, synth: &mut ToneSynthesizer, _count: usize) {
        let gain = self.state.gain();
        synth.tone(Self::degree(4), 0.3, gain * 0.4, Waveform::Saw);
    }

    fn clear(&mut self, synth: &mut ToneSynthesizer, _count: usize) {
        // Full-section falling sweep
        let gain = self.state.gain();
        synth.glissando(Self::degree(14), Self::degree(0) / 2.0, 0.7, gain * 0.45, Waveform::Saw);
    }

    fn help_toggle(&mut self, synth: &mut ToneSynthesizer, open: bool) {
        let gain = self.state.gain();
        let notes = if open {
            [Self::degree(0), Self::degree(2), Self::degree(4)]
        } else {
            [Self::degree(4), Self::degree(2), Self::degree(0)]
        };
        synth.arpeggio(&notes, 0.11, 0.08, gain * 0.3, Waveform::Sine);
    }

    fn select(&mut self, synth: &mut ToneSynthesizer) {
        // Flute blip
        let gain = self.state.gain();
        synth.tone(Self::degree(11), 0.09, gain * 0.35, Waveform::Sine);
    }

    fn deselect(&mut self, synth: &mut ToneSynthesizer) {
        let gain = self.state.gain();
        synth.tone(Self::degree(9), 0.09, gain * 0.3, Waveform::Sine);
    }

    fn marquee_select(&mut self, synth: &mut ToneSynthesizer, count: usize) {
        let gain = self.state.gain();
        match count {
            0 => synth.tone(Self::degree(0), 0.08, gain * 0.2, Waveform::Sine),
            1..=4 => synth.arpeggio(
                &[Self::degree(4), Self::degree(6)],
                0.1,
                0.07,
                gain * 0.35,
                Waveform::Saw,
            ),
            _ => {
                let notes = Self::phrase(count);
                synth.arpeggio(&notes, 0.09, 0.06, gain * 0.35, Waveform::Saw);
            }
        }
    }

    fn hover(&mut self, synth: &mut ToneSynthesizer) {
        if !self.state.allow_hover() {
            return;
        }
        let gain = self.state.gain();
        synth.tone(Self::degree(16), 0.04, gain * 0.1, Waveform::Sine);
    }

    fn long_press(&mut self, synth: &mut ToneSynthesizer, _count: usize) {
        // Swelling string chord
        let gain = self.state.gain();
        let notes = Self::triad();
        synth.arpeggio(&notes, 0.2, 0.05, gain * 0.35, Waveform::Saw);
    }

    fn two_finger_removal(&mut self, synth: &mut ToneSynthesizer, count: usize) {
        let gain = self.state.gain();
        synth.noise_burst(0.2, gain * 0.35, 0.4);
        let loudness = (0.25 + count as f64 * 0.02).min(0.6);
        synth.glissando(330.0, 82.0, 0.35, gain * loudness, Waveform::Saw);
    }

    fn three_finger_removal(&mut self, synth: &mut ToneSynthesizer, count: usize) {
        let gain = self.state.gain();
        synth.noise_burst(0.35, gain * 0.45, 0.5);
        let loudness = (0.3 + count as f64 * 0.01).min(0.7);
        synth.glissando(440.0, 55.0, 0.6, gain * loudness, Waveform::Saw);
    }

    fn delete_selection(&mut self, synth: &mut ToneSynthesizer, count: usize) {
        let gain = self.state.gain();
        let start = 392.0 / (1.0 + count as f32 * 0.08);
        let loudness = (0.25 + count as f64 * 0.03).min(0.7);
        synth.glissando(start, start / 2.0, 0.3, gain * loudness, Waveform::Saw);
        synth.noise_burst(0.06, gain * 0.15, 0.3);
    }
}
