//! Chiptune pack: chromatic square-wave blips, fast and bright

use crate::pack::{collision_loudness, collision_pitch, midi_to_freq, PackState, SoundPack};
use crate::synth::{ToneSynthesizer, Waveform};
use fizz_core::Shape;

/// Middle C
const ROOT: f32 = 60.0;

const MAX_ARP_NOTES: usize = 8;

pub struct Retro8BitPack {
    state: PackState,
}

impl Retro8BitPack {
    pub fn new() -> Self {
        Self {
            state: PackState::new(),
        }
    }

    /// Chromatic step above the root
    fn step(semitones: f32) -> f32 {
        midi_to_freq(ROOT + semitones)
    }

    /// Ascending chromatic run of `count` notes (capped)
    fn chromatic_run(count: usize) -> Vec<f32> {
        (0..count.min(MAX_ARP_NOTES))
            .map(|i| Self::step(i as f32 * 2.0))
            .collect()
    }
}

impl Default for Retro8BitPack {
    fn default() -> Self {
        Self::new()
    }
}

impl SoundPack for Retro8BitPack {
    fn id(&self) -> &'static str {
        "retro8bit"
    }

    fn state(&self) -> &PackState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PackState {
        &mut self.state
    }

    fn particle_create(&mut self, synth: &mut ToneSynthesizer, count: u32) {
        let gain = self.state.gain();
        let notes = Self::chromatic_run(count as usize);
        synth.arpeggio(&notes, 0.045, 0.03, gain * 0.4, Waveform::Square);
    }

    fn collision(&mut self, synth: &mut ToneSynthesizer, impact_speed: f32, avg_size: f32, load: f32) {
        if !self.state.allow_collision() {
            return;
        }
        let gain = self.state.gain();
        let freq = collision_pitch(impact_speed, avg_size, 200.0, 1000.0);
        synth.tone(freq, 0.05, gain * collision_loudness(impact_speed, load) * 0.7, Waveform::Square);
    }

    fn wall_bounce(&mut self, synth: &mut ToneSynthesizer, impact_speed: f32, _size: f32) {
        if !self.state.allow_wall_bounce() {
            return;
        }
        let gain = self.state.gain();
        let freq = (98.0 + impact_speed * 15.0).min(260.0);
        synth.tone(freq, 0.04, gain * 0.3, Waveform::Square);
    }

    fn acid_convert(&mut self, synth: &mut ToneSynthesizer) {
        let gain = self.state.gain();
        // Classic power-down sweep
        synth.glissando(1046.0, 130.0, 0.3, gain * 0.4, Waveform::Square);
    }

    fn acid_corrosion(&mut self, synth: &mut ToneSynthesizer, _target_size: f32) {
        let gain = self.state.gain();
        synth.noise_burst(0.05, gain * 0.3, 0.9);
    }

    fn particle_split(&mut self, synth: &mut ToneSynthesizer, fragments: u32) {
        let gain = self.state.gain();
        let notes = Self::chromatic_run(fragments as usize);
        synth.arpeggio(&notes, 0.035, 0.025, gain * 0.4, Waveform::Square);
    }

    fn color_toggle(&mut self, synth: &mut ToneSynthesizer, random_mode: bool) {
        let gain = self.state.gain();
        let notes = if random_mode {
            [Self::step(0.0), Self::step(12.0)]
        } else {
            [Self::step(12.0), Self::step(0.0)]
        };
        synth.arpeggio(&notes, 0.05, 0.04, gain * 0.4, Waveform::Square);
    }

    fn shape_select(&mut self, synth: &mut ToneSynthesizer, shape: Shape) {
        let gain = self.state.gain();
        let semitones = match shape {
            Shape::Circle => 0.0,
            Shape::Square => 5.0,
            Shape::Triangle => 10.0,
        };
        synth.tone(Self::step(semitones), 0.07, gain * 0.4, Waveform::Square);
    }

    fn cut(&mut self, synth: &mut ToneSynthesizer, _count: usize) {
        let gain = self.state.gain();
        synth.arpeggio(
            &[Self::step(7.0), Self::step(0.0)],
            0.04,
            0.03,
            gain * 0.45,
            Waveform::Square,
        );
    }

    fn lock(&mut self, synth: &mut ToneSynthesizer, _count: usize) {
        let gain = self.state.gain();
        synth.tone(Self::step(-12.0), 0.1, gain * 0.45, Waveform::Square);
    }

    fn unlock(&mut self, synth: &mut ToneSynthesizer, _count: usize) {
        let gain = self.state.gain();
        synth.tone(Self::step(-5.0), 0.1, gain * 0.45, Waveform::Square);
    }

    fn clear(&mut self, synth: &mut ToneSynthesizer, _count: usize) {
        let gain = self.state.gain();
        synth.glissando(1568.0, 65.0, 0.45, gain * 0.45, Waveform::Square);
    }

    fn help_toggle(&mut self, synth: &mut ToneSynthesizer, open: bool) {
        let gain = self.state.gain();
        let notes = if open {
            [Self::step(0.0), Self::step(4.0), Self::step(7.0)]
        } else {
            [Self::step(7.0), Self::step(4.0), Self::step(0.0)]
        };
        synth.arpeggio(&notes, 0.05, 0.035, gain * 0.35, Waveform::Square);
    }

    fn select(&mut self, synth: &mut ToneSynthesizer) {
        let gain = self.state.gain();
        synth.tone(Self::step(24.0), 0.04, gain * 0.4, Waveform::Square);
    }

    fn deselect(&mut self, synth: &mut ToneSynthesizer) {
        let gain = self.state.gain();
        synth.tone(Self::step(19.0), 0.04, gain * 0.35, Waveform::Square);
    }

    fn marquee_select(&mut self, synth: &mut ToneSynthesizer, count: usize) {
        let gain = self.state.gain();
        match count {
            0 => synth.tone(Self::step(-7.0), 0.03, gain * 0.2, Waveform::Square),
            1..=4 => synth.arpeggio(
                &[Self::step(12.0), Self::step(16.0)],
                0.04,
                0.03,
                gain * 0.4,
                Waveform::Square,
            ),
            _ => {
                let notes = Self::chromatic_run(count);
                synth.arpeggio(&notes, 0.035, 0.025, gain * 0.4, Waveform::Square);
            }
        }
    }

    fn hover(&mut self, synth: &mut ToneSynthesizer) {
        if !self.state.allow_hover() {
            return;
        }
        let gain = self.state.gain();
        synth.tone(Self::step(31.0), 0.02, gain * 0.12, Waveform::Square);
    }

    fn long_press(&mut self, synth: &mut ToneSynthesizer, _count: usize) {
        let gain = self.state.gain();
        synth.arpeggio(
            &[Self::step(0.0), Self::step(3.0), Self::step(7.0), Self::step(12.0)],
            0.04,
            0.03,
            gain * 0.4,
            Waveform::Square,
        );
    }

    fn two_finger_removal(&mut self, synth: &mut ToneSynthesizer, _count: usize) {
        let gain = self.state.gain();
        synth.noise_burst(0.1, gain * 0.35, 1.0);
        synth.glissando(523.0, 98.0, 0.2, gain * 0.4, Waveform::Square);
    }

    fn three_finger_removal(&mut self, synth: &mut ToneSynthesizer, _count: usize) {
        let gain = self.state.gain();
        synth.noise_burst(0.2, gain * 0.45, 1.0);
        synth.glissando(784.0, 49.0, 0.35, gain * 0.45, Waveform::Square);
    }

    fn delete_selection(&mut self, synth: &mut ToneSynthesizer, count: usize) {
        let gain = self.state.gain();
        let start = 523.0 / (1.0 + count as f32 * 0.1);
        let loudness = (0.25 + count as f64 * 0.03).min(0.7);
        synth.glissando(start, start / 4.0, 0.15, gain * loudness, Waveform::Square);
    }
}
