//! The default pack: mellow pentatonic sines and triangles

use crate::pack::{collision_loudness, collision_pitch, midi_to_freq, PackState, SoundPack};
use crate::synth::{ToneSynthesizer, Waveform};
use fizz_core::Shape;

/// Major pentatonic semitone offsets
const PENTATONIC: [f32; 5] = [0.0, 2.0, 4.0, 7.0, 9.0];

/// Root note A3
const ROOT: f32 = 57.0;

/// Longest arpeggio any event may schedule
const MAX_ARP_NOTES: usize = 8;

pub struct OriginalPack {
    state: PackState,
}

impl OriginalPack {
    pub fn new() -> Self {
        Self {
            state: PackState::new(),
        }
    }

    /// Frequency of the nth pentatonic degree above the root
    fn note(degree: usize) -> f32 {
        let octave = (degree / PENTATONIC.len()) as f32;
        let offset = PENTATONIC[degree % PENTATONIC.len()];
        midi_to_freq(ROOT + octave * 12.0 + offset)
    }

    fn scale_run(count: usize) -> Vec<f32> {
        (0..count.min(MAX_ARP_NOTES)).map(Self::note).collect()
    }
}

impl Default for OriginalPack {
    fn default() -> Self {
        Self::new()
    }
}

impl SoundPack for OriginalPack {
    fn id(&self) -> &'static str {
        "original"
    }

    fn state(&self) -> &PackState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PackState {
        &mut self.state
    }

    fn particle_create(&mut self, synth: &mut ToneSynthesizer, count: u32) {
        let gain = self.state.gain();
        let notes = Self::scale_run(count as usize);
        synth.arpeggio(&notes, 0.07, 0.045, gain * 0.6, Waveform::Sine);
    }

    fn collision(&mut self, synth: &mut ToneSynthesizer, impact_speed: f32, avg_size: f32, load: f32) {
        if !self.state.allow_collision() {
            return;
        }
        let gain = self.state.gain();
        let freq = collision_pitch(impact_speed, avg_size, 160.0, 640.0);
        synth.tone(freq, 0.08, gain * collision_loudness(impact_speed, load), Waveform::Triangle);
    }

    fn wall_bounce(&mut self, synth: &mut ToneSynthesizer, impact_speed: f32, _size: f32) {
        if !self.state.allow_wall_bounce() {
            return;
        }
        let gain = self.state.gain();
        let freq = (110.0 + impact_speed * 12.0).min(220.0);
        let loudness = (0.15 + impact_speed as f64 * 0.04).min(0.5);
        synth.tone(freq, 0.06, gain * loudness, Waveform::Sine);
    }

    fn acid_convert(&mut self, synth: &mut ToneSynthesizer) {
        let gain = self.state.gain();
        synth.glissando(523.0, 196.0, 0.35, gain * 0.5, Waveform::Triangle);
    }

    fn acid_corrosion(&mut self, synth: &mut ToneSynthesizer, target_size: f32) {
        let gain = self.state.gain();
        // Smaller targets fizz brighter
        let brightness = (1.0 - target_size / 80.0).clamp(0.2, 0.8);
        synth.noise_burst(0.08, gain * 0.35, brightness);
    }

    fn particle_split(&mut self, synth: &mut ToneSynthesizer, fragments: u32) {
        let gain = self.state.gain();
        let notes = Self::scale_run(fragments as usize);
        synth.arpeggio(&notes, 0.05, 0.03, gain * 0.55, Waveform::Triangle);
    }

    fn color_toggle(&mut self, synth: &mut ToneSynthesizer, random_mode: bool) {
        let gain = self.state.gain();
        let (first, second) = if random_mode { (0, 4) } else { (4, 0) };
        synth.arpeggio(
            &[Self::note(first), Self::note(second)],
            0.08,
            0.06,
            gain * 0.5,
            Waveform::Sine,
        );
    }

    fn shape_select(&mut self, synth: &mut ToneSynthesizer, shape: Shape) {
        let gain = self.state.gain();
        let degree = match shape {
            Shape::Circle => 5,
            Shape::Square => 3,
            Shape::Triangle => 7,
        };
        synth.tone(Self::note(degree), 0.1, gain * 0.5, Waveform::Sine);
    }

    fn cut(&mut self, synth: &mut ToneSynthesizer, count: usize) {
        let gain = self.state.gain();
        let loudness = (0.4 + count as f64 * 0.02).min(0.8);
        synth.glissando(660.0, 330.0, 0.15, gain * loudness, Waveform::Triangle);
    }

    fn lock(&mut self, synth: &mut ToneSynthesizer, _count: usize) {
        let gain = self.state.gain();
        synth.tone(midi_to_freq(45.0), 0.15, gain * 0.6, Waveform::Sine);
    }

    fn unlock(&mut self, synth: &mut ToneSynthesizer, _count: usize) {
        let gain = self.state.gain();
        synth.tone(midi_to_freq(52.0), 0.15, gain * 0.6, Waveform::Sine);
    }

    fn clear(&mut self, synth: &mut ToneSynthesizer, _count: usize) {
        let gain = self.state.gain();
        synth.glissando(880.0, 110.0, 0.5, gain * 0.6, Waveform::Sine);
    }

    fn help_toggle(&mut self, synth: &mut ToneSynthesizer, open: bool) {
        let gain = self.state.gain();
        let notes = if open {
            [Self::note(0), Self::note(2)]
        } else {
            [Self::note(2), Self::note(0)]
        };
        synth.arpeggio(&notes, 0.09, 0.07, gain * 0.4, Waveform::Sine);
    }

    fn select(&mut self, synth: &mut ToneSynthesizer) {
        let gain = self.state.gain();
        synth.tone(Self::note(9), 0.06, gain * 0.5, Waveform::Sine);
    }

    fn deselect(&mut self, synth: &mut ToneSynthesizer) {
        let gain = self.state.gain();
        synth.tone(Self::note(7), 0.06, gain * 0.45, Waveform::Sine);
    }

    fn marquee_select(&mut self, synth: &mut ToneSynthesizer, count: usize) {
        let gain = self.state.gain();
        match count {
            0 => synth.tone(Self::note(0), 0.05, gain * 0.25, Waveform::Sine),
            1..=4 => synth.arpeggio(
                &[Self::note(4), Self::note(6)],
                0.07,
                0.05,
                gain * 0.5,
                Waveform::Sine,
            ),
            _ => {
                let notes = Self::scale_run(count);
                synth.arpeggio(&notes, 0.06, 0.04, gain * 0.5, Waveform::Sine);
            }
        }
    }

    fn hover(&mut self, synth: &mut ToneSynthesizer) {
        if !self.state.allow_hover() {
            return;
        }
        let gain = self.state.gain();
        synth.tone(1318.5, 0.025, gain * 0.15, Waveform::Sine);
    }

    fn long_press(&mut self, synth: &mut ToneSynthesizer, _count: usize) {
        let gain = self.state.gain();
        synth.arpeggio(
            &[Self::note(0), Self::note(2), Self::note(4)],
            0.1,
            0.08,
            gain * 0.5,
            Waveform::Triangle,
        );
    }

    fn two_finger_removal(&mut self, synth: &mut ToneSynthesizer, count: usize) {
        let gain = self.state.gain();
        synth.noise_burst(0.15, gain * 0.4, 0.5);
        let loudness = (0.3 + count as f64 * 0.02).min(0.7);
        synth.glissando(440.0, 110.0, 0.25, gain * loudness, Waveform::Triangle);
    }

    fn three_finger_removal(&mut self, synth: &mut ToneSynthesizer, count: usize) {
        let gain = self.state.gain();
        synth.noise_burst(0.25, gain * 0.5, 0.6);
        let loudness = (0.35 + count as f64 * 0.01).min(0.8);
        synth.glissando(660.0, 82.0, 0.4, gain * loudness, Waveform::Triangle);
    }

    fn delete_selection(&mut self, synth: &mut ToneSynthesizer, count: usize) {
        let gain = self.state.gain();
        // Bigger selections land lower and louder
        let start = 440.0 / (1.0 + count as f32 * 0.08);
        let loudness = (0.3 + count as f64 * 0.03).min(0.8);
        synth.glissando(start, start / 2.0, 0.2, gain * loudness, Waveform::Triangle);
    }
}
