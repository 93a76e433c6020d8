//! Spawn color generation
//!
//! Two modes, mirroring the toolbar's palette button: a random walk where
//! each batch's color drifts smoothly from the previous batch's, and a
//! fixed user-picked color.

use fizz_core::{Color, SimRng};

/// Maximum per-channel drift between consecutive random batches
const DRIFT: f32 = 48.0;

pub struct Palette {
    rng: SimRng,
    random_mode: bool,
    picked: Color,
    previous: Color,
}

impl Palette {
    pub fn new(seed: u32) -> Self {
        let mut rng = SimRng::new(seed);
        let previous = Color::new(
            rng.range(0.0, 255.0) as u8,
            rng.range(0.0, 255.0) as u8,
            rng.range(0.0, 255.0) as u8,
        );
        Self {
            rng,
            random_mode: true,
            picked: previous,
            previous,
        }
    }

    pub fn is_random(&self) -> bool {
        self.random_mode
    }

    pub fn picked(&self) -> Color {
        self.picked
    }

    /// Toggle between random-walk and picked mode; returns the new mode
    pub fn toggle_mode(&mut self) -> bool {
        self.random_mode = !self.random_mode;
        self.random_mode
    }

    /// Choosing a color switches to picked mode
    pub fn set_picked(&mut self, color: Color) {
        self.picked = color;
        self.random_mode = false;
    }

    /// Color for the next spawn batch (advances the walk in random mode)
    pub fn next_color(&mut self) -> Color {
        if !self.random_mode {
            return self.picked;
        }

        let drift = |rng: &mut SimRng, channel: u8| -> u8 {
            (channel as f32 + rng.range(-DRIFT, DRIFT)).clamp(0.0, 255.0) as u8
        };
        let next = Color::new(
            drift(&mut self.rng, self.previous.r),
            drift(&mut self.rng, self.previous.g),
            drift(&mut self.rng, self.previous.b),
        );
        self.previous = next;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picked_mode_is_stable() {
        let mut palette = Palette::new(1);
        palette.set_picked(Color::new(10, 20, 30));
        assert!(!palette.is_random());
        assert_eq!(palette.next_color(), Color::new(10, 20, 30));
        assert_eq!(palette.next_color(), Color::new(10, 20, 30));
    }

    #[test]
    fn test_random_walk_drifts_smoothly() {
        let mut palette = Palette::new(7);
        let first = palette.next_color();
        let second = palette.next_color();

        let delta = |a: u8, b: u8| (a as i32 - b as i32).abs();
        assert!(delta(first.r, second.r) <= DRIFT as i32);
        assert!(delta(first.g, second.g) <= DRIFT as i32);
        assert!(delta(first.b, second.b) <= DRIFT as i32);
    }

    #[test]
    fn test_toggle_restores_random_mode() {
        let mut palette = Palette::new(1);
        palette.set_picked(Color::new(1, 2, 3));
        assert!(palette.toggle_mode());
        assert!(palette.is_random());
    }
}
