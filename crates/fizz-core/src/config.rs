//! Gameplay tunables
//!
//! Every numeric knob of the playground lives here so controllers receive an
//! explicit config instead of reaching for module-level constants. Values can
//! be overridden from a TOML file; the defaults match the shipped feel.

use crate::Result;
use serde::Deserialize;
use std::path::Path;

/// All playground tunables
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    // Physics
    /// Downward acceleration, in pixels per tick per tick (one tick = 1/60 s)
    pub gravity: f32,
    pub friction: f32,
    pub restitution: f32,
    pub density: f32,
    /// Extra contact margin added around each body
    pub body_padding: f32,

    // Initial velocity ranges, pixels per tick
    pub initial_velocity_x_min: f32,
    pub initial_velocity_x_max: f32,
    pub initial_velocity_y_min: f32,
    pub initial_velocity_y_max: f32,

    // Spawning
    pub default_spawn_count: u32,
    pub min_spawn_count: u32,
    pub max_spawn_count: u32,
    /// Spawn-count change per wheel notch / pinch step
    pub spawn_count_step: u32,
    pub max_particles: usize,

    // Sizing
    /// Base size = min(screen width, screen height) * this
    pub base_size_multiplier: f32,
    /// Spawn size range as multiples of base size
    pub particle_size_min: f32,
    pub particle_size_max: f32,
    /// Below this size a particle is removed outright
    pub min_particle_size: f32,

    // Acid
    /// Seconds between self-decay steps of an acid particle
    pub acid_decay_interval: f32,
    /// Fractional size loss per self-decay step
    pub acid_decay_rate: f32,
    /// Fractional size loss inflicted on a corroded target per contact
    pub acid_strength: f32,

    // Selection / gestures
    /// Long-press hold time in seconds
    pub long_press_duration: f32,
    /// Maximum finger drift during a long-press hold, pixels
    pub long_press_jitter: f32,
    /// Initial long-press selection radius, multiples of base size
    pub long_press_radius_multiplier: f32,
    /// Continuous drag-select radius, multiples of base size
    pub drag_select_radius_multiplier: f32,
    /// Minimum finger travel before drag-select rechecks, pixels
    pub drag_select_move_threshold: f32,
    /// Marquee boxes thinner than this (either axis) are ignored
    pub marquee_min_extent: f32,
    pub pulse_effect_scale: f32,
    pub pulse_effect_decay: f32,

    // Removal
    /// Cluster-removal radius = min screen dimension * this (tunable, not load-bearing)
    pub removal_radius_multiplier: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            friction: 0.3,
            restitution: 0.4,
            density: 0.001,
            body_padding: 2.5,

            initial_velocity_x_min: -5.0,
            initial_velocity_x_max: 5.0,
            initial_velocity_y_min: -5.0,
            initial_velocity_y_max: 0.0,

            default_spawn_count: 37,
            min_spawn_count: 10,
            max_spawn_count: 100,
            spawn_count_step: 7,
            max_particles: 1000,

            base_size_multiplier: 0.04,
            particle_size_min: 0.75,
            particle_size_max: 1.5,
            min_particle_size: 5.0,

            acid_decay_interval: 0.1,
            acid_decay_rate: 0.025,
            acid_strength: 0.1,

            long_press_duration: 0.5,
            long_press_jitter: 20.0,
            long_press_radius_multiplier: 3.0,
            drag_select_radius_multiplier: 2.0,
            drag_select_move_threshold: 5.0,
            marquee_min_extent: 10.0,
            pulse_effect_scale: 1.5,
            pulse_effect_decay: 0.05,

            removal_radius_multiplier: 0.15,
        }
    }
}

impl Config {
    /// Load overrides from a TOML file, falling back to defaults per field
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Scale unit derived from the viewport
    pub fn base_size(&self, screen_width: f32, screen_height: f32) -> f32 {
        screen_width.min(screen_height) * self.base_size_multiplier
    }

    /// Radius used by the two-finger cluster removal gesture
    pub fn removal_radius(&self, screen_width: f32, screen_height: f32) -> f32 {
        screen_width.min(screen_height) * self.removal_radius_multiplier
    }

    /// Clamp a proposed spawn count to the configured bounds
    pub fn clamp_spawn_count(&self, count: i64) -> u32 {
        count.clamp(self.min_spawn_count as i64, self.max_spawn_count as i64) as u32
    }
}
