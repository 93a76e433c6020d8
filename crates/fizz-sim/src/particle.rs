//! The particle entity

use fizz_core::{Color, Config, ParticleId, Shape, Vec2};
use fizz_physics::{BodyHandle, BodyLabel, BodyOptions, Physics};

/// One shape in the playground.
///
/// A particle owns exactly one physics body. The body's contact geometry is
/// immutable, so a size change destroys the body and creates a replacement
/// at the same pose with the same velocity.
pub struct Particle {
    pub id: ParticleId,
    pub shape: Shape,
    pub size: f32,
    pub color: Color,
    pub body: BodyHandle,
    /// Transient visual scale >1.0, decaying toward None
    pub pulse: Option<f32>,
    /// Seconds accumulated toward the next acid self-decay step
    pub acid_decay_timer: f32,
    /// Fractional size loss this particle inflicts while acid
    pub acid_strength: f32,

    pub(crate) hovered: bool,
    pub(crate) selected: bool,
    pub(crate) locked: bool,
    pub(crate) acid: bool,
}

impl Particle {
    /// Create a particle and register its physics body
    pub(crate) fn new(
        position: Vec2,
        size: f32,
        angle: f32,
        velocity: Vec2,
        color: Color,
        shape: Shape,
        config: &Config,
        physics: &mut dyn Physics,
    ) -> Self {
        let body = physics.create_body(
            shape,
            position,
            size,
            BodyOptions {
                friction: config.friction,
                restitution: config.restitution,
                angle,
                density: config.density,
                padding: config.body_padding,
                label: BodyLabel::Particle,
            },
        );
        physics.set_velocity(body, velocity);

        Self {
            id: ParticleId::new(),
            shape,
            size,
            color,
            body,
            pulse: None,
            acid_decay_timer: 0.0,
            acid_strength: config.acid_strength,
            hovered: false,
            selected: false,
            locked: false,
            acid: false,
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_acid(&self) -> bool {
        self.acid
    }

    /// Replace the physics body with one of the current size, preserving
    /// position, angle, and velocity
    pub(crate) fn rebuild_body(&mut self, config: &Config, physics: &mut dyn Physics) {
        let position = physics.position(self.body).unwrap_or(Vec2::ZERO);
        let angle = physics.angle(self.body).unwrap_or(0.0);
        let velocity = physics.velocity(self.body).unwrap_or(Vec2::ZERO);
        let was_static = physics.is_static(self.body).unwrap_or(false);

        physics.remove_body(self.body);
        self.body = physics.create_body(
            self.shape,
            position,
            self.size,
            BodyOptions {
                friction: config.friction,
                restitution: config.restitution,
                angle,
                density: config.density,
                padding: config.body_padding,
                label: BodyLabel::Particle,
            },
        );
        physics.set_velocity(self.body, velocity);
        if was_static {
            physics.set_static(self.body, true);
        }
    }

    /// Advance the pulse visual effect one frame
    pub(crate) fn decay_pulse(&mut self, decay: f32) {
        if let Some(pulse) = self.pulse {
            let next = pulse - decay;
            self.pulse = if next > 1.0 { Some(next) } else { None };
        }
    }
}
