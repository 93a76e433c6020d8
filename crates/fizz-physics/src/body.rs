//! The physics capability interface consumed by the simulation

use fizz_core::{Shape, Vec2};

/// Opaque, stable handle to a physics body.
///
/// Handles are issued by a backend and are never recycled within it, so a
/// handle held past removal simply stops resolving.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct BodyHandle(pub u64);

/// Distinguishes particle bodies from the world boundary bodies
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum BodyLabel {
    Particle,
    Boundary,
}

/// Construction options for a new body
#[derive(Clone, Copy, Debug)]
pub struct BodyOptions {
    pub friction: f32,
    pub restitution: f32,
    /// Initial rotation in radians
    pub angle: f32,
    pub density: f32,
    /// Contact margin added around the visual size
    pub padding: f32,
    pub label: BodyLabel,
}

impl Default for BodyOptions {
    fn default() -> Self {
        Self {
            friction: 0.3,
            restitution: 0.4,
            angle: 0.0,
            density: 0.001,
            padding: 2.5,
            label: BodyLabel::Particle,
        }
    }
}

/// One side of a collision-start event
#[derive(Clone, Copy, Debug)]
pub struct ContactBody {
    pub handle: BodyHandle,
    pub label: BodyLabel,
    /// Velocity at contact time, pixels per tick
    pub velocity: Vec2,
}

/// A collision-start event between two bodies
#[derive(Clone, Copy, Debug)]
pub struct Contact {
    pub a: ContactBody,
    pub b: ContactBody,
}

impl Contact {
    /// Relative speed of the two bodies at contact time
    pub fn impact_speed(&self) -> f32 {
        (self.a.velocity - self.b.velocity).length()
    }

    /// True if either side is a boundary body
    pub fn involves_boundary(&self) -> bool {
        self.a.label == BodyLabel::Boundary || self.b.label == BodyLabel::Boundary
    }
}

/// The narrow rigid-body capability the playground consumes.
///
/// Bodies are immutable apart from pose and velocity: changing contact
/// geometry means removing the body and creating a replacement.
pub trait Physics {
    /// Create a body for the given shape and return its handle
    fn create_body(
        &mut self,
        shape: Shape,
        position: Vec2,
        size: f32,
        options: BodyOptions,
    ) -> BodyHandle;

    /// Remove a body. A no-op for handles that no longer resolve.
    fn remove_body(&mut self, handle: BodyHandle);

    fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec2);

    /// Mark a body static (exempt from gravity and integration) or dynamic
    fn set_static(&mut self, handle: BodyHandle, is_static: bool);

    fn position(&self, handle: BodyHandle) -> Option<Vec2>;
    fn angle(&self, handle: BodyHandle) -> Option<f32>;
    fn velocity(&self, handle: BodyHandle) -> Option<Vec2>;
    fn is_static(&self, handle: BodyHandle) -> Option<bool>;

    /// Advance the simulation by dt seconds
    fn step(&mut self, dt: f32);

    /// Collision-start events observed since the last drain
    fn drain_contacts(&mut self) -> Vec<Contact>;

    /// Recreate the world boundaries (ground + side walls) for a viewport
    fn set_bounds(&mut self, width: f32, height: f32);
}
