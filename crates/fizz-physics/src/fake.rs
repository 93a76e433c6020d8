//! Deterministic in-memory physics backend
//!
//! Integrates straight-line motion under gravity with no collision
//! detection; contacts are injected by the caller. Used by simulation
//! tests and headless runs where Rapier would add nondeterminism.

use crate::body::{BodyHandle, BodyLabel, BodyOptions, Contact, ContactBody, Physics};
use crate::TICKS_PER_SECOND;
use fizz_core::{Shape, Vec2};
use std::collections::BTreeMap;

struct FakeBody {
    position: Vec2,
    velocity: Vec2,
    angle: f32,
    is_static: bool,
    label: BodyLabel,
    #[allow(dead_code)]
    shape: Shape,
    size: f32,
}

/// In-memory backend with caller-injected contacts
pub struct FakePhysics {
    bodies: BTreeMap<BodyHandle, FakeBody>,
    boundary_handles: Vec<BodyHandle>,
    queued_contacts: Vec<(BodyHandle, BodyHandle)>,
    gravity: f32,
    next_handle: u64,
}

impl FakePhysics {
    /// Create a backend with the given downward gravity (pixels per tick²)
    pub fn new(gravity: f32) -> Self {
        Self {
            bodies: BTreeMap::new(),
            boundary_handles: Vec::new(),
            queued_contacts: Vec::new(),
            gravity,
            next_handle: 1,
        }
    }

    /// Queue a collision-start event for the next drain
    pub fn push_contact(&mut self, a: BodyHandle, b: BodyHandle) {
        self.queued_contacts.push((a, b));
    }

    /// Number of live bodies, boundaries included
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// The boundary handles created by the last `set_bounds`
    pub fn boundaries(&self) -> &[BodyHandle] {
        &self.boundary_handles
    }

    /// Size the body was created with (bodies are recreated on resize)
    pub fn body_size(&self, handle: BodyHandle) -> Option<f32> {
        self.bodies.get(&handle).map(|b| b.size)
    }

    fn issue_handle(&mut self) -> BodyHandle {
        let handle = BodyHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    fn resolve(&self, handle: BodyHandle) -> Option<ContactBody> {
        let body = self.bodies.get(&handle)?;
        Some(ContactBody {
            handle,
            label: body.label,
            velocity: body.velocity,
        })
    }
}

impl Physics for FakePhysics {
    fn create_body(
        &mut self,
        shape: Shape,
        position: Vec2,
        size: f32,
        options: BodyOptions,
    ) -> BodyHandle {
        let handle = self.issue_handle();
        self.bodies.insert(
            handle,
            FakeBody {
                position,
                velocity: Vec2::ZERO,
                angle: options.angle,
                is_static: false,
                label: options.label,
                shape,
                size,
            },
        );
        handle
    }

    fn remove_body(&mut self, handle: BodyHandle) {
        self.bodies.remove(&handle);
    }

    fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec2) {
        if let Some(body) = self.bodies.get_mut(&handle) {
            body.velocity = velocity;
        }
    }

    fn set_static(&mut self, handle: BodyHandle, is_static: bool) {
        if let Some(body) = self.bodies.get_mut(&handle) {
            body.is_static = is_static;
            if is_static {
                body.velocity = Vec2::ZERO;
            }
        }
    }

    fn position(&self, handle: BodyHandle) -> Option<Vec2> {
        self.bodies.get(&handle).map(|b| b.position)
    }

    fn angle(&self, handle: BodyHandle) -> Option<f32> {
        self.bodies.get(&handle).map(|b| b.angle)
    }

    fn velocity(&self, handle: BodyHandle) -> Option<Vec2> {
        self.bodies.get(&handle).map(|b| b.velocity)
    }

    fn is_static(&self, handle: BodyHandle) -> Option<bool> {
        self.bodies.get(&handle).map(|b| b.is_static)
    }

    fn step(&mut self, dt: f32) {
        let ticks = dt * TICKS_PER_SECOND;
        for body in self.bodies.values_mut() {
            if body.is_static || body.label == BodyLabel::Boundary {
                continue;
            }
            body.velocity.y += self.gravity * ticks;
            body.position = body.position + body.velocity * ticks;
        }
    }

    fn drain_contacts(&mut self) -> Vec<Contact> {
        let queued = std::mem::take(&mut self.queued_contacts);
        queued
            .into_iter()
            .filter_map(|(a, b)| {
                // A queued pair may reference bodies removed earlier this frame
                let (a, b) = (self.resolve(a)?, self.resolve(b)?);
                Some(Contact { a, b })
            })
            .collect()
    }

    fn set_bounds(&mut self, width: f32, height: f32) {
        for handle in std::mem::take(&mut self.boundary_handles) {
            self.bodies.remove(&handle);
        }

        let mut boundary = |this: &mut Self, x: f32, y: f32| {
            let handle = this.issue_handle();
            this.bodies.insert(
                handle,
                FakeBody {
                    position: Vec2::new(x, y),
                    velocity: Vec2::ZERO,
                    angle: 0.0,
                    is_static: true,
                    label: BodyLabel::Boundary,
                    shape: Shape::Square,
                    size: 50.0,
                },
            );
            this.boundary_handles.push(handle);
        };

        boundary(self, width / 2.0, height + 25.0);
        boundary(self, -25.0, height / 2.0);
        boundary(self, width + 25.0, height / 2.0);
    }
}
