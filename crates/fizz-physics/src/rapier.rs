//! Production physics backend wrapping Rapier 2D

use crate::body::{BodyHandle, BodyLabel, BodyOptions, Contact, ContactBody, Physics};
use crate::TICKS_PER_SECOND;
use bimap::BiMap;
use fizz_core::{Shape, Vec2};
use rapier2d::prelude::*;
use std::collections::HashMap;

/// Wraps Rapier's physics pipeline and body/collider sets.
///
/// Coordinates are screen-space (y down), so gravity points along +y.
pub struct RapierPhysics {
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,

    /// Stable handle <-> Rapier body handle mapping
    handle_map: BiMap<BodyHandle, RigidBodyHandle>,
    labels: HashMap<BodyHandle, BodyLabel>,
    boundary_handles: Vec<BodyHandle>,
    next_handle: u64,

    /// Collision events from the last step
    collision_recv: crossbeam::channel::Receiver<CollisionEvent>,
    contact_force_recv: crossbeam::channel::Receiver<ContactForceEvent>,
    event_handler: ChannelEventCollector,
}

impl RapierPhysics {
    /// Create a backend with the given downward gravity (pixels per tick²)
    pub fn new(gravity: f32) -> Self {
        let (collision_send, collision_recv) = crossbeam::channel::unbounded();
        let (contact_force_send, contact_force_recv) = crossbeam::channel::unbounded();
        let event_handler = ChannelEventCollector::new(collision_send, contact_force_send);

        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            // px/tick² -> px/s²
            gravity: vector![0.0, gravity * TICKS_PER_SECOND * TICKS_PER_SECOND],
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            handle_map: BiMap::new(),
            labels: HashMap::new(),
            boundary_handles: Vec::new(),
            next_handle: 1,
            collision_recv,
            contact_force_recv,
            event_handler,
        }
    }

    fn issue_handle(&mut self) -> BodyHandle {
        let handle = BodyHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    fn collider_for(shape: Shape, size: f32, padding: f32) -> ColliderBuilder {
        match shape {
            Shape::Circle => ColliderBuilder::ball(size / 2.0 + padding),
            Shape::Square => {
                let half = (size + padding) / 2.0;
                ColliderBuilder::cuboid(half, half)
            }
            Shape::Triangle => {
                // Regular triangle with the same circumradius the renderer draws
                let r = size / 1.8;
                let vertex = |k: f32| {
                    let theta = -std::f32::consts::FRAC_PI_2 + k * std::f32::consts::TAU / 3.0;
                    point![r * theta.cos(), r * theta.sin()]
                };
                ColliderBuilder::triangle(vertex(0.0), vertex(1.0), vertex(2.0))
            }
        }
    }

    fn resolve(&self, collider: ColliderHandle) -> Option<ContactBody> {
        let parent = self.collider_set.get(collider)?.parent()?;
        let handle = *self.handle_map.get_by_right(&parent)?;
        let body = self.rigid_body_set.get(parent)?;
        Some(ContactBody {
            handle,
            label: *self.labels.get(&handle)?,
            velocity: Vec2::new(
                body.linvel().x / TICKS_PER_SECOND,
                body.linvel().y / TICKS_PER_SECOND,
            ),
        })
    }

    fn insert_boundary(&mut self, x: f32, y: f32, half_x: f32, half_y: f32) {
        let handle = self.issue_handle();
        let body = RigidBodyBuilder::fixed().translation(vector![x, y]).build();
        let rb_handle = self.rigid_body_set.insert(body);

        let defaults = BodyOptions::default();
        let collider = ColliderBuilder::cuboid(half_x, half_y)
            .friction(defaults.friction)
            .restitution(defaults.restitution)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        self.collider_set
            .insert_with_parent(collider, rb_handle, &mut self.rigid_body_set);

        self.handle_map.insert(handle, rb_handle);
        self.labels.insert(handle, BodyLabel::Boundary);
        self.boundary_handles.push(handle);
    }
}

impl Physics for RapierPhysics {
    fn create_body(
        &mut self,
        shape: Shape,
        position: Vec2,
        size: f32,
        options: BodyOptions,
    ) -> BodyHandle {
        let handle = self.issue_handle();

        let body = RigidBodyBuilder::dynamic()
            .translation(vector![position.x, position.y])
            .rotation(options.angle)
            .build();
        let rb_handle = self.rigid_body_set.insert(body);

        let collider = Self::collider_for(shape, size, options.padding)
            .friction(options.friction)
            .restitution(options.restitution)
            .density(options.density)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        self.collider_set
            .insert_with_parent(collider, rb_handle, &mut self.rigid_body_set);

        self.handle_map.insert(handle, rb_handle);
        self.labels.insert(handle, options.label);
        handle
    }

    fn remove_body(&mut self, handle: BodyHandle) {
        let Some((_, rb_handle)) = self.handle_map.remove_by_left(&handle) else {
            return;
        };
        self.labels.remove(&handle);
        self.rigid_body_set.remove(
            rb_handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
    }

    fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec2) {
        let Some(rb_handle) = self.handle_map.get_by_left(&handle) else {
            return;
        };
        if let Some(body) = self.rigid_body_set.get_mut(*rb_handle) {
            body.set_linvel(
                vector![
                    velocity.x * TICKS_PER_SECOND,
                    velocity.y * TICKS_PER_SECOND
                ],
                true,
            );
        }
    }

    fn set_static(&mut self, handle: BodyHandle, is_static: bool) {
        let Some(rb_handle) = self.handle_map.get_by_left(&handle) else {
            return;
        };
        if let Some(body) = self.rigid_body_set.get_mut(*rb_handle) {
            let body_type = if is_static {
                RigidBodyType::Fixed
            } else {
                RigidBodyType::Dynamic
            };
            body.set_body_type(body_type, true);
        }
    }

    fn position(&self, handle: BodyHandle) -> Option<Vec2> {
        let rb_handle = self.handle_map.get_by_left(&handle)?;
        let body = self.rigid_body_set.get(*rb_handle)?;
        Some(Vec2::new(body.translation().x, body.translation().y))
    }

    fn angle(&self, handle: BodyHandle) -> Option<f32> {
        let rb_handle = self.handle_map.get_by_left(&handle)?;
        Some(self.rigid_body_set.get(*rb_handle)?.rotation().angle())
    }

    fn velocity(&self, handle: BodyHandle) -> Option<Vec2> {
        let rb_handle = self.handle_map.get_by_left(&handle)?;
        let body = self.rigid_body_set.get(*rb_handle)?;
        Some(Vec2::new(
            body.linvel().x / TICKS_PER_SECOND,
            body.linvel().y / TICKS_PER_SECOND,
        ))
    }

    fn is_static(&self, handle: BodyHandle) -> Option<bool> {
        let rb_handle = self.handle_map.get_by_left(&handle)?;
        Some(self.rigid_body_set.get(*rb_handle)?.is_fixed())
    }

    fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &self.event_handler,
        );
    }

    fn drain_contacts(&mut self) -> Vec<Contact> {
        // Discard contact force events; only collision starts matter here
        while self.contact_force_recv.try_recv().is_ok() {}

        let mut contacts = Vec::new();
        while let Ok(event) = self.collision_recv.try_recv() {
            let CollisionEvent::Started(collider_a, collider_b, _) = event else {
                continue;
            };
            // A collider may be gone by drain time if its body was removed
            let (Some(a), Some(b)) = (self.resolve(collider_a), self.resolve(collider_b)) else {
                continue;
            };
            contacts.push(Contact { a, b });
        }
        contacts
    }

    fn set_bounds(&mut self, width: f32, height: f32) {
        for handle in std::mem::take(&mut self.boundary_handles) {
            self.remove_body(handle);
        }

        // Ground below the viewport plus two side walls
        self.insert_boundary(width / 2.0, height + 25.0, width / 2.0, 25.0);
        self.insert_boundary(-25.0, height / 2.0, 25.0, height / 2.0);
        self.insert_boundary(width + 25.0, height / 2.0, 25.0, height / 2.0);
    }
}
