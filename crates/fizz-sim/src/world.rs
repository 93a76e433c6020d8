//! The authoritative particle store

use crate::events::{SimEvent, SimEvents};
use crate::particle::Particle;
use fizz_core::{Color, Config, ParticleId, Shape, SimRng, Vec2};
use fizz_physics::{BodyHandle, Contact, Physics};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// What happened when a particle was asked to shrink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShrinkOutcome {
    /// Size updated, body replaced
    Resized,
    /// Fell below the minimum size and was removed
    Removed,
    /// The particle no longer exists
    Missing,
}

/// The playground world: every particle, keyed by stable id.
///
/// `selected` and `locked` are id sets over the same store; the matching
/// flags on each particle are maintained in lockstep by the mutators here,
/// so membership and flag can never disagree. All removal paths funnel
/// through [`World::remove`].
pub struct World<P: Physics> {
    config: Config,
    rng: SimRng,
    physics: P,
    particles: BTreeMap<ParticleId, Particle>,
    selected: BTreeSet<ParticleId>,
    locked: BTreeSet<ParticleId>,
    /// Body handle -> particle id, kept current across body rebuilds
    body_index: HashMap<BodyHandle, ParticleId>,
    pub events: SimEvents,
    base_size: f32,
    screen: (f32, f32),
}

impl<P: Physics> World<P> {
    pub fn new(config: Config, mut physics: P, seed: u32, width: f32, height: f32) -> Self {
        physics.set_bounds(width, height);
        let base_size = config.base_size(width, height);
        Self {
            config,
            rng: SimRng::new(seed),
            physics,
            particles: BTreeMap::new(),
            selected: BTreeSet::new(),
            locked: BTreeSet::new(),
            body_index: HashMap::new(),
            events: SimEvents::new(),
            base_size,
            screen: (width, height),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scale unit derived from the current viewport
    pub fn base_size(&self) -> f32 {
        self.base_size
    }

    pub fn screen(&self) -> (f32, f32) {
        self.screen
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut P {
        &mut self.physics
    }

    /// Viewport changed: recompute the scale unit and rebuild boundaries
    pub fn resize_viewport(&mut self, width: f32, height: f32) {
        self.screen = (width, height);
        self.base_size = self.config.base_size(width, height);
        self.physics.set_bounds(width, height);
    }

    /// Advance physics and collect the resulting collision-start events
    pub fn step_physics(&mut self, dt: f32) -> Vec<Contact> {
        self.physics.step(dt);
        self.physics.drain_contacts()
    }

    // --- Spawning ---

    /// Spawn `count` particles at a point, all sharing one color and shape
    pub fn spawn_batch(&mut self, position: Vec2, count: u32, color: Color, shape: Shape) {
        let base = self.base_size;
        for _ in 0..count {
            self.spawn_one(position, base, color, shape);
        }
        self.events.push(SimEvent::Spawned { count });
    }

    fn spawn_one(&mut self, position: Vec2, base: f32, color: Color, shape: Shape) -> ParticleId {
        let size = self
            .rng
            .range(base * self.config.particle_size_min, base * self.config.particle_size_max);
        let angle = self.rng.angle();
        let velocity = Vec2::new(
            self.rng
                .range(self.config.initial_velocity_x_min, self.config.initial_velocity_x_max),
            self.rng
                .range(self.config.initial_velocity_y_min, self.config.initial_velocity_y_max),
        );

        let particle = Particle::new(
            position,
            size,
            angle,
            velocity,
            color,
            shape,
            &self.config,
            &mut self.physics,
        );
        let id = particle.id;
        self.body_index.insert(particle.body, id);
        self.particles.insert(id, particle);
        id
    }

    /// Split a particle into outward-exploding fragments.
    ///
    /// The fragment size distribution is the standard spawn distribution
    /// re-centered so its midpoint lands at 60% of the original's size (a
    /// scoped base-size substitution, not a lasting parameter change).
    /// Returns the fragment count, or None if the particle is gone.
    pub fn split(&mut self, id: ParticleId) -> Option<u32> {
        let particle = self.particles.get(&id)?;
        let size = particle.size;
        let color = particle.color;
        let shape = particle.shape;
        let position = self.physics.position(particle.body)?;

        self.remove(id);

        // Spawn midpoint is base * (0.75 + 1.5)/2 = base * 1.125
        let midpoint = (self.config.particle_size_min + self.config.particle_size_max) / 2.0;
        let fragment_base = size * 0.6 / midpoint;

        let fragments = self.rng.range_u32(4, 8);
        for _ in 0..fragments {
            let fragment = self.spawn_one(position, fragment_base, color, shape);
            let angle = self.rng.angle();
            let force = self.rng.range(2.0, 5.0);
            if let Some(p) = self.particles.get(&fragment) {
                self.physics
                    .set_velocity(p.body, Vec2::from_angle(angle) * force);
            }
        }

        self.events.push(SimEvent::Split { fragments });
        Some(fragments)
    }

    // --- Removal (the one routine every deletion path uses) ---

    /// Remove a particle from the store, both id sets, and the physics
    /// world. Idempotent: removing an already-gone id is a no-op.
    pub fn remove(&mut self, id: ParticleId) -> bool {
        let Some(particle) = self.particles.remove(&id) else {
            return false;
        };
        self.physics.remove_body(particle.body);
        self.body_index.remove(&particle.body);
        self.selected.remove(&id);
        self.locked.remove(&id);
        true
    }

    /// Remove every particle. Returns how many were removed.
    pub fn clear_all(&mut self) -> usize {
        let ids = self.all_ids();
        for id in &ids {
            self.remove(*id);
        }
        ids.len()
    }

    /// Remove every unlocked particle. Returns how many were removed.
    pub fn remove_all_unlocked(&mut self) -> usize {
        let ids = self.unlocked_ids();
        for id in &ids {
            self.remove(*id);
        }
        ids.len()
    }

    /// Shrink a particle to `new_size`, removing it if it crosses the
    /// minimum-size threshold and rebuilding its body otherwise
    pub fn apply_shrink(&mut self, id: ParticleId, new_size: f32) -> ShrinkOutcome {
        if !self.particles.contains_key(&id) {
            return ShrinkOutcome::Missing;
        }
        if new_size < self.config.min_particle_size {
            self.remove(id);
            return ShrinkOutcome::Removed;
        }

        let config = self.config.clone();
        let particle = self.particles.get_mut(&id).expect("checked above");
        let old_body = particle.body;
        particle.size = new_size;
        particle.rebuild_body(&config, &mut self.physics);
        let new_body = particle.body;
        self.body_index.remove(&old_body);
        self.body_index.insert(new_body, id);
        ShrinkOutcome::Resized
    }

    // --- Selection / lock / hover / acid flags ---

    /// Add to the selection. Returns true if newly selected.
    pub fn select(&mut self, id: ParticleId) -> bool {
        let Some(particle) = self.particles.get_mut(&id) else {
            return false;
        };
        particle.selected = true;
        self.selected.insert(id)
    }

    /// Drop from the selection. Returns true if it was selected.
    pub fn deselect(&mut self, id: ParticleId) -> bool {
        if let Some(particle) = self.particles.get_mut(&id) {
            particle.selected = false;
        }
        self.selected.remove(&id)
    }

    /// Clear selection flags and the selected set
    pub fn clear_selection(&mut self) {
        for id in std::mem::take(&mut self.selected) {
            if let Some(particle) = self.particles.get_mut(&id) {
                particle.selected = false;
            }
        }
    }

    /// Clear both hover and selection state (Escape semantics)
    pub fn clear_hover_and_selection(&mut self) {
        for particle in self.particles.values_mut() {
            particle.hovered = false;
            particle.selected = false;
        }
        self.selected.clear();
    }

    /// Lock or unlock a particle, marking its body static accordingly.
    /// Returns true if the state changed.
    pub fn set_locked(&mut self, id: ParticleId, locked: bool) -> bool {
        let Some(particle) = self.particles.get_mut(&id) else {
            return false;
        };
        if particle.locked == locked {
            return false;
        }
        particle.locked = locked;
        self.physics.set_static(particle.body, locked);
        if locked {
            self.locked.insert(id);
        } else {
            self.locked.remove(&id);
        }
        true
    }

    pub fn set_hovered(&mut self, id: ParticleId, hovered: bool) {
        if let Some(particle) = self.particles.get_mut(&id) {
            particle.hovered = hovered;
        }
    }

    /// Unhover everything (at most one particle may hover at a time)
    pub fn clear_hovered(&mut self) {
        for particle in self.particles.values_mut() {
            particle.hovered = false;
        }
    }

    /// Flag a particle as acid. Idempotent; returns true on first conversion.
    pub fn convert_to_acid(&mut self, id: ParticleId) -> bool {
        let Some(particle) = self.particles.get_mut(&id) else {
            return false;
        };
        if particle.acid {
            return false;
        }
        particle.acid = true;
        true
    }

    /// Start the pulse visual on a particle
    pub fn set_pulse(&mut self, id: ParticleId) {
        let scale = self.config.pulse_effect_scale;
        if let Some(particle) = self.particles.get_mut(&id) {
            particle.pulse = Some(scale);
        }
    }

    /// Advance all pulse effects one frame
    pub fn decay_pulses(&mut self) {
        let decay = self.config.pulse_effect_decay;
        for particle in self.particles.values_mut() {
            particle.decay_pulse(decay);
        }
    }

    pub fn recolor(&mut self, id: ParticleId, color: Color) {
        if let Some(particle) = self.particles.get_mut(&id) {
            particle.color = color;
        }
    }

    // --- Queries ---

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn contains(&self, id: ParticleId) -> bool {
        self.particles.contains_key(&id)
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(&id)
    }

    pub fn particle_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.particles.get_mut(&id)
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.values()
    }

    pub fn particle_by_body(&self, body: BodyHandle) -> Option<ParticleId> {
        self.body_index.get(&body).copied()
    }

    pub fn position(&self, id: ParticleId) -> Option<Vec2> {
        let particle = self.particles.get(&id)?;
        self.physics.position(particle.body)
    }

    pub fn all_ids(&self) -> Vec<ParticleId> {
        self.particles.keys().copied().collect()
    }

    pub fn unlocked_ids(&self) -> Vec<ParticleId> {
        self.particles
            .values()
            .filter(|p| !p.locked)
            .map(|p| p.id)
            .collect()
    }

    pub fn acid_ids(&self) -> Vec<ParticleId> {
        self.particles
            .values()
            .filter(|p| p.acid)
            .map(|p| p.id)
            .collect()
    }

    pub fn selected_ids(&self) -> Vec<ParticleId> {
        self.selected.iter().copied().collect()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn locked_ids(&self) -> Vec<ParticleId> {
        self.locked.iter().copied().collect()
    }

    pub fn is_selected(&self, id: ParticleId) -> bool {
        self.selected.contains(&id)
    }

    pub fn is_locked(&self, id: ParticleId) -> bool {
        self.locked.contains(&id)
    }

    /// First particle whose body covers the point, in id order
    pub fn particle_at(&self, point: Vec2) -> Option<ParticleId> {
        self.particles
            .values()
            .find(|p| {
                self.physics
                    .position(p.body)
                    .is_some_and(|pos| pos.distance(point) < p.size / 2.0)
            })
            .map(|p| p.id)
    }

    /// Ids of particles whose centers lie within `radius` of `center`
    pub fn ids_within(&self, center: Vec2, radius: f32) -> Vec<ParticleId> {
        self.particles
            .values()
            .filter(|p| {
                self.physics
                    .position(p.body)
                    .is_some_and(|pos| pos.distance(center) <= radius)
            })
            .map(|p| p.id)
            .collect()
    }

    /// Mean size of the two contact participants, for collision audio
    pub fn contact_avg_size(&self, contact: &Contact) -> Option<f32> {
        let a = self.particle(self.particle_by_body(contact.a.handle)?)?;
        let b = self.particle(self.particle_by_body(contact.b.handle)?)?;
        Some((a.size + b.size) / 2.0)
    }
}
