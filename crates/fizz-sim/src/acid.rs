//! Acid dissolution
//!
//! Two independent triggers shrink particles:
//! - self-decay: an acid particle burns itself out on a fixed interval
//! - corrosion: each reported contact between an acid particle and an
//!   unlocked non-acid particle costs the target a size fraction
//!
//! Locked particles and other acid particles are immune. Any particle that
//! crosses the minimum-size threshold is removed through the store's
//! centralized routine; otherwise its body is rebuilt at the new size.

use crate::events::SimEvent;
use crate::world::World;
use fizz_core::{Config, ParticleId};
use fizz_physics::{Contact, Physics};

/// Drives timer decay and contact corrosion over the particle store
pub struct AcidEngine {
    decay_interval: f32,
    decay_rate: f32,
}

impl AcidEngine {
    pub fn new(config: &Config) -> Self {
        Self {
            decay_interval: config.acid_decay_interval,
            decay_rate: config.acid_decay_rate,
        }
    }

    /// Apply corrosion for this frame's collision-start events.
    ///
    /// Contacts are applied independently in event order; two acid
    /// particles touching one target in the same frame each take their
    /// bite out of it.
    pub fn process_contacts<P: Physics>(&self, world: &mut World<P>, contacts: &[Contact]) {
        for contact in contacts {
            if contact.involves_boundary() {
                continue;
            }
            // Either body may already be gone within this frame
            let Some(id_a) = world.particle_by_body(contact.a.handle) else {
                continue;
            };
            let Some(id_b) = world.particle_by_body(contact.b.handle) else {
                continue;
            };

            if Self::can_corrode(world, id_a, id_b) {
                self.corrode(world, id_a, id_b);
            } else if Self::can_corrode(world, id_b, id_a) {
                self.corrode(world, id_b, id_a);
            }
        }
    }

    fn can_corrode<P: Physics>(world: &World<P>, acid: ParticleId, target: ParticleId) -> bool {
        let (Some(acid), Some(target)) = (world.particle(acid), world.particle(target)) else {
            return false;
        };
        acid.is_acid() && !target.is_acid() && !target.is_locked()
    }

    fn corrode<P: Physics>(&self, world: &mut World<P>, acid: ParticleId, target: ParticleId) {
        let Some(strength) = world.particle(acid).map(|p| p.acid_strength) else {
            return;
        };
        let Some(size) = world.particle(target).map(|p| p.size) else {
            return;
        };

        world.events.push(SimEvent::Corroded { id: target, size });
        world.apply_shrink(target, size * (1.0 - strength));
    }

    /// Advance every acid particle's self-decay timer by `dt` seconds.
    ///
    /// Locked acid particles neither decay nor corrode.
    pub fn tick_decay<P: Physics>(&self, world: &mut World<P>, dt: f32) {
        for id in world.acid_ids() {
            let Some(particle) = world.particle_mut(id) else {
                continue;
            };
            if particle.is_locked() {
                continue;
            }

            particle.acid_decay_timer += dt;
            if particle.acid_decay_timer < self.decay_interval {
                continue;
            }
            particle.acid_decay_timer = 0.0;

            let new_size = particle.size * (1.0 - self.decay_rate);
            world.apply_shrink(id, new_size);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fizz_core::{Color, Shape, Vec2};
    use fizz_physics::FakePhysics;

    fn world_with(count: u32) -> World<FakePhysics> {
        let mut world = World::new(
            Config::default(),
            FakePhysics::new(0.0),
            42,
            1000.0,
            800.0,
        );
        world.spawn_batch(Vec2::new(500.0, 400.0), count, Color::default(), Shape::Circle);
        world.events.drain();
        world
    }

    fn contact_between(world: &World<FakePhysics>, a: ParticleId, b: ParticleId) -> Contact {
        let handle_a = world.particle(a).unwrap().body;
        let handle_b = world.particle(b).unwrap().body;
        Contact {
            a: fizz_physics::ContactBody {
                handle: handle_a,
                label: fizz_physics::BodyLabel::Particle,
                velocity: Vec2::ZERO,
            },
            b: fizz_physics::ContactBody {
                handle: handle_b,
                label: fizz_physics::BodyLabel::Particle,
                velocity: Vec2::ZERO,
            },
        }
    }

    #[test]
    fn test_decay_fires_exactly_once_per_interval() {
        // 100ms of frame time with no collisions shrinks exactly once
        let mut world = world_with(1);
        let engine = AcidEngine::new(&Config::default());
        let id = world.all_ids()[0];
        world.convert_to_acid(id);
        let size = world.particle(id).unwrap().size;

        engine.tick_decay(&mut world, 0.1);
        let after = world.particle(id).unwrap().size;
        assert!((after - size * 0.975).abs() < 1e-5);

        // A short follow-up frame stays inside the next interval
        engine.tick_decay(&mut world, 0.016);
        assert!((world.particle(id).unwrap().size - after).abs() < 1e-6);
    }

    #[test]
    fn test_decay_accumulates_across_frames() {
        let mut world = world_with(1);
        let engine = AcidEngine::new(&Config::default());
        let id = world.all_ids()[0];
        world.convert_to_acid(id);
        let size = world.particle(id).unwrap().size;

        // Six ~16.7ms frames cross the 100ms interval once
        for _ in 0..6 {
            engine.tick_decay(&mut world, 1.0 / 60.0);
        }
        assert!((world.particle(id).unwrap().size - size * 0.975).abs() < 1e-5);
    }

    #[test]
    fn test_locked_acid_does_not_decay() {
        let mut world = world_with(1);
        let engine = AcidEngine::new(&Config::default());
        let id = world.all_ids()[0];
        world.convert_to_acid(id);
        world.set_locked(id, true);
        let size = world.particle(id).unwrap().size;

        engine.tick_decay(&mut world, 1.0);
        assert_eq!(world.particle(id).unwrap().size, size);
    }

    #[test]
    fn test_decay_removes_below_minimum() {
        let mut world = world_with(1);
        let engine = AcidEngine::new(&Config::default());
        let id = world.all_ids()[0];
        world.convert_to_acid(id);
        world.select(id);

        // Shrink to just above threshold, then let one decay step cross it
        world.apply_shrink(id, 5.05);
        engine.tick_decay(&mut world, 0.1);

        assert!(!world.contains(id));
        assert!(!world.is_selected(id));
    }

    #[test]
    fn test_corrosion_single_contact() {
        // One acid contact costs the target 10% of its size
        let mut world = world_with(2);
        let engine = AcidEngine::new(&Config::default());
        let ids = world.all_ids();
        world.convert_to_acid(ids[0]);
        let target_size = world.particle(ids[1]).unwrap().size;

        let contact = contact_between(&world, ids[0], ids[1]);
        engine.process_contacts(&mut world, &[contact]);

        let after = world.particle(ids[1]).unwrap().size;
        assert!((after - target_size * 0.9).abs() < 1e-5);
        assert!(world
            .events
            .drain()
            .iter()
            .any(|e| matches!(e, SimEvent::Corroded { id, .. } if *id == ids[1])));
    }

    #[test]
    fn test_corrosion_below_threshold_removes_from_all_collections() {
        let mut world = world_with(2);
        let engine = AcidEngine::new(&Config::default());
        let ids = world.all_ids();
        world.convert_to_acid(ids[0]);
        world.select(ids[1]);

        // Sized so one 10% bite lands below the 5.0 minimum
        world.particle_mut(ids[1]).unwrap().size = 5.5;

        let contact = contact_between(&world, ids[0], ids[1]);
        engine.process_contacts(&mut world, &[contact]);

        assert!(!world.contains(ids[1]));
        assert!(!world.is_selected(ids[1]));
        assert!(world.locked_ids().is_empty());
    }

    #[test]
    fn test_locked_targets_are_immune() {
        let mut world = world_with(2);
        let engine = AcidEngine::new(&Config::default());
        let ids = world.all_ids();
        world.convert_to_acid(ids[0]);
        world.set_locked(ids[1], true);
        let size = world.particle(ids[1]).unwrap().size;

        let contact = contact_between(&world, ids[0], ids[1]);
        engine.process_contacts(&mut world, &[contact]);

        assert_eq!(world.particle(ids[1]).unwrap().size, size);
        assert!(world.events.is_empty());
    }

    #[test]
    fn test_acid_does_not_corrode_acid() {
        let mut world = world_with(2);
        let engine = AcidEngine::new(&Config::default());
        let ids = world.all_ids();
        world.convert_to_acid(ids[0]);
        world.convert_to_acid(ids[1]);
        let sizes: Vec<f32> = ids.iter().map(|id| world.particle(*id).unwrap().size).collect();

        let contact = contact_between(&world, ids[0], ids[1]);
        engine.process_contacts(&mut world, &[contact]);

        assert_eq!(world.particle(ids[0]).unwrap().size, sizes[0]);
        assert_eq!(world.particle(ids[1]).unwrap().size, sizes[1]);
    }

    #[test]
    fn test_two_acid_contacts_compound_on_one_target() {
        let mut world = world_with(3);
        let engine = AcidEngine::new(&Config::default());
        let ids = world.all_ids();
        world.convert_to_acid(ids[0]);
        world.convert_to_acid(ids[1]);
        let size = world.particle(ids[2]).unwrap().size;

        let contacts = vec![
            contact_between(&world, ids[0], ids[2]),
            contact_between(&world, ids[1], ids[2]),
        ];
        engine.process_contacts(&mut world, &contacts);

        let after = world.particle(ids[2]).unwrap().size;
        assert!((after - size * 0.9 * 0.9).abs() < 1e-4);
    }

    #[test]
    fn test_contact_with_removed_particle_is_ignored() {
        let mut world = world_with(2);
        let engine = AcidEngine::new(&Config::default());
        let ids = world.all_ids();
        world.convert_to_acid(ids[0]);

        let contact = contact_between(&world, ids[0], ids[1]);
        world.remove(ids[1]);
        engine.process_contacts(&mut world, &[contact]);

        assert!(world.contains(ids[0]));
        assert!(world.events.is_empty());
    }
}
