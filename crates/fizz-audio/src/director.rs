//! Maps simulation events to sound-pack calls
//!
//! Same pattern as an event-to-trigger table: the director owns no audio
//! state of its own, it only translates the frame's `SimEvent`s into the
//! matching contract calls, attaching the density load collisions need.

use crate::manager::SoundPackManager;
use fizz_sim::SimEvent;

/// Stateless event-to-sound translation
pub struct SoundDirector {
    max_particles: usize,
}

impl SoundDirector {
    pub fn new(max_particles: usize) -> Self {
        Self {
            max_particles: max_particles.max(1),
        }
    }

    /// Dispatch one frame's events to the active pack
    pub fn process_events(
        &self,
        events: &[SimEvent],
        particle_count: usize,
        sounds: &mut SoundPackManager,
    ) {
        let load = particle_count as f32 / self.max_particles as f32;

        for event in events {
            match event {
                SimEvent::Spawned { count } => sounds.particle_create(*count),
                SimEvent::Split { fragments } => sounds.particle_split(*fragments),
                SimEvent::AcidConverted { .. } => sounds.acid_convert(),
                SimEvent::Corroded { size, .. } => sounds.acid_corrosion(*size),
                SimEvent::Collision {
                    impact_speed,
                    avg_size,
                } => sounds.collision(*impact_speed, *avg_size, load),
                SimEvent::WallBounce { impact_speed, size } => {
                    sounds.wall_bounce(*impact_speed, *size)
                }

                SimEvent::Selected { .. } => sounds.select(),
                SimEvent::Deselected { .. } => sounds.deselect(),
                SimEvent::MarqueeSelected { count } => sounds.marquee_select(*count),
                SimEvent::Hovered { .. } => sounds.hover(),
                SimEvent::LongPress { count } => sounds.long_press(*count),
                SimEvent::TwoFingerRemoval { count } => sounds.two_finger_removal(*count),
                SimEvent::ThreeFingerRemoval { count } => sounds.three_finger_removal(*count),
                SimEvent::SelectionDeleted { count } => sounds.delete_selection(*count),

                SimEvent::ColorModeToggled { random } => sounds.color_toggle(*random),
                SimEvent::ShapeSelected { shape } => sounds.shape_select(*shape),
                SimEvent::Cut { count } => sounds.cut(*count),
                SimEvent::Locked { count } => sounds.lock(*count),
                SimEvent::Unlocked { count } => sounds.unlock(*count),
                SimEvent::Cleared { count } => sounds.clear(*count),
                SimEvent::HelpToggled { open } => sounds.help_toggle(*open),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::{PackState, SoundPack};
    use crate::synth::ToneSynthesizer;
    use fizz_core::{ParticleId, Shape};
    use fizz_runtime::PrefStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records which contract methods were called, in order
    struct RecordingPack {
        state: PackState,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl RecordingPack {
        fn log(&self, entry: impl Into<String>) {
            self.log.borrow_mut().push(entry.into());
        }
    }

    impl SoundPack for RecordingPack {
        fn id(&self) -> &'static str {
            "recording"
        }
        fn state(&self) -> &PackState {
            &self.state
        }
        fn state_mut(&mut self) -> &mut PackState {
            &mut self.state
        }

        fn particle_create(&mut self, _: &mut ToneSynthesizer, count: u32) {
            self.log(format!("create:{count}"));
        }
        fn collision(&mut self, _: &mut ToneSynthesizer, _: f32, _: f32, load: f32) {
            self.log(format!("collision:{load:.2}"));
        }
        fn wall_bounce(&mut self, _: &mut ToneSynthesizer, _: f32, _: f32) {
            self.log("wall_bounce");
        }
        fn acid_convert(&mut self, _: &mut ToneSynthesizer) {
            self.log("acid_convert");
        }
        fn acid_corrosion(&mut self, _: &mut ToneSynthesizer, _: f32) {
            self.log("acid_corrosion");
        }
        fn particle_split(&mut self, _: &mut ToneSynthesizer, fragments: u32) {
            self.log(format!("split:{fragments}"));
        }
        fn color_toggle(&mut self, _: &mut ToneSynthesizer, _: bool) {
            self.log("color_toggle");
        }
        fn shape_select(&mut self, _: &mut ToneSynthesizer, _: Shape) {
            self.log("shape_select");
        }
        fn cut(&mut self, _: &mut ToneSynthesizer, count: usize) {
            self.log(format!("cut:{count}"));
        }
        fn lock(&mut self, _: &mut ToneSynthesizer, count: usize) {
            self.log(format!("lock:{count}"));
        }
        fn unlock(&mut self, _: &mut ToneSynthesizer, count: usize) {
            self.log(format!("unlock:{count}"));
        }
        fn clear(&mut self, _: &mut ToneSynthesizer, count: usize) {
            self.log(format!("clear:{count}"));
        }
        fn help_toggle(&mut self, _: &mut ToneSynthesizer, _: bool) {
            self.log("help_toggle");
        }
        fn select(&mut self, _: &mut ToneSynthesizer) {
            self.log("select");
        }
        fn deselect(&mut self, _: &mut ToneSynthesizer) {
            self.log("deselect");
        }
        fn marquee_select(&mut self, _: &mut ToneSynthesizer, count: usize) {
            self.log(format!("marquee:{count}"));
        }
        fn hover(&mut self, _: &mut ToneSynthesizer) {
            self.log("hover");
        }
        fn long_press(&mut self, _: &mut ToneSynthesizer, count: usize) {
            self.log(format!("long_press:{count}"));
        }
        fn two_finger_removal(&mut self, _: &mut ToneSynthesizer, count: usize) {
            self.log(format!("two_finger:{count}"));
        }
        fn three_finger_removal(&mut self, _: &mut ToneSynthesizer, count: usize) {
            self.log(format!("three_finger:{count}"));
        }
        fn delete_selection(&mut self, _: &mut ToneSynthesizer, count: usize) {
            self.log(format!("delete:{count}"));
        }
    }

    fn recording_manager() -> (SoundPackManager, Rc<RefCell<Vec<String>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = SoundPackManager::new();
        let log_for_pack = log.clone();
        manager.register("recording", move || {
            Box::new(RecordingPack {
                state: PackState::new(),
                log: log_for_pack.clone(),
            })
        });
        let mut store = PrefStore::in_memory();
        manager.switch_pack("recording", &mut store);
        (manager, log)
    }

    #[test]
    fn test_event_mapping() {
        let (mut manager, log) = recording_manager();
        let director = SoundDirector::new(1000);

        let events = vec![
            SimEvent::Spawned { count: 37 },
            SimEvent::Split { fragments: 5 },
            SimEvent::AcidConverted {
                id: ParticleId::from_raw(1),
            },
            SimEvent::Selected {
                id: ParticleId::from_raw(2),
            },
            SimEvent::Cut { count: 3 },
            SimEvent::Locked { count: 2 },
            SimEvent::Unlocked { count: 1 },
            SimEvent::HelpToggled { open: true },
        ];
        director.process_events(&events, 100, &mut manager);

        assert_eq!(
            *log.borrow(),
            vec![
                "create:37",
                "split:5",
                "acid_convert",
                "select",
                "cut:3",
                "lock:2",
                "unlock:1",
                "help_toggle",
            ]
        );
    }

    #[test]
    fn test_collision_load_from_particle_count() {
        let (mut manager, log) = recording_manager();
        let director = SoundDirector::new(1000);

        let events = vec![SimEvent::Collision {
            impact_speed: 4.0,
            avg_size: 30.0,
        }];
        director.process_events(&events, 500, &mut manager);

        assert_eq!(*log.borrow(), vec!["collision:0.50"]);
    }

    #[test]
    fn test_empty_events_play_nothing() {
        let (mut manager, log) = recording_manager();
        let director = SoundDirector::new(1000);
        director.process_events(&[], 0, &mut manager);
        assert!(log.borrow().is_empty());
    }
}
