//! The per-frame orchestrator

use crate::palette::Palette;
use fizz_audio::{SoundDirector, SoundPackManager};
use fizz_core::{Color, Config, Shape, Vec2};
use fizz_physics::{Contact, Physics};
use fizz_select::{SelectionController, SpawnParams};
use fizz_sim::{AcidEngine, SimEvent, World};
use fizz_runtime::{FrameClock, InputState, PrefStore};

/// Everything the toolbar/HUD needs to draw itself
#[derive(Debug, Clone, PartialEq)]
pub struct UiSnapshot {
    pub particle_count: usize,
    pub selection_count: usize,
    /// Cut and lock buttons enable only with a selection
    pub can_cut: bool,
    pub can_lock: bool,
    /// Clear enables only with particles present
    pub can_clear: bool,
    pub shape_label: &'static str,
    pub color_swatch: Color,
    pub is_random_color: bool,
    pub muted: bool,
    pub volume: f64,
    pub spawn_count: u32,
    pub help_open: bool,
}

/// Owns the full playground stack and runs the canonical frame order:
/// physics step → contact ingestion → acid effects → decay → input
/// handlers → sound dispatch.
pub struct Session<P: Physics> {
    world: World<P>,
    acid: AcidEngine,
    controller: SelectionController,
    sounds: SoundPackManager,
    director: SoundDirector,
    clock: FrameClock,
    input: InputState,
    prefs: PrefStore,
    palette: Palette,

    spawn_count: u32,
    shape: Shape,
    help_open: bool,
    /// Current single-touch position, None when no finger is down
    touch_position: Option<Vec2>,
}

impl<P: Physics> Session<P> {
    pub fn new(config: Config, physics: P, seed: u32, width: f32, height: f32, prefs: PrefStore) -> Self {
        let spawn_count = config.default_spawn_count;
        let max_particles = config.max_particles;
        let world = World::new(config, physics, seed, width, height);

        Self {
            acid: AcidEngine::new(world.config()),
            controller: SelectionController::new(seed.wrapping_add(1)),
            sounds: SoundPackManager::from_prefs(&prefs),
            director: SoundDirector::new(max_particles),
            clock: FrameClock::new(),
            input: InputState::new(),
            prefs,
            palette: Palette::new(seed.wrapping_add(2)),
            world,
            spawn_count,
            shape: Shape::Circle,
            help_open: false,
            touch_position: None,
        }
    }

    // --- Frame loop ---

    /// Run one frame against the wall clock
    pub fn tick(&mut self) {
        self.clock.tick();
        self.run_frame();
    }

    /// Run one frame with an explicit delta (headless/test driving)
    pub fn tick_with(&mut self, dt: f64) {
        self.clock.advance(dt);
        self.run_frame();
    }

    fn run_frame(&mut self) {
        // Physics integrates on the fixed timestep; contacts accumulate
        // across however many steps this frame consumed
        let mut contacts = Vec::new();
        while self.clock.should_fixed_update() {
            self.clock.consume_fixed_step();
            contacts.extend(self.world.step_physics(self.clock.fixed_timestep as f32));
        }

        self.ingest_contacts(&contacts);
        self.acid.process_contacts(&mut self.world, &contacts);
        self.acid.tick_decay(&mut self.world, self.clock.delta_time as f32);
        self.world.decay_pulses();

        // Input handlers run after physics/acid within the frame
        self.apply_key_commands();
        self.controller
            .update(&mut self.world, self.clock.total_time, self.touch_position);

        let events = self.world.events.drain();
        self.director
            .process_events(&events, self.world.len(), &mut self.sounds);

        self.input.end_frame();
    }

    /// Translate contacts into collision/wall-bounce events
    fn ingest_contacts(&mut self, contacts: &[Contact]) {
        for contact in contacts {
            if contact.involves_boundary() {
                let particle_side = if contact.a.label == fizz_physics::BodyLabel::Particle {
                    &contact.a
                } else {
                    &contact.b
                };
                let Some(id) = self.world.particle_by_body(particle_side.handle) else {
                    continue;
                };
                let Some(size) = self.world.particle(id).map(|p| p.size) else {
                    continue;
                };
                self.world.events.push(SimEvent::WallBounce {
                    impact_speed: contact.impact_speed(),
                    size,
                });
            } else if let Some(avg_size) = self.world.contact_avg_size(contact) {
                self.world.events.push(SimEvent::Collision {
                    impact_speed: contact.impact_speed(),
                    avg_size,
                });
            }
        }
    }

    /// Latches mirror held keys; command keys fire on press
    fn apply_key_commands(&mut self) {
        self.controller.acid_latch = self.input.is_action_pressed("acid");
        self.controller.split_latch = self.input.is_action_pressed("split");

        if self.input.is_action_just_released("marquee") {
            self.controller.marquee_latch_released(&mut self.world);
        } else {
            self.controller.marquee_latch = self.input.is_action_pressed("marquee");
        }

        if self.input.is_action_just_pressed("lock") && self.world.selected_count() > 0 {
            self.controller.lock_toggle(&mut self.world);
        }
        if self.input.is_action_just_pressed("delete") {
            self.controller.backspace(&mut self.world);
        }
        if self.input.is_action_just_pressed("deselect") {
            self.controller.escape(&mut self.world);
        }
        if self.input.is_action_just_pressed("recolor") {
            self.recolor_selected();
        }
        if self.input.is_action_just_pressed("help") {
            self.toggle_help();
        }

        let wheel = self.input.wheel_delta();
        if wheel != 0.0 {
            let step = self.world.config().spawn_count_step as i64;
            self.adjust_spawn_count(wheel.signum() as i64 * step);
        }
    }

    // --- Pointer / touch entry points (called by the host) ---

    pub fn pointer_pressed(&mut self, point: Vec2) {
        let spawn = self.spawn_params();
        self.controller.pointer_pressed(&mut self.world, point, spawn);
    }

    pub fn pointer_moved(&mut self, point: Vec2) {
        self.input.process_mouse_move(point.x as f64, point.y as f64);
        self.controller.pointer_moved(&mut self.world, point);
    }

    pub fn pointer_dragged(&mut self, point: Vec2) {
        self.controller.pointer_dragged(&mut self.world, point);
    }

    pub fn pointer_released(&mut self) {
        self.controller.pointer_released(&mut self.world);
    }

    pub fn touch_began(&mut self, point: Vec2) {
        self.touch_position = Some(point);
        let spawn = self.spawn_params();
        let now = self.clock.total_time;
        self.controller.touch_began(&mut self.world, point, now, spawn);
    }

    pub fn touch_moved(&mut self, point: Vec2) {
        self.touch_position = Some(point);
        self.controller.touch_moved(&mut self.world, point);
    }

    pub fn touch_ended(&mut self) {
        self.touch_position = None;
        self.controller.touch_ended();
    }

    pub fn two_finger_tap(&mut self) {
        self.touch_position = None;
        self.controller.two_finger_tap(&mut self.world);
    }

    pub fn three_finger_tap(&mut self) {
        self.touch_position = None;
        self.controller.three_finger_tap(&mut self.world);
    }

    // --- Toolbar commands ---

    pub fn cut_selected(&mut self) {
        self.controller.cut(&mut self.world);
    }

    pub fn lock_selected(&mut self) {
        self.controller.lock_toggle(&mut self.world);
    }

    pub fn clear_canvas(&mut self) {
        self.controller.clear_all(&mut self.world);
    }

    pub fn toggle_color_mode(&mut self) {
        let random = self.palette.toggle_mode();
        self.world.events.push(SimEvent::ColorModeToggled { random });
    }

    pub fn pick_color(&mut self, color: Color) {
        self.palette.set_picked(color);
        self.world
            .events
            .push(SimEvent::ColorModeToggled { random: false });
    }

    pub fn cycle_shape(&mut self) {
        self.shape = self.shape.next();
        self.world
            .events
            .push(SimEvent::ShapeSelected { shape: self.shape });
    }

    pub fn toggle_help(&mut self) {
        self.help_open = !self.help_open;
        self.world.events.push(SimEvent::HelpToggled {
            open: self.help_open,
        });
    }

    /// Reassign the current color mode's next color to the selection
    pub fn recolor_selected(&mut self) {
        for id in self.world.selected_ids() {
            let color = self.palette.next_color();
            self.world.recolor(id, color);
        }
    }

    /// Adjust the per-click spawn count (wheel/pinch), clamped
    pub fn adjust_spawn_count(&mut self, delta: i64) {
        self.spawn_count = self
            .world
            .config()
            .clamp_spawn_count(self.spawn_count as i64 + delta);
    }

    pub fn resize_viewport(&mut self, width: f32, height: f32) {
        self.world.resize_viewport(width, height);
    }

    // --- Audio settings ---

    pub fn set_volume(&mut self, volume: f64) {
        self.sounds.set_volume(volume, &mut self.prefs);
        self.save_prefs();
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.sounds.set_muted(muted, &mut self.prefs);
        self.save_prefs();
    }

    pub fn switch_sound_pack(&mut self, id: &str) {
        self.sounds.switch_pack(id, &mut self.prefs);
        self.save_prefs();
    }

    fn save_prefs(&self) {
        if let Err(e) = self.prefs.save() {
            eprintln!("Prefs: {e}");
        }
    }

    // --- Surfaces ---

    pub fn ui_snapshot(&self) -> UiSnapshot {
        let selection = self.world.selected_count();
        UiSnapshot {
            particle_count: self.world.len(),
            selection_count: selection,
            can_cut: selection > 0,
            can_lock: selection > 0,
            can_clear: !self.world.is_empty(),
            shape_label: self.shape.label(),
            color_swatch: self.palette.picked(),
            is_random_color: self.palette.is_random(),
            muted: self.sounds.muted(),
            volume: self.sounds.volume(),
            spawn_count: self.spawn_count,
            help_open: self.help_open,
        }
    }

    fn spawn_params(&mut self) -> SpawnParams {
        SpawnParams {
            count: self.spawn_count,
            color: self.palette.next_color(),
            shape: self.shape,
        }
    }

    pub fn world(&self) -> &World<P> {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World<P> {
        &mut self.world
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn sounds(&self) -> &SoundPackManager {
        &self.sounds
    }

    pub fn prefs(&self) -> &PrefStore {
        &self.prefs
    }

    pub fn spawn_count(&self) -> u32 {
        self.spawn_count
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fizz_physics::FakePhysics;
    use winit::keyboard::KeyCode;

    fn test_session() -> Session<FakePhysics> {
        Session::new(
            Config::default(),
            FakePhysics::new(0.5),
            42,
            1000.0,
            800.0,
            PrefStore::in_memory(),
        )
    }

    #[test]
    fn test_click_spawns_default_count() {
        let mut session = test_session();
        session.pointer_pressed(Vec2::new(500.0, 400.0));
        assert_eq!(session.world().len(), 37);
    }

    #[test]
    fn test_particles_fall_under_gravity() {
        let mut session = test_session();
        session.pointer_pressed(Vec2::new(500.0, 100.0));
        let id = session.world().all_ids()[0];
        let y_before = session.world().position(id).unwrap().y;

        for _ in 0..30 {
            session.tick_with(1.0 / 60.0);
        }

        let y_after = session.world().position(id).unwrap().y;
        assert!(y_after > y_before);
    }

    #[test]
    fn test_acid_decay_through_frames() {
        let mut session = test_session();
        session.pointer_pressed(Vec2::new(500.0, 400.0));
        let id = session.world().all_ids()[0];
        session.world_mut().convert_to_acid(id);
        let size = session.world().particle(id).unwrap().size;

        // Six 60Hz frames accumulate past the 100ms decay interval once
        for _ in 0..6 {
            session.tick_with(1.0 / 60.0);
        }

        let after = session.world().particle(id).unwrap().size;
        assert!((after - size * 0.975).abs() < 1e-4);
    }

    #[test]
    fn test_injected_contact_corrodes_target() {
        let mut session = test_session();
        session.world_mut().spawn_batch(
            Vec2::new(500.0, 400.0),
            2,
            Color::default(),
            Shape::Circle,
        );
        let ids = session.world().all_ids();
        session.world_mut().convert_to_acid(ids[0]);
        let target_size = session.world().particle(ids[1]).unwrap().size;

        let acid_body = session.world().particle(ids[0]).unwrap().body;
        let target_body = session.world().particle(ids[1]).unwrap().body;
        session
            .world_mut()
            .physics_mut()
            .push_contact(acid_body, target_body);

        // One fixed step drains the injected contact
        session.tick_with(1.0 / 60.0);

        let after = session.world().particle(ids[1]).unwrap().size;
        assert!((after - target_size * 0.9).abs() < 1e-4);
    }

    #[test]
    fn test_wall_contact_does_not_corrode() {
        let mut session = test_session();
        session.world_mut().spawn_batch(
            Vec2::new(500.0, 400.0),
            1,
            Color::default(),
            Shape::Circle,
        );
        let id = session.world().all_ids()[0];
        session.world_mut().convert_to_acid(id);
        let size = session.world().particle(id).unwrap().size;

        let body = session.world().particle(id).unwrap().body;
        let boundary = session.world().physics().boundaries()[0];
        session.world_mut().physics_mut().push_contact(body, boundary);

        session.tick_with(1.0 / 60.0);

        // Small decay-free window: size untouched by the boundary contact
        assert_eq!(session.world().particle(id).unwrap().size, size);
    }

    #[test]
    fn test_keyboard_lock_flow() {
        let mut session = test_session();
        session.world_mut().spawn_batch(
            Vec2::new(500.0, 400.0),
            3,
            Color::default(),
            Shape::Circle,
        );
        let ids = session.world().all_ids();
        for id in &ids {
            session.world_mut().select(*id);
        }

        session.input_mut().process_key_down(KeyCode::KeyL);
        session.tick_with(1.0 / 60.0);

        for id in &ids {
            assert!(session.world().is_locked(*id));
        }
        assert_eq!(session.world().selected_count(), 0);
    }

    #[test]
    fn test_keyboard_latches_drive_controller() {
        let mut session = test_session();
        session.world_mut().spawn_batch(
            Vec2::new(500.0, 400.0),
            1,
            Color::default(),
            Shape::Circle,
        );
        let id = session.world().all_ids()[0];

        session.input_mut().process_key_down(KeyCode::KeyV);
        session.tick_with(1.0 / 60.0);
        session.pointer_pressed(Vec2::new(500.0, 400.0));

        assert!(session.world().particle(id).unwrap().is_acid());
    }

    #[test]
    fn test_escape_key_clears_selection() {
        let mut session = test_session();
        session.world_mut().spawn_batch(
            Vec2::new(500.0, 400.0),
            2,
            Color::default(),
            Shape::Circle,
        );
        for id in session.world().all_ids() {
            session.world_mut().select(id);
        }

        session.input_mut().process_key_down(KeyCode::Escape);
        session.tick_with(1.0 / 60.0);

        assert_eq!(session.world().selected_count(), 0);
    }

    #[test]
    fn test_wheel_adjusts_spawn_count() {
        let mut session = test_session();
        assert_eq!(session.spawn_count(), 37);

        session.input_mut().process_wheel(1.0);
        session.tick_with(1.0 / 60.0);
        assert_eq!(session.spawn_count(), 44);

        // Clamped at the maximum
        for _ in 0..20 {
            session.input_mut().process_wheel(1.0);
            session.tick_with(1.0 / 60.0);
        }
        assert_eq!(session.spawn_count(), 100);

        for _ in 0..30 {
            session.input_mut().process_wheel(-1.0);
            session.tick_with(1.0 / 60.0);
        }
        assert_eq!(session.spawn_count(), 10);
    }

    #[test]
    fn test_shape_cycles_and_labels() {
        let mut session = test_session();
        assert_eq!(session.ui_snapshot().shape_label, "Circle");
        session.cycle_shape();
        assert_eq!(session.ui_snapshot().shape_label, "Square");
        session.cycle_shape();
        assert_eq!(session.ui_snapshot().shape_label, "Triangle");

        session.pointer_pressed(Vec2::new(500.0, 400.0));
        assert!(session
            .world()
            .particles()
            .all(|p| p.shape == Shape::Triangle));
    }

    #[test]
    fn test_ui_snapshot_tracks_state() {
        let mut session = test_session();
        let snapshot = session.ui_snapshot();
        assert_eq!(snapshot.particle_count, 0);
        assert!(!snapshot.can_cut);
        assert!(!snapshot.can_clear);

        session.pointer_pressed(Vec2::new(500.0, 400.0));
        let id = session.world().all_ids()[0];
        session.world_mut().select(id);

        let snapshot = session.ui_snapshot();
        assert_eq!(snapshot.particle_count, 37);
        assert_eq!(snapshot.selection_count, 1);
        assert!(snapshot.can_cut);
        assert!(snapshot.can_lock);
        assert!(snapshot.can_clear);
    }

    #[test]
    fn test_volume_and_pack_persisted() {
        let mut session = test_session();
        session.set_volume(0.4);
        session.switch_sound_pack("retro8bit");
        session.set_muted(true);

        assert_eq!(session.prefs().get_f64("volume", 0.0), 0.4);
        assert_eq!(session.prefs().get_str("sound_pack", ""), "retro8bit");
        assert!(session.prefs().get_bool("mute", false));

        assert!((session.sounds().volume() - 0.4).abs() < 1e-9);
        assert!(session.sounds().muted());
    }

    #[test]
    fn test_recolor_selected_in_picked_mode() {
        let mut session = test_session();
        session.world_mut().spawn_batch(
            Vec2::new(500.0, 400.0),
            2,
            Color::default(),
            Shape::Circle,
        );
        let ids = session.world().all_ids();
        session.world_mut().select(ids[0]);
        session.pick_color(Color::new(9, 8, 7));

        session.recolor_selected();

        assert_eq!(
            session.world().particle(ids[0]).unwrap().color,
            Color::new(9, 8, 7)
        );
        assert_eq!(
            session.world().particle(ids[1]).unwrap().color,
            Color::default()
        );
    }

    #[test]
    fn test_resize_recreates_boundaries_and_base_size() {
        let mut session = test_session();
        let base_before = session.world().base_size();
        session.resize_viewport(500.0, 500.0);
        assert!((session.world().base_size() - 20.0).abs() < 1e-4);
        assert_ne!(session.world().base_size(), base_before);
        assert_eq!(session.world().physics().boundaries().len(), 3);
    }

    #[test]
    fn test_touch_long_press_through_session_clock() {
        let mut session = test_session();
        session.world_mut().spawn_batch(
            Vec2::new(500.0, 400.0),
            1,
            Color::default(),
            Shape::Circle,
        );
        let id = session.world().all_ids()[0];
        let point = Vec2::new(500.0, 400.0);

        session.touch_began(point);
        // Tap toggled the particle selected; drain that state
        assert!(session.world().is_selected(id));

        // Hold for ~0.6s of frames: long press fires, drag-select mode
        for _ in 0..40 {
            session.tick_with(1.0 / 60.0);
        }
        assert!(matches!(
            session_mode(&session),
            fizz_select::Mode::DragSelect { .. }
        ));

        session.touch_ended();
        assert!(matches!(session_mode(&session), fizz_select::Mode::Idle));
    }

    fn session_mode(session: &Session<FakePhysics>) -> fizz_select::Mode {
        session.controller.mode()
    }
}
