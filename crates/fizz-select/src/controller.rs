//! The interaction state machine

use fizz_core::{Color, ParticleId, Shape, SimRng, Vec2};
use fizz_physics::Physics;
use fizz_sim::{SimEvent, World};

/// Session-level interaction mode. Modes are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    Idle,
    /// Rectangular drag-to-select; both corners tracked continuously
    Marquee { start: Vec2, end: Vec2 },
    /// Long-press proximity selection following the touch point
    DragSelect { last: Vec2 },
}

/// What a click on empty space spawns
#[derive(Debug, Clone, Copy)]
pub struct SpawnParams {
    pub count: u32,
    pub color: Color,
    pub shape: Shape,
}

/// A long-press candidate being timed against the hold threshold
#[derive(Debug, Clone, Copy)]
struct PendingLongPress {
    origin: Vec2,
    started_at: f64,
}

/// Pointer/gesture selection orchestrator.
///
/// The acid/split latches mirror held modifier keys; while active they
/// redirect particle clicks from select-toggle to conversion or split.
pub struct SelectionController {
    mode: Mode,
    pending_long_press: Option<PendingLongPress>,
    last_hovered: Option<ParticleId>,
    rng: SimRng,

    pub acid_latch: bool,
    pub split_latch: bool,
    pub marquee_latch: bool,
}

impl SelectionController {
    pub fn new(seed: u32) -> Self {
        Self {
            mode: Mode::Idle,
            pending_long_press: None,
            last_hovered: None,
            rng: SimRng::new(seed),
            acid_latch: false,
            split_latch: false,
            marquee_latch: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current marquee rectangle, normalized to (min, max) corners
    pub fn marquee_rect(&self) -> Option<(Vec2, Vec2)> {
        let Mode::Marquee { start, end } = self.mode else {
            return None;
        };
        Some((
            Vec2::new(start.x.min(end.x), start.y.min(end.y)),
            Vec2::new(start.x.max(end.x), start.y.max(end.y)),
        ))
    }

    // --- Pointer input ---

    /// Mouse press / single tap at a point
    pub fn pointer_pressed<P: Physics>(
        &mut self,
        world: &mut World<P>,
        point: Vec2,
        spawn: SpawnParams,
    ) {
        if self.marquee_latch {
            self.mode = Mode::Marquee {
                start: point,
                end: point,
            };
            return;
        }

        if world.is_empty() {
            world.spawn_batch(point, spawn.count, spawn.color, spawn.shape);
            return;
        }

        match world.particle_at(point) {
            Some(id) => self.click_particle(world, id),
            // Clicks that miss every particle spawn a fresh batch
            None => world.spawn_batch(point, spawn.count, spawn.color, spawn.shape),
        }
    }

    fn click_particle<P: Physics>(&mut self, world: &mut World<P>, id: ParticleId) {
        if self.acid_latch {
            if world.convert_to_acid(id) {
                world.events.push(SimEvent::AcidConverted { id });
            }
        } else if self.split_latch {
            world.split(id);
        } else if world.is_selected(id) {
            world.deselect(id);
            world.set_hovered(id, false);
            world.events.push(SimEvent::Deselected { id });
        } else {
            world.select(id);
            world.events.push(SimEvent::Selected { id });
        }
    }

    /// Mouse movement without a held button: hover tracking, or marquee
    /// corner tracking while a marquee is active
    pub fn pointer_moved<P: Physics>(&mut self, world: &mut World<P>, point: Vec2) {
        if let Mode::Marquee { start, .. } = self.mode {
            self.mode = Mode::Marquee { start, end: point };
            self.recompute_marquee(world);
            return;
        }

        world.clear_hovered();
        let hit = world.particle_at(point);
        if let Some(id) = hit {
            world.set_hovered(id, true);
            if self.last_hovered != Some(id) {
                world.events.push(SimEvent::Hovered { id });
            }
        }
        self.last_hovered = hit;
    }

    /// Mouse drag with the button held (marquee updates)
    pub fn pointer_dragged<P: Physics>(&mut self, world: &mut World<P>, point: Vec2) {
        if let Mode::Marquee { start, .. } = self.mode {
            self.mode = Mode::Marquee { start, end: point };
            self.recompute_marquee(world);
        }
    }

    /// Mouse release finalizes an active marquee
    pub fn pointer_released<P: Physics>(&mut self, world: &mut World<P>) {
        self.finalize_marquee(world);
    }

    /// The marquee modifier was released mid-drag
    pub fn marquee_latch_released<P: Physics>(&mut self, world: &mut World<P>) {
        self.marquee_latch = false;
        self.finalize_marquee(world);
    }

    fn finalize_marquee<P: Physics>(&mut self, world: &mut World<P>) {
        if let Mode::Marquee { .. } = self.mode {
            self.mode = Mode::Idle;
            world.events.push(SimEvent::MarqueeSelected {
                count: world.selected_count(),
            });
        }
    }

    /// Re-test every particle center against the current marquee box,
    /// adding newly contained particles and dropping newly excluded ones.
    /// Near-degenerate boxes are ignored (coordinates still track).
    fn recompute_marquee<P: Physics>(&mut self, world: &mut World<P>) {
        let Some((min, max)) = self.marquee_rect() else {
            return;
        };
        let min_extent = world.config().marquee_min_extent;
        if (max.x - min.x) < min_extent || (max.y - min.y) < min_extent {
            return;
        }

        for id in world.all_ids() {
            let Some(pos) = world.position(id) else {
                continue;
            };
            let inside =
                pos.x >= min.x && pos.x <= max.x && pos.y >= min.y && pos.y <= max.y;
            if inside {
                world.select(id);
            } else {
                world.deselect(id);
            }
        }
    }

    // --- Touch input ---

    /// Single-touch start: arms the long-press timer, then applies the
    /// same tap semantics as a click (minus modifier latches)
    pub fn touch_began<P: Physics>(
        &mut self,
        world: &mut World<P>,
        point: Vec2,
        now: f64,
        spawn: SpawnParams,
    ) {
        self.pending_long_press = Some(PendingLongPress {
            origin: point,
            started_at: now,
        });
        self.mode = Mode::Idle;

        if world.is_empty() {
            world.spawn_batch(point, spawn.count, spawn.color, spawn.shape);
            return;
        }

        match world.particle_at(point) {
            Some(id) => {
                if world.is_selected(id) {
                    world.deselect(id);
                    world.set_hovered(id, false);
                    world.events.push(SimEvent::Deselected { id });
                } else {
                    world.select(id);
                    world.events.push(SimEvent::Selected { id });
                }
            }
            None => world.spawn_batch(point, spawn.count, spawn.color, spawn.shape),
        }
    }

    /// Per-frame poll: fires the long press once the hold threshold is
    /// reached with the touch still inside the jitter tolerance
    pub fn update<P: Physics>(&mut self, world: &mut World<P>, now: f64, touch: Option<Vec2>) {
        let Some(pending) = self.pending_long_press else {
            return;
        };
        let Some(touch) = touch else {
            return;
        };

        if now - pending.started_at < world.config().long_press_duration as f64 {
            return;
        }
        self.pending_long_press = None;

        if touch.distance(pending.origin) >= world.config().long_press_jitter {
            return;
        }

        // Entering drag-select: sweep up everything near the press point
        let radius = world.base_size() * world.config().long_press_radius_multiplier;
        let mut count = 0;
        for id in world.ids_within(pending.origin, radius) {
            if world.select(id) {
                count += 1;
            }
        }
        world.events.push(SimEvent::LongPress { count });
        self.mode = Mode::DragSelect { last: touch };
    }

    /// Single-touch movement while drag-select is active
    pub fn touch_moved<P: Physics>(&mut self, world: &mut World<P>, point: Vec2) {
        let Mode::DragSelect { last } = self.mode else {
            return;
        };
        if point.distance(last) <= world.config().drag_select_move_threshold {
            return;
        }

        let radius = world.base_size() * world.config().drag_select_radius_multiplier;
        for id in world.ids_within(point, radius) {
            if world.select(id) {
                world.set_pulse(id);
            }
        }
        self.mode = Mode::DragSelect { last: point };
    }

    /// Touch lift: cancels a pending long press and exits drag-select
    pub fn touch_ended(&mut self) {
        self.pending_long_press = None;
        if let Mode::DragSelect { .. } = self.mode {
            self.mode = Mode::Idle;
        }
    }

    // --- Gestures and commands ---

    /// Two-finger tap: remove a random cluster of unlocked particles.
    /// Locked particles are never the center pick and never removed.
    pub fn two_finger_tap<P: Physics>(&mut self, world: &mut World<P>) {
        self.pending_long_press = None;

        let unlocked = world.unlocked_ids();
        if unlocked.is_empty() {
            return;
        }

        let center_id = unlocked[self.rng.index(unlocked.len())];
        let Some(center) = world.position(center_id) else {
            return;
        };
        let (width, height) = world.screen();
        let radius = world.config().removal_radius(width, height);

        let mut count = 0;
        for id in world.ids_within(center, radius) {
            if world.is_locked(id) {
                continue;
            }
            if world.remove(id) {
                count += 1;
            }
        }
        world.events.push(SimEvent::TwoFingerRemoval { count });
    }

    /// Three-finger tap: remove every unlocked particle
    pub fn three_finger_tap<P: Physics>(&mut self, world: &mut World<P>) {
        self.pending_long_press = None;
        let count = world.remove_all_unlocked();
        world.events.push(SimEvent::ThreeFingerRemoval { count });
    }

    /// Backspace: delete the selection (lock does not protect here), or
    /// fall back to removing every unlocked particle when nothing is
    /// selected
    pub fn backspace<P: Physics>(&mut self, world: &mut World<P>) {
        let selected = world.selected_ids();
        if selected.is_empty() {
            let count = world.remove_all_unlocked();
            world.events.push(SimEvent::ThreeFingerRemoval { count });
            return;
        }

        let count = selected.len();
        for id in selected {
            world.remove(id);
        }
        world.clear_selection();
        world.events.push(SimEvent::SelectionDeleted { count });
    }

    /// Escape: drop all hover/selection state and cancel any marquee
    pub fn escape<P: Physics>(&mut self, world: &mut World<P>) {
        world.clear_hover_and_selection();
        if let Mode::Marquee { .. } = self.mode {
            self.mode = Mode::Idle;
        }
    }

    /// Toggle the lock state of every selected particle, then always
    /// clear the selection
    pub fn lock_toggle<P: Physics>(&mut self, world: &mut World<P>) {
        let mut locked = 0;
        let mut unlocked = 0;
        for id in world.selected_ids() {
            let lock = !world.is_locked(id);
            if world.set_locked(id, lock) {
                if lock {
                    locked += 1;
                } else {
                    unlocked += 1;
                }
            }
        }
        world.clear_hover_and_selection();

        if locked > 0 {
            world.events.push(SimEvent::Locked { count: locked });
        }
        if unlocked > 0 {
            world.events.push(SimEvent::Unlocked { count: unlocked });
        }
    }

    /// Cut: remove every selected particle regardless of lock state
    pub fn cut<P: Physics>(&mut self, world: &mut World<P>) {
        let selected = world.selected_ids();
        if selected.is_empty() {
            return;
        }

        let count = selected.len();
        for id in selected {
            world.remove(id);
        }
        world.clear_selection();
        world.events.push(SimEvent::Cut { count });
    }

    /// Clear the whole canvas, locked particles included
    pub fn clear_all<P: Physics>(&mut self, world: &mut World<P>) {
        let count = world.clear_all();
        world.events.push(SimEvent::Cleared { count });
    }
}
