//! Simulation event feed consumed by sound and UI layers

use fizz_core::{ParticleId, Shape};

/// Something that happened this frame and may deserve a reaction
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    // Particle physics
    Spawned { count: u32 },
    Split { fragments: u32 },
    AcidConverted { id: ParticleId },
    /// A target lost size to an acid contact; `size` is its pre-shrink size
    Corroded { id: ParticleId, size: f32 },
    Collision { impact_speed: f32, avg_size: f32 },
    WallBounce { impact_speed: f32, size: f32 },

    // Selection / gestures
    Selected { id: ParticleId },
    Deselected { id: ParticleId },
    MarqueeSelected { count: usize },
    Hovered { id: ParticleId },
    LongPress { count: usize },
    TwoFingerRemoval { count: usize },
    ThreeFingerRemoval { count: usize },
    SelectionDeleted { count: usize },

    // UI buttons
    ColorModeToggled { random: bool },
    ShapeSelected { shape: Shape },
    Cut { count: usize },
    Locked { count: usize },
    Unlocked { count: usize },
    Cleared { count: usize },
    HelpToggled { open: bool },
}

/// A simple event queue that systems push to and consumers drain
#[derive(Default)]
pub struct SimEvents {
    events: Vec<SimEvent>,
}

impl SimEvents {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event onto the queue
    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    /// Drain all events, returning them in push order
    pub fn drain(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
