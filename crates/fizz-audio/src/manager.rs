//! Sound pack registry and hot-swap facade

use crate::pack::SoundPack;
use crate::packs::{OrchestralPack, OriginalPack, Retro8BitPack};
use crate::synth::ToneSynthesizer;
use fizz_core::Shape;
use fizz_runtime::PrefStore;

/// Fallback when a requested pack does not exist
pub const DEFAULT_PACK: &str = "original";

const PREF_PACK: &str = "sound_pack";
const PREF_VOLUME: &str = "volume";
const PREF_MUTE: &str = "mute";

const DEFAULT_VOLUME: f64 = 0.7;

type PackConstructor = Box<dyn Fn() -> Box<dyn SoundPack>>;

/// Owns the synthesizer, the registry of available packs, and the active
/// pack. Every contract call is delegated to the active pack and is a
/// no-op while none is active. Volume and mute are carried across pack
/// switches; pack id, volume, and mute are persisted.
pub struct SoundPackManager {
    synth: ToneSynthesizer,
    active: Option<Box<dyn SoundPack>>,
    registry: Vec<(&'static str, PackConstructor)>,
}

impl Default for SoundPackManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SoundPackManager {
    /// A manager with the three shipped packs registered and none active
    pub fn new() -> Self {
        let mut manager = Self {
            synth: ToneSynthesizer::new(),
            active: None,
            registry: Vec::new(),
        };
        manager.register(DEFAULT_PACK, || Box::new(OriginalPack::new()));
        manager.register("retro8bit", || Box::new(Retro8BitPack::new()));
        manager.register("orchestral", || Box::new(OrchestralPack::new()));
        manager
    }

    /// Restore the persisted pack, volume, and mute state
    pub fn from_prefs(store: &PrefStore) -> Self {
        let mut manager = Self::new();
        let pack_id = store.get_str(PREF_PACK, DEFAULT_PACK);

        let mut pack = manager.build(&pack_id).unwrap_or_else(|| {
            eprintln!("Audio: unknown sound pack '{pack_id}', using '{DEFAULT_PACK}'");
            manager
                .build(DEFAULT_PACK)
                .expect("default pack must be registered")
        });
        pack.set_volume(store.get_f64(PREF_VOLUME, DEFAULT_VOLUME));
        pack.set_muted(store.get_bool(PREF_MUTE, false));
        manager.active = Some(pack);
        manager
    }

    /// Register (or replace) a pack constructor under an identifier
    pub fn register(
        &mut self,
        id: &'static str,
        constructor: impl Fn() -> Box<dyn SoundPack> + 'static,
    ) {
        self.registry.retain(|(existing, _)| *existing != id);
        self.registry.push((id, Box::new(constructor)));
    }

    fn build(&self, id: &str) -> Option<Box<dyn SoundPack>> {
        self.registry
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(_, constructor)| constructor())
    }

    /// Swap in a different pack, carrying volume/mute forward and
    /// persisting the selection. Unknown ids fall back to the default
    /// pack with a warning instead of failing.
    pub fn switch_pack(&mut self, id: &str, store: &mut PrefStore) {
        let mut pack = match self.build(id) {
            Some(pack) => pack,
            None => {
                eprintln!("Audio: unknown sound pack '{id}', using '{DEFAULT_PACK}'");
                self.build(DEFAULT_PACK)
                    .expect("default pack must be registered")
            }
        };

        // Packs are stateless across swaps apart from volume/mute
        if let Some(outgoing) = &self.active {
            pack.set_volume(outgoing.volume());
            pack.set_muted(outgoing.muted());
        }

        store.set_str(PREF_PACK, pack.id());
        self.active = Some(pack);
    }

    pub fn active_pack_id(&self) -> Option<&'static str> {
        self.active.as_ref().map(|pack| pack.id())
    }

    pub fn available_packs(&self) -> Vec<&'static str> {
        self.registry.iter().map(|(id, _)| *id).collect()
    }

    // --- Shared accessors ---

    pub fn volume(&self) -> f64 {
        self.active
            .as_ref()
            .map(|pack| pack.volume())
            .unwrap_or(DEFAULT_VOLUME)
    }

    pub fn set_volume(&mut self, volume: f64, store: &mut PrefStore) {
        if let Some(pack) = &mut self.active {
            pack.set_volume(volume);
            store.set_f64(PREF_VOLUME, pack.volume());
        }
    }

    pub fn muted(&self) -> bool {
        self.active
            .as_ref()
            .map(|pack| pack.muted())
            .unwrap_or(false)
    }

    pub fn set_muted(&mut self, muted: bool, store: &mut PrefStore) {
        if let Some(pack) = &mut self.active {
            pack.set_muted(muted);
            store.set_bool(PREF_MUTE, muted);
        }
    }

    // --- Contract delegation (no-op while no pack is active) ---

    pub fn particle_create(&mut self, count: u32) {
        if let Some(pack) = &mut self.active {
            pack.particle_create(&mut self.synth, count);
        }
    }

    pub fn collision(&mut self, impact_speed: f32, avg_size: f32, load: f32) {
        if let Some(pack) = &mut self.active {
            pack.collision(&mut self.synth, impact_speed, avg_size, load);
        }
    }

    pub fn wall_bounce(&mut self, impact_speed: f32, size: f32) {
        if let Some(pack) = &mut self.active {
            pack.wall_bounce(&mut self.synth, impact_speed, size);
        }
    }

    pub fn acid_convert(&mut self) {
        if let Some(pack) = &mut self.active {
            pack.acid_convert(&mut self.synth);
        }
    }

    pub fn acid_corrosion(&mut self, target_size: f32) {
        if let Some(pack) = &mut self.active {
            pack.acid_corrosion(&mut self.synth, target_size);
        }
    }

    pub fn particle_split(&mut self, fragments: u32) {
        if let Some(pack) = &mut self.active {
            pack.particle_split(&mut self.synth, fragments);
        }
    }

    pub fn color_toggle(&mut self, random_mode: bool) {
        if let Some(pack) = &mut self.active {
            pack.color_toggle(&mut self.synth, random_mode);
        }
    }

    pub fn shape_select(&mut self, shape: Shape) {
        if let Some(pack) = &mut self.active {
            pack.shape_select(&mut self.synth, shape);
        }
    }

    pub fn cut(&mut self, count: usize) {
        if let Some(pack) = &mut self.active {
            pack.cut(&mut self.synth, count);
        }
    }

    pub fn lock(&mut self, count: usize) {
        if let Some(pack) = &mut self.active {
            pack.lock(&mut self.synth, count);
        }
    }

    pub fn unlock(&mut self, count: usize) {
        if let Some(pack) = &mut self.active {
            pack.unlock(&mut self.synth, count);
        }
    }

    pub fn clear(&mut self, count: usize) {
        if let Some(pack) = &mut self.active {
            pack.clear(&mut self.synth, count);
        }
    }

    pub fn help_toggle(&mut self, open: bool) {
        if let Some(pack) = &mut self.active {
            pack.help_toggle(&mut self.synth, open);
        }
    }

    pub fn select(&mut self) {
        if let Some(pack) = &mut self.active {
            pack.select(&mut self.synth);
        }
    }

    pub fn deselect(&mut self) {
        if let Some(pack) = &mut self.active {
            pack.deselect(&mut self.synth);
        }
    }

    pub fn marquee_select(&mut self, count: usize) {
        if let Some(pack) = &mut self.active {
            pack.marquee_select(&mut self.synth, count);
        }
    }

    pub fn hover(&mut self) {
        if let Some(pack) = &mut self.active {
            pack.hover(&mut self.synth);
        }
    }

    pub fn long_press(&mut self, count: usize) {
        if let Some(pack) = &mut self.active {
            pack.long_press(&mut self.synth, count);
        }
    }

    pub fn two_finger_removal(&mut self, count: usize) {
        if let Some(pack) = &mut self.active {
            pack.two_finger_removal(&mut self.synth, count);
        }
    }

    pub fn three_finger_removal(&mut self, count: usize) {
        if let Some(pack) = &mut self.active {
            pack.three_finger_removal(&mut self.synth, count);
        }
    }

    pub fn delete_selection(&mut self, count: usize) {
        if let Some(pack) = &mut self.active {
            pack.delete_selection(&mut self.synth, count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_carries_volume_and_mute() {
        // A mid-session switch keeps volume 0.4 and the unmuted state
        let mut store = PrefStore::in_memory();
        let mut manager = SoundPackManager::new();
        manager.switch_pack("original", &mut store);
        manager.set_volume(0.4, &mut store);
        manager.set_muted(false, &mut store);

        manager.switch_pack("retro8bit", &mut store);

        assert_eq!(manager.active_pack_id(), Some("retro8bit"));
        assert!((manager.volume() - 0.4).abs() < 1e-9);
        assert!(!manager.muted());
    }

    #[test]
    fn test_unknown_pack_falls_back_to_default() {
        let mut store = PrefStore::in_memory();
        let mut manager = SoundPackManager::new();
        manager.switch_pack("theremin", &mut store);

        assert_eq!(manager.active_pack_id(), Some(DEFAULT_PACK));
        assert_eq!(store.get_str("sound_pack", ""), DEFAULT_PACK);
    }

    #[test]
    fn test_no_active_pack_is_silent_noop() {
        let mut manager = SoundPackManager::new();
        assert_eq!(manager.active_pack_id(), None);

        // Every delegated call must be a no-op, not a panic
        manager.particle_create(37);
        manager.collision(5.0, 30.0, 0.1);
        manager.hover();
        manager.clear(10);
        assert!((manager.volume() - 0.7).abs() < 1e-9);
        assert!(!manager.muted());
    }

    #[test]
    fn test_switch_persists_selection() {
        let mut store = PrefStore::in_memory();
        let mut manager = SoundPackManager::new();
        manager.switch_pack("orchestral", &mut store);
        assert_eq!(store.get_str("sound_pack", ""), "orchestral");
    }

    #[test]
    fn test_from_prefs_restores_state() {
        let mut store = PrefStore::in_memory();
        store.set_str("sound_pack", "retro8bit");
        store.set_f64("volume", 0.25);
        store.set_bool("mute", true);

        let manager = SoundPackManager::from_prefs(&store);
        assert_eq!(manager.active_pack_id(), Some("retro8bit"));
        assert!((manager.volume() - 0.25).abs() < 1e-9);
        assert!(manager.muted());
    }

    #[test]
    fn test_from_prefs_with_unknown_pack() {
        let mut store = PrefStore::in_memory();
        store.set_str("sound_pack", "kazoo");

        let manager = SoundPackManager::from_prefs(&store);
        assert_eq!(manager.active_pack_id(), Some(DEFAULT_PACK));
    }

    #[test]
    fn test_available_packs() {
        let manager = SoundPackManager::new();
        let packs = manager.available_packs();
        assert!(packs.contains(&"original"));
        assert!(packs.contains(&"retro8bit"));
        assert!(packs.contains(&"orchestral"));
    }

    #[test]
    fn test_set_volume_clamps_and_persists() {
        let mut store = PrefStore::in_memory();
        let mut manager = SoundPackManager::new();
        manager.switch_pack("original", &mut store);

        manager.set_volume(1.7, &mut store);
        assert_eq!(manager.volume(), 1.0);
        assert_eq!(store.get_f64("volume", 0.0), 1.0);
    }
}
