//! Timed item spawning into the first free slot

use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{GameEvent, GameState, ItemInstance, Rules};
use super::rect::Rect;

/// Spawn an item if the interval has elapsed since the last attempt.
///
/// An elapsed interval always restarts the timer, even when every slot is
/// taken and nothing spawns. Returns the slot that received an item.
pub fn try_spawn(state: &mut GameState, now_ms: u64, events: &mut Vec<GameEvent>) -> Option<usize> {
    if now_ms.saturating_sub(state.last_spawn_ms) < state.rules.spawn_interval_ms {
        return None;
    }
    state.last_spawn_ms = now_ms;

    let spawned = spawn_item(state);
    match spawned {
        Some(slot) => {
            if let Some(item) = state.inventory.get(slot) {
                log::debug!("Spawned {} ({}) in slot {}", item.name, item.value, slot);
                events.push(GameEvent::Spawned {
                    slot,
                    name: item.name.clone(),
                    kind: item.kind,
                });
            }
        }
        None => log::debug!("Inventory full, spawn skipped"),
    }
    spawned
}

/// Place a freshly rolled item into the lowest free slot (ignores the timer)
pub fn spawn_item(state: &mut GameState) -> Option<usize> {
    let slot = state.inventory.first_free()?;
    let rect = state.rules.layout.slot(slot)?;
    let item = roll_item(&state.rules, &mut state.rng, rect);
    state.inventory.place(slot, item).ok()?;
    Some(slot)
}

/// Pick junk with the configured chance, otherwise a uniform catalog entry
pub fn roll_item<R: Rng>(rules: &Rules, rng: &mut R, rect: Rect) -> ItemInstance {
    let roll: f64 = rng.random();
    if roll < rules.junk_probability {
        return ItemInstance::junk(rules.junk_value, rect);
    }
    match rules.catalog.items().choose(rng) {
        Some(def) => ItemInstance::from_definition(def, rect),
        // Only reachable with an empty catalog
        None => ItemInstance::junk(rules.junk_value, rect),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::NoAssets;
    use crate::settings::{Settings, Variant};
    use crate::sim::state::ItemKind;

    fn state_with(settings: &Settings) -> GameState {
        GameState::new(Rules::from_settings(settings, &NoAssets), 42, 0)
    }

    fn filler(state: &GameState, slot: usize) -> ItemInstance {
        ItemInstance::junk(-80, state.slot_rect(slot).unwrap())
    }

    #[test]
    fn test_no_spawn_before_interval() {
        let mut state = state_with(&Settings::default());
        let mut events = Vec::new();
        assert_eq!(try_spawn(&mut state, 2999, &mut events), None);
        assert_eq!(state.inventory.occupied_count(), 0);
        assert_eq!(state.last_spawn_ms, 0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_spawn_at_interval() {
        let mut state = state_with(&Settings::default());
        let mut events = Vec::new();
        assert_eq!(try_spawn(&mut state, 3000, &mut events), Some(0));
        assert_eq!(state.last_spawn_ms, 3000);
        assert_eq!(events.len(), 1);

        let item = state.inventory.get(0).unwrap();
        assert_eq!(item.rect, state.slot_rect(0).unwrap());
    }

    #[test]
    fn test_fill_order_uses_first_gap() {
        let mut state = state_with(&Settings::default());
        let a = filler(&state, 0);
        let b = filler(&state, 2);
        state.inventory.place(0, a).unwrap();
        state.inventory.place(2, b).unwrap();

        assert_eq!(spawn_item(&mut state), Some(1));
        assert!(state.inventory.get(3).is_none());
        assert!(state.inventory.get(4).is_none());
        assert_eq!(state.inventory.get(1).unwrap().rect, state.slot_rect(1).unwrap());
    }

    #[test]
    fn test_full_inventory_still_resets_timer() {
        let mut state = state_with(&Settings::default());
        for slot in 0..5 {
            let item = filler(&state, slot);
            state.inventory.place(slot, item).unwrap();
        }
        let before = state.inventory.clone();
        let mut events = Vec::new();

        assert_eq!(try_spawn(&mut state, 5000, &mut events), None);
        assert_eq!(state.last_spawn_ms, 5000);
        assert_eq!(state.inventory, before);

        // Freed slot waits for the next full interval
        state.inventory.take(3);
        assert_eq!(try_spawn(&mut state, 7999, &mut events), None);
        assert_eq!(try_spawn(&mut state, 8000, &mut events), Some(3));
    }

    #[test]
    fn test_minimal_variant_never_spawns_junk() {
        let settings = Settings::from_variant(Variant::Minimal);
        let rules = Rules::from_settings(&settings, &NoAssets);
        let rect = rules.layout.slot(0).unwrap();
        let mut rng = rand_pcg::Pcg32::new(7, 11);
        for _ in 0..500 {
            let item = roll_item(&rules, &mut rng, rect);
            assert_eq!(item.kind, ItemKind::Normal);
            assert!(item.value > 0);
        }
    }

    #[test]
    fn test_always_junk() {
        let mut settings = Settings::default();
        settings.junk_probability = 1.0;
        let rules = Rules::from_settings(&settings, &NoAssets);
        let rect = rules.layout.slot(0).unwrap();
        let mut rng = rand_pcg::Pcg32::new(7, 11);
        for _ in 0..50 {
            let item = roll_item(&rules, &mut rng, rect);
            assert_eq!(item.kind, ItemKind::Junk);
            assert_eq!(item.value, -80);
            assert!(item.image.is_none());
        }
    }

    #[test]
    fn test_junk_rate_roughly_matches() {
        let rules = Rules::from_settings(&Settings::default(), &NoAssets);
        let rect = rules.layout.slot(0).unwrap();
        let mut rng = rand_pcg::Pcg32::new(1234, 5);
        let junk = (0..10_000)
            .filter(|_| roll_item(&rules, &mut rng, rect).is_junk())
            .count();
        // 20% of 10k, generous bounds
        assert!((1500..2500).contains(&junk), "junk count {junk}");
    }

    #[test]
    fn test_same_seed_same_items() {
        let settings = Settings::default();
        let mut a = state_with(&settings);
        let mut b = state_with(&settings);
        for _ in 0..5 {
            spawn_item(&mut a);
            spawn_item(&mut b);
        }
        assert_eq!(a.inventory, b.inventory);
    }
}
