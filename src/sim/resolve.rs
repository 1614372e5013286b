//! Release resolution: sell, trash, or snap back

use serde::Serialize;

use super::state::{GameEvent, GameState};

/// Outcome of dropping an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Resolution {
    Sold { slot: usize, name: String, value: i64 },
    Trashed { slot: usize, name: String },
    SnappedBack { slot: usize },
}

/// Apply the first matching rule to the item in `slot`:
/// 1. overlaps the sell zone: credit its value, log the sale, empty the slot
/// 2. overlaps the trash zone (if any): empty the slot
/// 3. otherwise: return it to its slot rectangle
///
/// Returns `None` only if the slot is empty.
pub fn resolve_release(
    state: &mut GameState,
    slot: usize,
    events: &mut Vec<GameEvent>,
) -> Option<Resolution> {
    let rect = state.inventory.get(slot)?.rect;
    let layout = &state.rules.layout;

    if rect.overlaps(&layout.sell_zone) {
        let item = state.inventory.take(slot)?;
        state.session.record_sale(&item.name, item.value);
        log::debug!(
            "Sold {} for {} (total {})",
            item.name,
            item.value,
            state.session.total_money()
        );
        events.push(GameEvent::Sold {
            slot,
            name: item.name.clone(),
            value: item.value,
        });
        return Some(Resolution::Sold {
            slot,
            name: item.name,
            value: item.value,
        });
    }

    if layout.trash_zone.is_some_and(|zone| rect.overlaps(&zone)) {
        let item = state.inventory.take(slot)?;
        log::debug!("Trashed {}", item.name);
        events.push(GameEvent::Trashed {
            slot,
            name: item.name.clone(),
        });
        return Some(Resolution::Trashed {
            slot,
            name: item.name,
        });
    }

    let home = layout.slot(slot)?;
    if let Some(item) = state.inventory.get_mut(slot) {
        item.rect = home;
    }
    events.push(GameEvent::SnappedBack { slot });
    Some(Resolution::SnappedBack { slot })
}
