//! Drag controller: press picks an item up, the pointer carries it, release
//! hands it to [`super::resolve`]

use glam::IVec2;

use super::resolve::{Resolution, resolve_release};
use super::state::{DragState, GameEvent, GameState};

/// Start dragging the first occupied slot whose item contains `pointer`.
///
/// Ignored while a drag is already in progress. Returns the picked slot.
pub fn press(state: &mut GameState, pointer: IVec2, events: &mut Vec<GameEvent>) -> Option<usize> {
    if state.drag != DragState::Idle {
        return None;
    }

    let (slot, origin) = state
        .inventory
        .occupied()
        .find(|(_, item)| item.rect.contains(pointer))
        .map(|(slot, item)| (slot, item.rect.origin()))?;

    state.drag = DragState::Dragging {
        slot,
        offset: origin - pointer,
    };
    events.push(GameEvent::DragStarted { slot });
    Some(slot)
}

/// Move the dragged item so it keeps its press-time offset from the pointer
pub fn drag_to(state: &mut GameState, pointer: IVec2) {
    if let DragState::Dragging { slot, offset } = state.drag {
        if let Some(item) = state.inventory.get_mut(slot) {
            item.rect.set_origin(pointer + offset);
        }
    }
}

/// Drop the dragged item and resolve it against the zones.
///
/// A release with nothing held is a no-op.
pub fn release(state: &mut GameState, events: &mut Vec<GameEvent>) -> Option<Resolution> {
    let slot = state.drag.dragged_slot()?;
    let resolution = resolve_release(state, slot, events);
    state.drag = DragState::Idle;
    resolution
}
