//! Slot and zone geometry, fixed for the session

use super::rect::Rect;

/// Inventory slot rectangles plus the interaction zones
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    slots: Vec<Rect>,
    pub sell_zone: Rect,
    pub trash_zone: Option<Rect>,
}

impl Layout {
    /// Arbitrary slot rectangles (slots may overlap; lower index wins hit tests)
    pub fn new(slots: Vec<Rect>, sell_zone: Rect, trash_zone: Option<Rect>) -> Self {
        Self {
            slots,
            sell_zone,
            trash_zone,
        }
    }

    /// Slots in a row along the bottom edge, left to right
    pub fn bottom_row(
        count: usize,
        item_size: i32,
        margin: i32,
        window_height: i32,
        sell_zone: Rect,
        trash_zone: Option<Rect>,
    ) -> Self {
        let y = window_height - item_size - margin;
        let slots = (0..count as i32)
            .map(|i| Rect::new(margin + i * (item_size + margin), y, item_size, item_size))
            .collect();
        Self::new(slots, sell_zone, trash_zone)
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Rect] {
        &self.slots
    }

    /// Idle rectangle of a slot
    pub fn slot(&self, index: usize) -> Option<Rect> {
        self.slots.get(index).copied()
    }
}
