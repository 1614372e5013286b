//! Read-only view of the game state for one frame
//!
//! The scene lists everything a backend has to draw: outlines, sprites, and
//! text. Backends decide how (GPU quads, DOM overlays, log lines).

use glam::IVec2;

use super::vertex::colors;
use crate::assets::ImageHandle;
use crate::sim::{GameState, ItemInstance, ItemKind, Rect, Rgb};

/// Outline thickness of zones and slots (px)
pub const OUTLINE_WIDTH: f32 = 2.0;
/// Stroke width of the junk cross (px)
pub const JUNK_STROKE_WIDTH: f32 = 3.0;
/// Tooltip offset from the pointer (bottom-left corner of the box)
pub const TOOLTIP_OFFSET: IVec2 = IVec2::new(10, -10);

/// How an item is drawn
#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    Color(Rgb),
    /// Bitmap with a flat color underneath in case it fails to load
    Image { handle: ImageHandle, fallback: Rgb },
    JunkMark(Rgb),
}

impl Visual {
    pub fn for_item(item: &ItemInstance) -> Self {
        match (item.kind, &item.image) {
            (ItemKind::Junk, _) => Visual::JunkMark(item.color),
            (ItemKind::Normal, Some(handle)) => Visual::Image {
                handle: handle.clone(),
                fallback: item.color,
            },
            (ItemKind::Normal, None) => Visual::Color(item.color),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub slot: usize,
    pub rect: Rect,
    pub visual: Visual,
    pub dragged: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZoneView {
    pub rect: Rect,
    pub label: &'static str,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub text: String,
    /// Bottom-left corner of the tooltip box
    pub anchor: IVec2,
}

/// Everything drawn in one frame, back to front
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub zones: Vec<ZoneView>,
    pub slots: Vec<Rect>,
    /// Idle items in slot order, then the dragged item
    pub sprites: Vec<Sprite>,
    pub total_text: String,
    /// Newest first
    pub sales_lines: Vec<String>,
    pub tooltip: Option<Tooltip>,
}

/// "Name - $value"
pub fn price_label(name: &str, value: i64) -> String {
    format!("{name} - ${value}")
}

pub fn total_label(total: i64) -> String {
    format!("Total: ${total}")
}

/// Build the frame from the current state and pointer position
pub fn build_scene(state: &GameState, pointer: IVec2) -> Scene {
    let layout = &state.rules.layout;

    let mut zones = vec![ZoneView {
        rect: layout.sell_zone,
        label: "Sell",
        color: colors::SELL_ZONE,
    }];
    if let Some(trash) = layout.trash_zone {
        zones.push(ZoneView {
            rect: trash,
            label: "Trash",
            color: colors::TRASH_ZONE,
        });
    }

    let dragged = state.drag.dragged_slot();
    let sprite = |slot: usize, item: &ItemInstance| Sprite {
        slot,
        rect: item.rect,
        visual: Visual::for_item(item),
        dragged: dragged == Some(slot),
    };

    let mut sprites: Vec<Sprite> = state
        .inventory
        .occupied()
        .filter(|(slot, _)| dragged != Some(*slot))
        .map(|(slot, item)| sprite(slot, item))
        .collect();
    if let Some((slot, item)) = state.dragged_item() {
        sprites.push(sprite(slot, item));
    }

    // Last hovered sprite in draw order wins
    let tooltip = sprites
        .iter()
        .rev()
        .filter(|s| s.rect.contains(pointer))
        .find_map(|s| {
            let item = state.inventory.get(s.slot)?;
            (!item.is_junk()).then(|| Tooltip {
                text: price_label(&item.name, item.value),
                anchor: pointer + TOOLTIP_OFFSET,
            })
        });

    Scene {
        zones,
        slots: layout.slots().to_vec(),
        sprites,
        total_text: total_label(state.session.total_money()),
        sales_lines: state
            .session
            .recent_sales_newest_first()
            .map(|s| price_label(&s.name, s.value))
            .collect(),
        tooltip,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::NoAssets;
    use crate::settings::{Settings, Variant};
    use crate::sim::{InputEvent, Rules, TickInput, tick};

    fn state(variant: Variant) -> GameState {
        GameState::new(
            Rules::from_settings(&Settings::from_variant(variant), &NoAssets),
            3,
            0,
        )
    }

    fn put(state: &mut GameState, slot: usize, name: &str, value: i64, junk: bool) {
        let rect = state.slot_rect(slot).unwrap();
        let mut item = ItemInstance::junk(value, rect);
        if !junk {
            item.kind = ItemKind::Normal;
            item.name = name.to_string();
            item.color = Rgb(1, 2, 3);
        }
        state.inventory.place(slot, item).unwrap();
    }

    #[test]
    fn test_empty_scene() {
        let s = state(Variant::Extended);
        let scene = build_scene(&s, IVec2::ZERO);
        assert_eq!(scene.zones.len(), 2);
        assert_eq!(scene.zones[0].label, "Sell");
        assert_eq!(scene.zones[1].label, "Trash");
        assert_eq!(scene.slots.len(), 5);
        assert!(scene.sprites.is_empty());
        assert_eq!(scene.total_text, "Total: $0");
        assert!(scene.sales_lines.is_empty());
        assert!(scene.tooltip.is_none());
    }

    #[test]
    fn test_minimal_has_only_sell_zone() {
        let scene = build_scene(&state(Variant::Minimal), IVec2::ZERO);
        assert_eq!(scene.zones.len(), 1);
    }

    #[test]
    fn test_visuals() {
        let mut s = state(Variant::Extended);
        put(&mut s, 0, "Gem", 150, false);
        put(&mut s, 1, "Trash", -80, true);
        let scene = build_scene(&s, IVec2::ZERO);
        assert_eq!(scene.sprites[0].visual, Visual::Color(Rgb(1, 2, 3)));
        assert!(matches!(scene.sprites[1].visual, Visual::JunkMark(_)));
    }

    #[test]
    fn test_tooltip_for_hovered_item() {
        let mut s = state(Variant::Extended);
        put(&mut s, 0, "Gem", 150, false);
        let pointer = s.slot_rect(0).unwrap().center();
        let tip = build_scene(&s, pointer).tooltip.unwrap();
        assert_eq!(tip.text, "Gem - $150");
        assert_eq!(tip.anchor, pointer + IVec2::new(10, -10));
    }

    #[test]
    fn test_no_tooltip_for_junk() {
        let mut s = state(Variant::Extended);
        put(&mut s, 0, "Trash", -80, true);
        let pointer = s.slot_rect(0).unwrap().center();
        assert!(build_scene(&s, pointer).tooltip.is_none());
    }

    #[test]
    fn test_dragged_item_drawn_last_at_live_rect() {
        let mut s = state(Variant::Extended);
        put(&mut s, 0, "Gem", 150, false);
        put(&mut s, 1, "Coin", 10, false);
        let grab = s.slot_rect(0).unwrap().center();
        tick(
            &mut s,
            &TickInput {
                events: vec![InputEvent::PointerDown(grab)],
                pointer: IVec2::new(400, 300),
                now_ms: 16,
            },
        );

        let scene = build_scene(&s, IVec2::new(400, 300));
        assert_eq!(scene.sprites.len(), 2);
        assert_eq!(scene.sprites[0].slot, 1);
        let last = scene.sprites.last().unwrap();
        assert_eq!(last.slot, 0);
        assert!(last.dragged);
        assert_eq!(last.rect, Rect::new(375, 275, 50, 50));
        // Home position is not drawn
        assert!(scene.sprites.iter().all(|sp| sp.rect != s.slot_rect(0).unwrap()));
        // Tooltip follows the dragged item
        assert_eq!(scene.tooltip.unwrap().text, "Gem - $150");
    }

    #[test]
    fn test_sales_lines_newest_first() {
        let mut s = state(Variant::Extended);
        s.session.record_sale("Coin", 10);
        s.session.record_sale("Trash", -80);
        let scene = build_scene(&s, IVec2::ZERO);
        assert_eq!(scene.sales_lines, vec!["Trash - $-80", "Coin - $10"]);
        assert_eq!(scene.total_text, "Total: $-70");
    }
}
