//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]; shells own one
//! and hand it to [`super::tick`] every frame.

use std::collections::VecDeque;

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::catalog::{Catalog, ItemDefinition, Rgb};
use super::layout::Layout;
use super::rect::Rect;
use crate::assets::{AssetLoader, ImageHandle};
use crate::consts::JUNK_NAME;
use crate::settings::Settings;

/// Color of the junk cross marker
pub const JUNK_MARK_COLOR: Rgb = Rgb(255, 0, 0);

/// Item kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ItemKind {
    Normal,
    /// Negative value, never has an image, drawn as a cross
    Junk,
}

/// A spawned item sitting in (or dragged out of) a slot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemInstance {
    pub name: String,
    pub value: i64,
    pub kind: ItemKind,
    pub color: Rgb,
    pub image: Option<ImageHandle>,
    /// Current bounds: the slot rectangle when idle, pointer-relative while dragged
    pub rect: Rect,
}

impl ItemInstance {
    /// Copy a catalog entry into a slot
    pub fn from_definition(def: &ItemDefinition, rect: Rect) -> Self {
        Self {
            name: def.name.clone(),
            value: def.value,
            kind: ItemKind::Normal,
            color: def.color,
            image: def.handle.clone(),
            rect,
        }
    }

    pub fn junk(value: i64, rect: Rect) -> Self {
        Self {
            name: JUNK_NAME.to_string(),
            value,
            kind: ItemKind::Junk,
            color: JUNK_MARK_COLOR,
            image: None,
            rect,
        }
    }

    #[inline]
    pub fn is_junk(&self) -> bool {
        self.kind == ItemKind::Junk
    }
}

/// Fixed-size slot array; index is slot identity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inventory {
    slots: Vec<Option<ItemInstance>>,
}

impl Inventory {
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![None; size],
        }
    }

    /// Number of slots, occupied or not (see [`Self::occupied_count`])
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, index: usize) -> Option<&ItemInstance> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ItemInstance> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    /// Lowest empty slot index
    pub fn first_free(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Put an item into an empty slot; hands the item back if the slot is
    /// taken or out of range
    pub fn place(&mut self, index: usize, item: ItemInstance) -> Result<(), ItemInstance> {
        match self.slots.get_mut(index) {
            Some(slot) if slot.is_none() => {
                *slot = Some(item);
                Ok(())
            }
            _ => Err(item),
        }
    }

    /// Remove and return the item in a slot
    pub fn take(&mut self, index: usize) -> Option<ItemInstance> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    /// Occupied slots in index order
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &ItemInstance)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|item| (i, item)))
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

/// Drag controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DragState {
    #[default]
    Idle,
    /// `offset` = item origin - pointer at press time
    Dragging { slot: usize, offset: IVec2 },
}

impl DragState {
    pub fn dragged_slot(&self) -> Option<usize> {
        match *self {
            DragState::Dragging { slot, .. } => Some(slot),
            DragState::Idle => None,
        }
    }
}

/// One entry of the recent-sales log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleRecord {
    pub name: String,
    pub value: i64,
}

/// Money total and bounded sales history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    total_money: i64,
    /// Oldest first
    recent_sales: VecDeque<SaleRecord>,
    capacity: usize,
}

impl SessionState {
    pub fn new(capacity: usize) -> Self {
        Self {
            total_money: 0,
            recent_sales: VecDeque::new(),
            capacity,
        }
    }

    pub fn total_money(&self) -> i64 {
        self.total_money
    }

    /// Storage order: oldest first, newest last
    pub fn recent_sales(&self) -> impl ExactSizeIterator<Item = &SaleRecord> + DoubleEndedIterator {
        self.recent_sales.iter()
    }

    /// Display order: newest first
    pub fn recent_sales_newest_first(&self) -> impl Iterator<Item = &SaleRecord> {
        self.recent_sales.iter().rev()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Credit a sale; only release resolution calls this
    pub(crate) fn record_sale(&mut self, name: &str, value: i64) {
        self.total_money = self.total_money.saturating_add(value);
        self.recent_sales.push_back(SaleRecord {
            name: name.to_string(),
            value,
        });
        while self.recent_sales.len() > self.capacity {
            self.recent_sales.pop_front();
        }
    }
}

/// Things that happened during a tick (for logging/feedback in shells)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    Spawned { slot: usize, name: String, kind: ItemKind },
    DragStarted { slot: usize },
    Sold { slot: usize, name: String, value: i64 },
    Trashed { slot: usize, name: String },
    SnappedBack { slot: usize },
}

/// Immutable per-session rules, built once from [`Settings`]
#[derive(Debug, Clone)]
pub struct Rules {
    pub catalog: Catalog,
    pub layout: Layout,
    pub spawn_interval_ms: u64,
    pub junk_probability: f64,
    pub junk_value: i64,
    pub recent_sales_capacity: usize,
}

impl Rules {
    /// Expects validated settings (see [`Settings::validate`])
    pub fn from_settings(settings: &Settings, assets: &dyn AssetLoader) -> Self {
        let layout = Layout::bottom_row(
            settings.inventory_size,
            settings.item_size,
            settings.slot_margin,
            settings.window_height,
            settings.sell_zone,
            settings.effective_trash_zone(),
        );
        Self {
            catalog: Catalog::new(settings.catalog.clone(), assets, settings.item_size),
            layout,
            spawn_interval_ms: settings.spawn_interval_ms,
            junk_probability: settings.effective_junk_probability(),
            junk_value: settings.junk_value,
            recent_sales_capacity: settings.recent_sales_capacity,
        }
    }
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub rules: Rules,
    pub inventory: Inventory,
    pub drag: DragState,
    pub session: SessionState,
    /// Time of the last spawn attempt (ms, shell clock)
    pub last_spawn_ms: u64,
}

impl GameState {
    /// Fresh session; the spawn timer starts at `now_ms`
    pub fn new(rules: Rules, seed: u64, now_ms: u64) -> Self {
        let slots = rules.layout.slot_count();
        let capacity = rules.recent_sales_capacity;
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            rules,
            inventory: Inventory::new(slots),
            drag: DragState::Idle,
            session: SessionState::new(capacity),
            last_spawn_ms: now_ms,
        }
    }

    /// Idle rectangle of a slot
    pub fn slot_rect(&self, index: usize) -> Option<Rect> {
        self.rules.layout.slot(index)
    }

    /// The item currently held by the pointer
    pub fn dragged_item(&self) -> Option<(usize, &ItemInstance)> {
        let slot = self.drag.dragged_slot()?;
        self.inventory.get(slot).map(|item| (slot, item))
    }
}
