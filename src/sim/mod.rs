//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes from the shell (`TickInput::now_ms`)
//! - Seeded RNG only
//! - Stable iteration order (by slot index)
//! - No rendering or platform dependencies

pub mod autoplay;
pub mod catalog;
pub mod drag;
pub mod layout;
pub mod rect;
pub mod resolve;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autoplay::AutoPlayer;
pub use catalog::{Catalog, ItemDefinition, Rgb, default_items};
pub use layout::Layout;
pub use rect::Rect;
pub use resolve::{Resolution, resolve_release};
pub use spawner::{spawn_item, try_spawn};
pub use state::{
    DragState, GameEvent, GameState, Inventory, ItemInstance, ItemKind, Rules, SaleRecord,
    SessionState,
};
pub use tick::{InputEvent, TickInput, TickOutcome, TickStatus, tick};
