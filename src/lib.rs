//! Inventory Seller - drag items from a replenishing inventory onto sell/trash zones
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, dragging, release resolution)
//! - `renderer`: Scene building and WebGPU shape rendering
//! - `assets`: Item image lookup (missing images fall back to flat color)
//! - `settings`: Startup configuration and variant presets
//! - `headless`: Autoplay session runner for the native binary

pub mod assets;
pub mod headless;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use assets::{AssetLoader, ImageHandle};
pub use settings::{Settings, SettingsError, Variant};

/// Game configuration constants
pub mod consts {
    /// Target frame rate of the shell loop
    pub const TARGET_FPS: u32 = 60;
    /// Simulated frame length used by the headless runner (ms)
    pub const FRAME_MS: u64 = 1000 / TARGET_FPS as u64;

    /// Window dimensions
    pub const WINDOW_WIDTH: i32 = 800;
    pub const WINDOW_HEIGHT: i32 = 600;

    /// Inventory defaults
    pub const INVENTORY_SIZE: usize = 5;
    pub const ITEM_SIZE: i32 = 50;
    /// Gap between slots and between the slot row and the window edge
    pub const SLOT_MARGIN: i32 = 10;

    /// Spawner defaults
    pub const SPAWN_INTERVAL_MS: u64 = 3000;
    pub const JUNK_PROBABILITY: f64 = 0.2;
    pub const JUNK_VALUE: i64 = -80;
    pub const JUNK_NAME: &str = "Trash";

    /// Recent sales shown in the HUD
    pub const RECENT_SALES_CAPACITY: usize = 5;
    /// Upper bound accepted from settings files
    pub const MAX_RECENT_SALES_CAPACITY: usize = 1000;

    /// Zones are square, inset from the right edge
    pub const ZONE_SIZE: i32 = 150;
    pub const ZONE_INSET: i32 = 160;
    pub const ZONE_EDGE_MARGIN: i32 = 10;
}
