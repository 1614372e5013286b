//! Startup configuration
//!
//! Loaded once before the session starts; nothing here is written back.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::catalog::{ItemDefinition, default_items};
use crate::sim::rect::Rect;

/// Game variant preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Sell zone only, no junk
    Minimal,
    /// Sell and trash zones, junk spawns
    #[default]
    Extended,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Minimal => "minimal",
            Variant::Extended => "extended",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "minimal" | "min" => Some(Variant::Minimal),
            "extended" | "ext" | "full" => Some(Variant::Extended),
            _ => None,
        }
    }

    /// Whether the trash zone exists
    pub fn has_trash_zone(&self) -> bool {
        match self {
            Variant::Minimal => false,
            Variant::Extended => true,
        }
    }

    /// Whether junk items can spawn
    pub fn spawns_junk(&self) -> bool {
        match self {
            Variant::Minimal => false,
            Variant::Extended => true,
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub variant: Variant,

    // === Window ===
    pub window_width: i32,
    pub window_height: i32,

    // === Inventory ===
    /// Edge length of items and slots
    pub item_size: i32,
    /// Gap between slots (and between the row and the window edges)
    pub slot_margin: i32,
    pub inventory_size: usize,

    // === Spawner ===
    pub spawn_interval_ms: u64,
    /// Junk chance per spawn; ignored (treated as 0) in the minimal variant
    pub junk_probability: f64,
    pub junk_value: i64,

    // === Session ===
    pub recent_sales_capacity: usize,

    // === Zones ===
    pub sell_zone: Rect,
    /// Only present in the extended variant
    pub trash_zone: Rect,

    // === Items ===
    /// Directory (or URL prefix on the web) holding item images
    pub asset_dir: String,
    pub catalog: Vec<ItemDefinition>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::Extended,

            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,

            item_size: ITEM_SIZE,
            slot_margin: SLOT_MARGIN,
            inventory_size: INVENTORY_SIZE,

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            junk_probability: JUNK_PROBABILITY,
            junk_value: JUNK_VALUE,

            recent_sales_capacity: RECENT_SALES_CAPACITY,

            sell_zone: Rect::new(
                WINDOW_WIDTH - ZONE_INSET,
                WINDOW_HEIGHT - ZONE_INSET,
                ZONE_SIZE,
                ZONE_SIZE,
            ),
            trash_zone: Rect::new(WINDOW_WIDTH - ZONE_INSET, ZONE_EDGE_MARGIN, ZONE_SIZE, ZONE_SIZE),

            asset_dir: "images".to_string(),
            catalog: default_items(),
        }
    }
}

impl Settings {
    /// Create settings from a variant preset
    pub fn from_variant(variant: Variant) -> Self {
        let mut settings = Self::default();
        settings.variant = variant;
        settings
    }

    /// Trash zone if the variant has one
    pub fn effective_trash_zone(&self) -> Option<Rect> {
        self.variant.has_trash_zone().then_some(self.trash_zone)
    }

    /// Junk chance (respects the variant)
    pub fn effective_junk_probability(&self) -> f64 {
        if self.variant.spawns_junk() {
            self.junk_probability
        } else {
            0.0
        }
    }

    /// Reject settings the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.window_width <= 0 || self.window_height <= 0 {
            return Err(SettingsError::Invalid(format!(
                "window size must be positive, got {}x{}",
                self.window_width, self.window_height
            )));
        }
        if self.item_size <= 0 {
            return Err(SettingsError::Invalid(format!(
                "item_size must be positive, got {}",
                self.item_size
            )));
        }
        if self.slot_margin < 0 {
            return Err(SettingsError::Invalid(format!(
                "slot_margin must not be negative, got {}",
                self.slot_margin
            )));
        }
        if self.inventory_size == 0 {
            return Err(SettingsError::Invalid("inventory_size must be at least 1".into()));
        }
        // Slots sit in one row along the bottom edge
        let pitch = self.item_size as i64 + self.slot_margin as i64;
        if pitch > self.window_height as i64 {
            return Err(SettingsError::Invalid(format!(
                "item_size + slot_margin ({pitch}) exceeds window_height {}",
                self.window_height
            )));
        }
        let row_width = i64::try_from(self.inventory_size)
            .ok()
            .and_then(|n| n.checked_mul(pitch));
        if !row_width.is_some_and(|w| w <= self.window_width as i64) {
            return Err(SettingsError::Invalid(format!(
                "{} slots of {} px do not fit in window_width {}",
                self.inventory_size, self.item_size, self.window_width
            )));
        }
        if !(0.0..=1.0).contains(&self.junk_probability) {
            return Err(SettingsError::Invalid(format!(
                "junk_probability must be within [0, 1], got {}",
                self.junk_probability
            )));
        }
        if !(1..=MAX_RECENT_SALES_CAPACITY).contains(&self.recent_sales_capacity) {
            return Err(SettingsError::Invalid(format!(
                "recent_sales_capacity must be within [1, {MAX_RECENT_SALES_CAPACITY}], got {}",
                self.recent_sales_capacity
            )));
        }
        if self.catalog.is_empty() && self.effective_junk_probability() < 1.0 {
            return Err(SettingsError::Invalid(
                "catalog is empty but non-junk items can spawn".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate a JSON settings file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!(
            "Loaded settings from {} ({} variant)",
            path.display(),
            settings.variant.as_str()
        );
        Ok(settings)
    }

    /// Load a settings file, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            Some(path) => match Self::load(path) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("{e}; using default settings");
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Settings selected by a URL query string such as `?variant=minimal`
    pub fn from_query(query: &str) -> Self {
        let variant = query
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "variant")
            .and_then(|(_, value)| Variant::from_str(value))
            .unwrap_or_default();
        Self::from_variant(variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_layout() {
        let s = Settings::default();
        assert!(s.validate().is_ok());
        assert_eq!(s.sell_zone, Rect::new(640, 440, 150, 150));
        assert_eq!(s.effective_trash_zone(), Some(Rect::new(640, 10, 150, 150)));
        assert_eq!(s.effective_junk_probability(), 0.2);
        assert_eq!(s.catalog.len(), 10);
    }

    #[test]
    fn test_minimal_variant() {
        let s = Settings::from_variant(Variant::Minimal);
        assert_eq!(s.effective_trash_zone(), None);
        assert_eq!(s.effective_junk_probability(), 0.0);
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let s = Settings::from_json(r#"{"variant":"minimal","spawn_interval_ms":500}"#).unwrap();
        assert_eq!(s.variant, Variant::Minimal);
        assert_eq!(s.spawn_interval_ms, 500);
        assert_eq!(s.inventory_size, 5);
        assert_eq!(s.catalog.len(), 10);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = Settings::from_json(r#"{"spawn_interval":500}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Settings::from_json(r#"{"junk_probability":1.5}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_json(r#"{"inventory_size":0}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_json(r#"{"catalog":[]}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        // All-junk sessions don't need a catalog
        assert!(Settings::from_json(r#"{"catalog":[],"junk_probability":1.0}"#).is_ok());
    }

    #[test]
    fn test_inventory_row_must_fit_window() {
        // 13 * (50 + 10) = 780 fits in 800, 14 does not
        assert!(Settings::from_json(r#"{"inventory_size":13}"#).is_ok());
        let err = Settings::from_json(r#"{"inventory_size":14}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_json(r#"{"inventory_size":100000000}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_json(r#"{"inventory_size":18446744073709551615}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_json(r#"{"item_size":2147483647}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_json(r#"{"item_size":600}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_recent_sales_capacity_bounds() {
        let max = format!(r#"{{"recent_sales_capacity":{MAX_RECENT_SALES_CAPACITY}}}"#);
        let s = Settings::from_json(&max).unwrap();
        assert_eq!(s.recent_sales_capacity, MAX_RECENT_SALES_CAPACITY);

        let over = format!(r#"{{"recent_sales_capacity":{}}}"#, MAX_RECENT_SALES_CAPACITY + 1);
        assert!(matches!(Settings::from_json(&over), Err(SettingsError::Invalid(_))));

        let err = Settings::from_json(r#"{"recent_sales_capacity":18446744073709551615}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_json(r#"{"recent_sales_capacity":0}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = Path::new("/nonexistent/inventory-seller/settings.json");
        assert!(matches!(Settings::load(path), Err(SettingsError::Io(_))));
        assert_eq!(Settings::load_or_default(Some(path)), Settings::default());
    }

    #[test]
    fn test_from_query() {
        assert_eq!(Settings::from_query("?variant=minimal").variant, Variant::Minimal);
        assert_eq!(Settings::from_query("?a=1&variant=MIN").variant, Variant::Minimal);
        assert_eq!(Settings::from_query("").variant, Variant::Extended);
        assert_eq!(Settings::from_query("?variant=bogus").variant, Variant::Extended);
    }
}
