//! Static item catalog

use serde::{Deserialize, Serialize};

use crate::assets::{AssetLoader, ImageHandle};

/// Display color (8-bit RGB)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Normalized RGBA for the GPU
    pub const fn to_rgba(self) -> [f32; 4] {
        [
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
            1.0,
        ]
    }
}

/// One catalog entry; spawned items copy it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub name: String,
    pub color: Rgb,
    pub value: i64,
    /// Image file name, relative to the asset directory
    #[serde(default)]
    pub image: Option<String>,
    /// Resolved at startup by [`Catalog::new`]
    #[serde(skip)]
    pub handle: Option<ImageHandle>,
}

impl ItemDefinition {
    pub fn new(name: &str, color: Rgb, value: i64, image: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            color,
            value,
            image: image.map(str::to_string),
            handle: None,
        }
    }
}

/// Immutable list of spawnable items
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<ItemDefinition>,
}

impl Catalog {
    /// Build the catalog, resolving each image file through `assets`
    pub fn new(items: Vec<ItemDefinition>, assets: &dyn AssetLoader, item_size: i32) -> Self {
        let items = items
            .into_iter()
            .map(|mut def| {
                def.handle = def
                    .image
                    .as_deref()
                    .and_then(|file| assets.load_item_image(file, item_size));
                def
            })
            .collect::<Vec<_>>();

        let with_images = items.iter().filter(|d| d.handle.is_some()).count();
        log::info!("Catalog: {} items, {} with images", items.len(), with_images);

        Self { items }
    }

    pub fn items(&self) -> &[ItemDefinition] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ItemDefinition> {
        self.items.get(index)
    }
}

/// The ten stock items
pub fn default_items() -> Vec<ItemDefinition> {
    vec![
        ItemDefinition::new("Coin", Rgb(255, 215, 0), 10, Some("coin.png")),
        ItemDefinition::new("Gem", Rgb(0, 255, 255), 150, Some("gem.png")),
        ItemDefinition::new("Sword Cutter", Rgb(255, 105, 180), 150, Some("swordcutter.png")),
        ItemDefinition::new("Portal Potion", Rgb(148, 0, 211), 150, Some("portalpotion.png")),
        ItemDefinition::new("Scroll", Rgb(210, 180, 140), 20, Some("scroll.png")),
        ItemDefinition::new("Shield", Rgb(128, 128, 128), 60, Some("shield.png")),
        ItemDefinition::new("Sword", Rgb(192, 192, 192), 80, Some("sword.png")),
        ItemDefinition::new("Helmet", Rgb(105, 105, 105), 35, Some("helmet.png")),
        ItemDefinition::new("Boots", Rgb(139, 69, 19), 25, Some("boots.png")),
        ItemDefinition::new("Amulet", Rgb(0, 191, 255), 45, Some("amulet.png")),
    ]
}
