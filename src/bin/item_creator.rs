//! Writes the flat-color item images and their manifest
//!
//! Reads the same `INVENTORY_SELLER_SETTINGS` file as the game and writes
//! into its `asset_dir` (`images/` by default).

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::{Path, PathBuf};

    use inventory_seller::assets::write_item_images;
    use inventory_seller::consts::ITEM_SIZE;
    use inventory_seller::settings::Settings;

    env_logger::init();

    let settings_path = std::env::var_os("INVENTORY_SELLER_SETTINGS").map(PathBuf::from);
    let settings = Settings::load_or_default(settings_path.as_deref());
    let size = u32::try_from(settings.item_size).unwrap_or(ITEM_SIZE as u32);

    match write_item_images(Path::new(&settings.asset_dir), &settings.catalog, size) {
        Ok(files) => println!("Wrote {} images to {}", files.len(), settings.asset_dir),
        Err(e) => {
            log::error!("Failed to write item images: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
