//! Item image lookup and generation
//!
//! The simulation only carries an optional [`ImageHandle`] per item. Whether a
//! file exists is decided once at startup by an [`AssetLoader`]; a missing
//! image is not an error, the item is simply drawn as a flat color.
//!
//! [`write_item_images`] produces the stock bitmaps (one solid square per
//! catalog entry) plus a [`MANIFEST_FILE`] listing them for the web shell.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::sim::catalog::{ItemDefinition, Rgb};

/// Written next to generated images; JSON array of the file names present
pub const MANIFEST_FILE: &str = "manifest.json";

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Errors from writing or reading item images
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("bad image manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

/// Reference to a pre-scaled item bitmap
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ImageHandle {
    /// Path or URL the shell loads the bitmap from
    pub path: String,
    /// Edge length the bitmap is scaled to (items are square)
    pub size: i32,
}

/// Resolves item image files to handles
pub trait AssetLoader {
    /// Returns `None` when the file is unavailable
    fn load_item_image(&self, file: &str, size: i32) -> Option<ImageHandle>;
}

/// Loader that never finds anything (everything renders as flat color)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetLoader for NoAssets {
    fn load_item_image(&self, _file: &str, _size: i32) -> Option<ImageHandle> {
        None
    }
}

/// Loads images from a directory on disk
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetLoader for DirAssets {
    fn load_item_image(&self, file: &str, size: i32) -> Option<ImageHandle> {
        let path = self.root.join(file);
        if path.is_file() {
            Some(ImageHandle {
                path: path.to_string_lossy().into_owned(),
                size,
            })
        } else {
            log::debug!("No image at {}, using flat color", path.display());
            None
        }
    }
}

/// Loader backed by a known list of files served under a URL prefix
///
/// Used by the web shell, which learns the file list from the served manifest.
#[derive(Debug, Clone, Default)]
pub struct ManifestAssets {
    base_url: String,
    files: HashSet<String>,
}

impl ManifestAssets {
    pub fn new<I, S>(base_url: impl Into<String>, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            base_url: base_url.into(),
            files: files.into_iter().map(Into::into).collect(),
        }
    }
}

impl ManifestAssets {
    /// Build from the contents of a [`MANIFEST_FILE`]
    pub fn from_manifest_json(base_url: impl Into<String>, json: &str) -> Result<Self, AssetError> {
        let files: Vec<String> = serde_json::from_str(json)?;
        Ok(Self::new(base_url, files))
    }
}

impl AssetLoader for ManifestAssets {
    fn load_item_image(&self, file: &str, size: i32) -> Option<ImageHandle> {
        if !self.files.contains(file) {
            return None;
        }
        let path = if self.base_url.is_empty() {
            file.to_string()
        } else {
            format!("{}/{}", self.base_url.trim_end_matches('/'), file)
        };
        Some(ImageHandle { path, size })
    }
}

/// Write one solid `size`x`size` PNG per catalog image plus the manifest.
///
/// Returns the file names written, in catalog order.
pub fn write_item_images(
    dir: &Path,
    items: &[ItemDefinition],
    size: u32,
) -> Result<Vec<String>, AssetError> {
    std::fs::create_dir_all(dir)?;

    let mut files: Vec<String> = Vec::new();
    for item in items {
        let Some(file) = item.image.as_deref() else {
            continue;
        };
        if files.iter().any(|f| f == file) {
            log::warn!("{} reuses image {}, keeping the first", item.name, file);
            continue;
        }
        std::fs::write(dir.join(file), solid_png(size, item.color))?;
        log::debug!("Wrote {} for {}", file, item.name);
        files.push(file.to_string());
    }

    std::fs::write(dir.join(MANIFEST_FILE), serde_json::to_string_pretty(&files)?)?;
    log::info!("Wrote {} item images to {}", files.len(), dir.display());
    Ok(files)
}

/// Encode a square, opaque, single-color RGBA PNG
pub fn solid_png(size: u32, color: Rgb) -> Vec<u8> {
    let pixel = [color.0, color.1, color.2, 255];
    let mut raw = Vec::with_capacity((1 + size as usize * 4) * size as usize);
    for _ in 0..size {
        // Filter type: none
        raw.push(0);
        for _ in 0..size {
            raw.extend_from_slice(&pixel);
        }
    }

    let mut header = Vec::with_capacity(13);
    header.extend_from_slice(&size.to_be_bytes());
    header.extend_from_slice(&size.to_be_bytes());
    // 8-bit RGBA, deflate, adaptive filtering, no interlace
    header.extend_from_slice(&[8, 6, 0, 0, 0]);

    let mut png = PNG_SIGNATURE.to_vec();
    write_chunk(&mut png, b"IHDR", &header);
    write_chunk(&mut png, b"IDAT", &zlib_stored(&raw));
    write_chunk(&mut png, b"IEND", &[]);
    png
}

fn write_chunk(out: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
    let mut crc = crc32fast::Hasher::new();
    crc.update(kind);
    crc.update(data);

    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    out.extend_from_slice(&crc.finalize().to_be_bytes());
}

/// zlib stream made of uncompressed deflate blocks
fn zlib_stored(data: &[u8]) -> Vec<u8> {
    const MAX_BLOCK: usize = u16::MAX as usize;

    let mut out = vec![0x78, 0x01];
    if data.is_empty() {
        out.extend_from_slice(&[1, 0, 0, 0xff, 0xff]);
    }
    let mut blocks = data.chunks(MAX_BLOCK).peekable();
    while let Some(block) = blocks.next() {
        let last = blocks.peek().is_none();
        let len = block.len() as u16;
        out.push(u8::from(last));
        out.extend_from_slice(&len.to_le_bytes());
        out.extend_from_slice(&(!len).to_le_bytes());
        out.extend_from_slice(block);
    }
    out.extend_from_slice(&adler32(data).to_be_bytes());
    out
}

fn adler32(data: &[u8]) -> u32 {
    const MOD: u32 = 65521;
    let (mut a, mut b) = (1u32, 0u32);
    for &byte in data {
        a = (a + byte as u32) % MOD;
        b = (b + a) % MOD;
    }
    (b << 16) | a
}
