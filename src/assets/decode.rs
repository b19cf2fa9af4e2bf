use std::path::Path;

use anyhow::Context;
use image::RgbaImage;

use crate::foundation::error::{WelcomeError, WelcomeResult};

/// Decode an in-memory raster payload (PNG, JPEG, WebP, GIF, ...) into straight RGBA8.
pub fn decode_rgba(bytes: &[u8]) -> WelcomeResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Open and decode an image file into straight RGBA8.
pub fn load_rgba(path: &Path) -> WelcomeResult<RgbaImage> {
    let dyn_img = image::open(path)
        .map_err(|e| WelcomeError::asset(format!("failed to load '{}': {e}", path.display())))?;
    Ok(dyn_img.to_rgba8())
}

/// Like [`load_rgba`], but a missing file is `Ok(None)` instead of an error.
pub fn load_optional_rgba(path: &Path) -> WelcomeResult<Option<RgbaImage>> {
    if !path.exists() {
        return Ok(None);
    }
    load_rgba(path).map(Some)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
