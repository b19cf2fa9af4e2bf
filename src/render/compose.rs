//! The welcome card pipeline: avatars, background, text, overlay, PNG.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::assets::decode::{load_optional_rgba, load_rgba};
use crate::assets::store::FontAsset;
use crate::avatar::FetchResult;
use crate::config::AssetPaths;
use crate::foundation::core::{Member, MemberId};
use crate::foundation::error::{WelcomeError, WelcomeResult};
use crate::foundation::math::floor_div;
use crate::render::composite::paste_masked;
use crate::render::template::{
    AVATAR_OFFSET, AVATAR_SIZE, CANVAS_HEIGHT, CANVAS_WIDTH, FALLBACK_SIZE, FONT_SIZE_PX,
    OVERLAY_LIFT, TEXT_RGBA, fallback_offset, greeting_lines, overlay_size,
};
use crate::render::text::draw_text_block;

/// High-quality filter used for every resize on the card.
const RESAMPLE: FilterType = FilterType::Lanczos3;

/// Outcome of producing a card file for one member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompositeResult {
    /// PNG written to this path.
    Generated(PathBuf),
    /// Nothing was written; the reason is for logs only.
    GenerationFailed(String),
}

/// Produces the card file for a join. Implementations must not panic on bad assets.
pub trait CardRenderer: Send + Sync {
    /// Render and write the card for `member`.
    fn render_card(&self, member: &Member, avatar: &FetchResult) -> CompositeResult;
}

/// CPU compositor reading the static assets from disk on every card.
#[derive(Clone, Debug)]
pub struct Compositor {
    assets: AssetPaths,
    output_dir: PathBuf,
}

impl Compositor {
    /// Compositor reading `assets` and writing cards into `output_dir`.
    pub fn new(assets: AssetPaths, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets,
            output_dir: output_dir.into(),
        }
    }

    /// Asset locations in use.
    pub fn assets(&self) -> &AssetPaths {
        &self.assets
    }

    /// Collision-free output file for `id`.
    pub fn output_path(&self, id: MemberId) -> PathBuf {
        self.output_dir.join(format!("welcome_{id}.png"))
    }

    /// Build the finished card bitmap.
    #[tracing::instrument(skip(self, avatar), fields(has_avatar = avatar.is_some()))]
    pub fn compose(&self, avatar: Option<&RgbaImage>, name: &str) -> WelcomeResult<RgbaImage> {
        let mut canvas = self.compose_layers(avatar)?;

        let font = FontAsset::load(&self.assets.font)?;
        let block = draw_text_block(
            &mut canvas,
            &font,
            &greeting_lines(name),
            FONT_SIZE_PX,
            TEXT_RGBA,
        )?;

        self.place_overlay(&mut canvas, block.end_y)?;
        Ok(canvas)
    }

    /// Background plus both avatars, before any text.
    pub(crate) fn compose_layers(&self, avatar: Option<&RgbaImage>) -> WelcomeResult<RgbaImage> {
        let fallback = load_rgba(&self.assets.fallback_avatar)?;
        let fallback = imageops::flip_horizontal(&fallback);

        let avatar = avatar.map(|a| imageops::resize(a, AVATAR_SIZE, AVATAR_SIZE, RESAMPLE));
        let fallback = imageops::resize(&fallback, FALLBACK_SIZE, FALLBACK_SIZE, RESAMPLE);

        let background = load_rgba(&self.assets.background)?;
        let background = imageops::resize(&background, CANVAS_WIDTH, CANVAS_HEIGHT, RESAMPLE);
        let mut canvas = RgbaImage::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        imageops::replace(&mut canvas, &background, 0, 0);

        if let Some(avatar) = &avatar {
            paste_masked(&mut canvas, avatar, AVATAR_OFFSET.0, AVATAR_OFFSET.1);
        }

        let (fx, fy) = fallback_offset();
        paste_masked(&mut canvas, &fallback, fx, fy);
        Ok(canvas)
    }

    /// Paste the decorative overlay under the text block, if the asset exists.
    pub(crate) fn place_overlay(&self, canvas: &mut RgbaImage, text_end_y: i64) -> WelcomeResult<()> {
        let Some(overlay) = load_optional_rgba(&self.assets.overlay)? else {
            tracing::debug!(path = %self.assets.overlay.display(), "no overlay asset, skipping");
            return Ok(());
        };
        let size = overlay_size();
        let overlay = imageops::resize(&overlay, size, size, RESAMPLE);
        let x = floor_div(i64::from(canvas.width()) - i64::from(size), 2);
        paste_masked(canvas, &overlay, x, text_end_y - OVERLAY_LIFT);
        Ok(())
    }

    /// Encode `canvas` as PNG at `path`.
    pub fn write_png(canvas: &RgbaImage, path: &Path) -> WelcomeResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                WelcomeError::render(format!("create output dir '{}': {e}", parent.display()))
            })?;
        }
        canvas
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| WelcomeError::render(format!("write png '{}': {e}", path.display())))
    }

    fn try_render(&self, member: &Member, avatar: &FetchResult) -> WelcomeResult<PathBuf> {
        let canvas = self.compose(avatar.as_image(), &member.name)?;
        let path = self.output_path(member.id);
        Self::write_png(&canvas, &path)?;
        Ok(path)
    }
}

impl CardRenderer for Compositor {
    fn render_card(&self, member: &Member, avatar: &FetchResult) -> CompositeResult {
        match self.try_render(member, avatar) {
            Ok(path) => CompositeResult::Generated(path),
            Err(e) => {
                tracing::error!(member = %member.id, error = %e, "error creating welcome image");
                CompositeResult::GenerationFailed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
