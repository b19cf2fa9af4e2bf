//! Centered multi-line text block: measurement, placement and rasterisation.

use image::RgbaImage;

use crate::assets::store::{FontAsset, TextBrushRgba8, TextLayoutEngine};
use crate::foundation::error::{WelcomeError, WelcomeResult};
use crate::foundation::math::floor_div;
use crate::render::composite::premul_over_straight_in_place;
use crate::render::template::{LINE_GAP, TEXT_BIAS_Y};

/// Measured extent of one shaped line, in whole pixels.
///
/// Both values come from parley's line box rather than the glyphs' ink bounds, so the height
/// includes the font's ascent and descent even where no glyph reaches them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineMetrics {
    /// Advance width of the shaped line.
    pub width: i64,
    /// Line box height (ascent + descent + leading).
    pub height: i64,
}

/// Where a line is drawn (top-left of its layout box).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedLine {
    /// Horizontal start, centring this line on its own width.
    pub x: i64,
    /// Top of the line box.
    pub y: i64,
    /// Measured size the placement was computed from.
    pub metrics: LineMetrics,
}

/// Placement of every line of a centred text block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextBlockLayout {
    /// One entry per input line, in drawing order.
    pub lines: Vec<PlacedLine>,
    /// Sum of line heights plus the gaps between lines.
    pub total_height: i64,
    /// Vertical start of the first line.
    pub start_y: i64,
    /// Running vertical offset after the last line; the overlay hangs off this.
    pub end_y: i64,
}

impl TextBlockLayout {
    /// Place `metrics` centred on a `canvas_w` x `canvas_h` canvas.
    ///
    /// Every line advances the cursor by the first line's height plus the gap, not by its own
    /// height. With a single font size the heights match, so the card looks the same either way.
    pub fn plan(canvas_w: u32, canvas_h: u32, metrics: &[LineMetrics]) -> Self {
        let gaps = (metrics.len() as i64 - 1).max(0) * LINE_GAP;
        let total_height = metrics.iter().map(|m| m.height).sum::<i64>() + gaps;
        let start_y = floor_div(i64::from(canvas_h) - total_height, 2) + TEXT_BIAS_Y;
        let step = metrics.first().map(|m| m.height).unwrap_or(0) + LINE_GAP;

        let mut lines = Vec::with_capacity(metrics.len());
        let mut y = start_y;
        for m in metrics {
            let x = floor_div(i64::from(canvas_w) - m.width, 2);
            lines.push(PlacedLine { x, y, metrics: *m });
            y += step;
        }

        Self {
            lines,
            total_height,
            start_y,
            end_y: y,
        }
    }
}

/// Shape `lines` with `font`, draw them centred on `canvas`, and return the block layout.
pub fn draw_text_block(
    canvas: &mut RgbaImage,
    font: &FontAsset,
    lines: &[String],
    size_px: f32,
    rgba: [u8; 4],
) -> WelcomeResult<TextBlockLayout> {
    let brush = TextBrushRgba8::from(rgba);
    let mut engine = TextLayoutEngine::new(font)?;

    let mut layouts = Vec::with_capacity(lines.len());
    for line in lines {
        layouts.push(engine.layout_line(line, size_px, brush)?);
    }
    let metrics: Vec<LineMetrics> = layouts
        .iter()
        .map(|l| LineMetrics {
            width: l.width().ceil() as i64,
            height: l.height().ceil() as i64,
        })
        .collect();

    let block = TextBlockLayout::plan(canvas.width(), canvas.height(), &metrics);

    let (w, h) = canvas_dims_u16(canvas)?;
    let font_data = font.font_data();
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    for (layout, placed) in layouts.iter().zip(&block.lines) {
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            placed.x as f64,
            placed.y as f64,
        )));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font_data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    premul_over_straight_in_place(canvas, pixmap.data_as_u8_slice())?;

    tracing::debug!(
        family = engine.family_name(),
        start_y = block.start_y,
        end_y = block.end_y,
        lines = block.lines.len(),
        "drew text block"
    );
    Ok(block)
}

fn canvas_dims_u16(canvas: &RgbaImage) -> WelcomeResult<(u16, u16)> {
    let w = u16::try_from(canvas.width())
        .map_err(|_| WelcomeError::render("canvas width exceeds u16"))?;
    let h = u16::try_from(canvas.height())
        .map_err(|_| WelcomeError::render("canvas height exceeds u16"))?;
    Ok((w, h))
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
