//! Fixed geometry and copy of the welcome card.

/// Canvas width in pixels; the background is stretched to this.
pub const CANVAS_WIDTH: u32 = 600;
/// Canvas height in pixels.
pub const CANVAS_HEIGHT: u32 = 400;

/// Edge length of the joining member's avatar.
pub const AVATAR_SIZE: u32 = 115;
/// Top-left corner of the joining member's avatar.
pub const AVATAR_OFFSET: (i64, i64) = (60, 50);

/// Edge length of the (mirrored) fallback avatar.
pub const FALLBACK_SIZE: u32 = 155;
pub const FALLBACK_RIGHT_MARGIN: i64 = 40;
pub const FALLBACK_TOP_MARGIN: i64 = 30;

pub const FONT_SIZE_PX: f32 = 35.0;
pub const LINE_GAP: i64 = 10;
/// Extra downward shift applied after vertically centring the text block.
pub const TEXT_BIAS_Y: i64 = 20;
pub const TEXT_RGBA: [u8; 4] = [255, 255, 255, 255];

pub const OVERLAY_SCALE: f64 = 1.25;
/// The overlay starts this far above the running text offset.
pub const OVERLAY_LIFT: i64 = 15;

/// Greeting posted alongside the card.
pub const GREETING_SUFFIX: &str = "خوش اومدی!";
/// Appended to the greeting when no card could be produced.
pub const DEGRADED_NOTE: &str = "(Could not generate welcome image.)";

/// Logical (unshaped) lines drawn on the card for `name`.
pub fn greeting_lines(name: &str) -> [String; 2] {
    [
        format!("سلام {name} خوش اومدی!"),
        "از الآن عضو کُلایدر آرمی هستی!".to_string(),
    ]
}

/// Top-left corner of the fallback avatar: right-aligned with a margin.
pub fn fallback_offset() -> (i64, i64) {
    (
        i64::from(CANVAS_WIDTH) - i64::from(FALLBACK_SIZE) - FALLBACK_RIGHT_MARGIN,
        FALLBACK_TOP_MARGIN,
    )
}

/// Edge length of the decorative overlay: 125% of a sixth of the smaller canvas side.
pub fn overlay_size() -> u32 {
    let sixth = (CANVAS_WIDTH / 6).min(CANVAS_HEIGHT / 6);
    (f64::from(sixth) * OVERLAY_SCALE) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/render/template.rs"]
mod tests;
