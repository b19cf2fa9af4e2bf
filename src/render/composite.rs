//! Pixel-level compositing onto the straight-alpha RGBA8 canvas.

use image::RgbaImage;

use crate::foundation::error::{WelcomeError, WelcomeResult};
use crate::foundation::math::mul_div255_u8;

pub type StraightRgba8 = [u8; 4];

/// Blend `src` onto `dst` using the source alpha as the mask, on every channel.
///
/// `out = src * a + dst * (1 - a)` with `a = src.alpha`. The alpha channel is blended the same way,
/// so a fully opaque source replaces the destination and a fully transparent one is a no-op.
pub fn masked(dst: StraightRgba8, src: StraightRgba8) -> StraightRgba8 {
    let a = u16::from(src[3]);
    if a == 0 {
        return dst;
    }
    if a == 255 {
        return src;
    }
    let inv = 255u16 - a;

    let mut out = [0u8; 4];
    for i in 0..4 {
        let sc = mul_div255_u8(u16::from(src[i]), a);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Paste `src` with its top-left corner at `(x, y)`, masked by its own alpha channel.
///
/// Parts of `src` that fall outside `dst` are clipped.
pub fn paste_masked(dst: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    for (sx, sy, px) in src.enumerate_pixels() {
        let tx = x + i64::from(sx);
        let ty = y + i64::from(sy);
        if tx < 0 || ty < 0 || tx >= dw || ty >= dh {
            continue;
        }
        let d = dst.get_pixel_mut(tx as u32, ty as u32);
        d.0 = masked(d.0, px.0);
    }
}

/// Composite a premultiplied RGBA8 buffer (as produced by `vello_cpu`) over the canvas.
pub fn premul_over_straight_in_place(dst: &mut RgbaImage, src_premul: &[u8]) -> WelcomeResult<()> {
    if dst.as_raw().len() != src_premul.len() || !src_premul.len().is_multiple_of(4) {
        return Err(WelcomeError::render(
            "premul_over_straight_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        let sa = u16::from(s[3]);
        if sa == 0 {
            continue;
        }
        let inv = 255u16 - sa;
        let da = u16::from(d[3]);

        let out_a = u16::from(s[3].saturating_add(mul_div255_u8(da, inv)));
        if out_a == 0 {
            d.fill(0);
            continue;
        }
        for c in 0..3 {
            let dp = mul_div255_u8(u16::from(d[c]), da);
            let op = u32::from(s[c].saturating_add(mul_div255_u8(u16::from(dp), inv)));
            d[c] = ((op * 255 + u32::from(out_a) / 2) / u32::from(out_a)).min(255) as u8;
        }
        d[3] = out_a as u8;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
