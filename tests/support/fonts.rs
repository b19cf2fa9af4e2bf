//! Locates a TrueType font on the host for text-rendering tests.
//!
//! Tests that need real glyphs return early when nothing is found.

use std::path::PathBuf;

const CANDIDATES: &[&str] = &[
    "assets/Vazir-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/noto/NotoSansArabic-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[allow(dead_code)]
pub fn system_font_path() -> Option<PathBuf> {
    if let Ok(p) = std::env::var("WELCOMER_TEST_FONT") {
        let p = PathBuf::from(p);
        if p.is_file() {
            return Some(p);
        }
    }
    CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}
