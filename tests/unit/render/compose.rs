use image::Rgba;

use super::*;
use crate::foundation::core::GuildId;

const BG: [u8; 4] = [20, 30, 40, 255];
const LEFT: [u8; 4] = [0, 0, 255, 255];
const RIGHT: [u8; 4] = [0, 255, 0, 255];
const RED: [u8; 4] = [255, 0, 0, 255];
const OVERLAY: [u8; 4] = [250, 200, 0, 255];

struct Fixture {
    dir: tempfile::TempDir,
    assets: AssetPaths,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let assets = AssetPaths {
            background: dir.path().join("bg.png"),
            fallback_avatar: dir.path().join("fallback.png"),
            overlay: dir.path().join("extra.png"),
            font: crate::test_support::system_font_path()
                .unwrap_or_else(|| dir.path().join("missing.ttf")),
        };

        RgbaImage::from_pixel(300, 200, Rgba(BG))
            .save(&assets.background)
            .unwrap();

        // Two-tone source so mirroring is observable.
        let fallback = RgbaImage::from_fn(20, 10, |x, _| {
            if x < 10 { Rgba(LEFT) } else { Rgba(RIGHT) }
        });
        fallback.save(&assets.fallback_avatar).unwrap();

        Self { dir, assets }
    }

    fn with_overlay(self) -> Self {
        RgbaImage::from_pixel(50, 50, Rgba(OVERLAY))
            .save(&self.assets.overlay)
            .unwrap();
        self
    }

    fn compositor(&self) -> Compositor {
        Compositor::new(self.assets.clone(), self.dir.path().join("out"))
    }
}

fn member() -> Member {
    Member {
        id: MemberId(1234),
        guild_id: GuildId(1),
        name: "Sara".to_string(),
        avatar_url: None,
    }
}

fn close(a: [u8; 4], b: [u8; 4]) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| x.abs_diff(*y) <= 2)
}

#[test]
fn avatar_is_resized_and_placed_at_fixed_offset() {
    let fx = Fixture::new();
    let avatar = RgbaImage::from_pixel(40, 40, Rgba(RED));
    let canvas = fx.compositor().compose_layers(Some(&avatar)).unwrap();

    assert_eq!(canvas.dimensions(), (600, 400));
    assert!(close(canvas.get_pixel(60, 50).0, RED));
    assert!(close(canvas.get_pixel(60 + 114, 50 + 114).0, RED));
    assert!(close(canvas.get_pixel(59, 50).0, BG));
    assert!(close(canvas.get_pixel(60, 49).0, BG));
    assert!(close(canvas.get_pixel(60 + 115, 50 + 114).0, BG));
    assert!(close(canvas.get_pixel(60 + 114, 50 + 115).0, BG));
}

#[test]
fn transparent_avatar_pixels_keep_the_background() {
    let fx = Fixture::new();
    let avatar = RgbaImage::from_pixel(40, 40, Rgba([255, 0, 0, 0]));
    let canvas = fx.compositor().compose_layers(Some(&avatar)).unwrap();
    assert!(close(canvas.get_pixel(100, 100).0, BG));
}

#[test]
fn without_avatar_the_slot_shows_background_but_fallback_remains() {
    let fx = Fixture::new();
    let canvas = fx.compositor().compose_layers(None).unwrap();

    assert!(close(canvas.get_pixel(60, 50).0, BG));
    assert!(close(canvas.get_pixel(117, 107).0, BG));
    assert!(!close(canvas.get_pixel(480, 100).0, BG));
}

#[test]
fn fallback_is_mirrored_sized_and_right_aligned() {
    let fx = Fixture::new();
    let canvas = fx.compositor().compose_layers(None).unwrap();
    let (x0, y0) = (405u32, 30u32);

    // Mirrored: the source's right half now sits on the left.
    assert!(close(canvas.get_pixel(x0 + 5, y0 + 70).0, RIGHT));
    assert!(close(canvas.get_pixel(x0 + 150, y0 + 70).0, LEFT));

    // 155x155 box with 40px right and 30px top margins.
    assert!(close(canvas.get_pixel(x0, y0).0, RIGHT));
    assert!(close(canvas.get_pixel(x0 + 154, y0 + 154).0, LEFT));
    assert!(close(canvas.get_pixel(x0 - 1, y0 + 70).0, BG));
    assert!(close(canvas.get_pixel(x0 + 155, y0 + 70).0, BG));
    assert!(close(canvas.get_pixel(x0 + 70, y0 - 1).0, BG));
    assert!(close(canvas.get_pixel(x0 + 70, y0 + 155).0, BG));
    assert_eq!(600 - (x0 + 155), 40);
}

#[test]
fn absent_overlay_leaves_canvas_untouched() {
    let fx = Fixture::new();
    let comp = fx.compositor();
    let before = comp.compose_layers(None).unwrap();
    let mut after = before.clone();
    comp.place_overlay(&mut after, 300).unwrap();
    assert_eq!(before, after);
}

#[test]
fn overlay_is_centred_below_the_text() {
    let fx = Fixture::new().with_overlay();
    let comp = fx.compositor();
    let mut canvas = comp.compose_layers(None).unwrap();
    comp.place_overlay(&mut canvas, 300).unwrap();

    // size 82 at x = (600 - 82) / 2 = 259, y = 300 - 15 = 285
    assert!(close(canvas.get_pixel(259, 285).0, OVERLAY));
    assert!(close(canvas.get_pixel(259 + 81, 285 + 81).0, OVERLAY));
    assert!(close(canvas.get_pixel(258, 300).0, BG));
    assert!(close(canvas.get_pixel(259 + 82, 300).0, BG));
    assert!(close(canvas.get_pixel(300, 284).0, BG));
}

#[test]
fn corrupt_overlay_is_an_error() {
    let fx = Fixture::new();
    std::fs::write(&fx.assets.overlay, b"garbage").unwrap();
    let comp = fx.compositor();
    let mut canvas = RgbaImage::new(600, 400);
    assert!(comp.place_overlay(&mut canvas, 300).is_err());
}

#[test]
fn missing_background_fails_generation_without_output() {
    let fx = Fixture::new();
    std::fs::remove_file(&fx.assets.background).unwrap();
    let comp = fx.compositor();

    let res = comp.render_card(&member(), &FetchResult::NoAvatar);
    let CompositeResult::GenerationFailed(reason) = res else {
        panic!("expected failure");
    };
    assert!(reason.contains("bg.png"));
    assert!(!comp.output_path(MemberId(1234)).exists());
}

#[test]
fn output_path_is_named_by_member_id() {
    let comp = Compositor::new(AssetPaths::default(), "/tmp/cards");
    assert_eq!(
        comp.output_path(MemberId(42)),
        Path::new("/tmp/cards/welcome_42.png")
    );
}

#[test]
fn render_card_writes_png_with_local_font_if_present() {
    if crate::test_support::system_font_path().is_none() {
        return;
    }
    let fx = Fixture::new().with_overlay();
    let comp = fx.compositor();
    let avatar = RgbaImage::from_pixel(64, 64, Rgba(RED));

    let res = comp.render_card(&member(), &FetchResult::Avatar(avatar));
    let CompositeResult::Generated(path) = res else {
        panic!("expected a generated card, got {res:?}");
    };
    assert_eq!(path, comp.output_path(MemberId(1234)));

    let written = image::open(&path).unwrap().to_rgba8();
    assert_eq!(written.dimensions(), (600, 400));
    assert!(close(written.get_pixel(60, 50).0, RED));
}
