use std::io::Cursor;

use super::*;

fn png_bytes(img: &RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_keeps_straight_alpha() {
    let src = RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();
    let decoded = decode_rgba(&png_bytes(&src)).unwrap();
    assert_eq!(decoded.dimensions(), (1, 1));
    assert_eq!(decoded.as_raw().as_slice(), &[100u8, 50, 200, 128]);
}

#[test]
fn decode_rgb_jpeg_becomes_opaque_rgba() {
    let rgb = image::RgbImage::from_pixel(4, 2, image::Rgb([10, 20, 30]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(rgb)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Jpeg)
        .unwrap();

    let decoded = decode_rgba(&buf).unwrap();
    assert_eq!(decoded.dimensions(), (4, 2));
    assert!(decoded.pixels().all(|p| p.0[3] == 255));
}

#[test]
fn decode_garbage_is_an_error() {
    assert!(decode_rgba(b"definitely not an image").is_err());
}

#[test]
fn load_missing_file_is_asset_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_rgba(&dir.path().join("nope.png")).unwrap_err();
    assert!(err.to_string().contains("asset error:"));
    assert!(err.to_string().contains("nope.png"));
}

#[test]
fn optional_load_distinguishes_absent_from_present() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("extra.png");
    assert!(load_optional_rgba(&path).unwrap().is_none());

    let img = RgbaImage::from_pixel(3, 3, image::Rgba([1, 2, 3, 4]));
    std::fs::write(&path, png_bytes(&img)).unwrap();
    let loaded = load_optional_rgba(&path).unwrap().unwrap();
    assert_eq!(loaded, img);
}
