use std::io::Cursor;

use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let src_rgba = vec![100u8, 50u8, 200u8, 128u8];
    let img = image::RgbaImage::from_raw(1, 1, src_rgba).unwrap();

    let bitmap = decode_image(&png_bytes(img)).unwrap();
    assert_eq!(bitmap.width, 1);
    assert_eq!(bitmap.height, 1);
    assert_eq!(
        bitmap.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn photo_decode_rejects_garbage_and_empty_bytes() {
    assert!(matches!(
        Photo::decode(b"definitely not an image"),
        Err(PosterError::PhotoDecode(_))
    ));
    assert!(matches!(Photo::decode(&[]), Err(PosterError::PhotoDecode(_))));
}

#[test]
fn photo_decode_rejects_truncated_png() {
    let bytes = png_bytes(image::RgbaImage::from_pixel(
        8,
        8,
        image::Rgba([1, 2, 3, 255]),
    ));
    let truncated = &bytes[..bytes.len() / 2];
    assert!(matches!(
        Photo::decode(truncated),
        Err(PosterError::PhotoDecode(_))
    ));
}

#[test]
fn photo_decode_reports_dimensions() {
    let bytes = png_bytes(image::RgbaImage::from_pixel(
        7,
        3,
        image::Rgba([9, 9, 9, 255]),
    ));
    let photo = Photo::decode(&bytes).unwrap();
    assert_eq!((photo.width(), photo.height()), (7, 3));
}

#[test]
fn opaque_pixels_survive_premul_round_trip() {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 200, 30, 255]));
    let bitmap = Bitmap::from_rgba_image(img.clone()).unwrap();
    assert_eq!(bitmap.to_rgba_image().unwrap(), img);
}

#[test]
fn flatten_opaque_forces_alpha() {
    let img = image::RgbaImage::from_pixel(1, 1, image::Rgba([200, 100, 50, 0]));
    let mut bitmap = Bitmap::from_rgba_image(img).unwrap();
    bitmap.flatten_opaque();
    assert_eq!(bitmap.rgba8_premul.as_slice(), &[0, 0, 0, 255]);
}

#[test]
fn from_premul_checks_lengths() {
    assert!(Bitmap::from_premul(2, 2, vec![0; 15]).is_err());
    assert!(Bitmap::from_premul(0, 2, vec![]).is_err());
    assert!(Bitmap::from_premul(1, 1, vec![0; 4]).is_ok());
}
