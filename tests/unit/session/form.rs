use std::io::Cursor;

use super::*;
use crate::{
    assets::template::TemplateSource,
    foundation::geom::{Canvas, PhotoFrame, PxRect},
    layout::presets::LayoutPreset,
};

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([10, 200, 30, 255]));
    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .unwrap();
    out
}

fn small_compositor() -> Compositor {
    let mut l = LayoutPreset::Workshop.layout();
    l.canvas = Canvas::new(100, 120);
    l.photo = PhotoFrame::new(PxRect::new(25.0, 10.0, 50.0, 50.0), 25.0);
    l.name_box = PxRect::new(5.0, 70.0, 90.0, 40.0);
    l.name_style.font_size_px = 10.0;
    l.name_style.line_height_px = 12.0;
    l.name_style.padding_x_px = 4.0;
    l.artwork.captions.clear();
    Compositor::new(l, TemplateSource::Builtin).unwrap()
}

#[test]
fn name_is_truncated_to_the_limit() {
    let mut s = PosterSession::new();
    s.set_name(&"é".repeat(60));
    assert_eq!(s.name().chars().count(), 50);
    assert_eq!(s.name_counter(), "(50/50 characters)");

    s.set_name("Ada");
    assert_eq!(s.name_counter(), "(3/50 characters)");
}

#[test]
fn photo_checks_run_type_then_size_then_decode() {
    let mut s = PosterSession::with_limits(InputLimits {
        max_photo_bytes: 16,
        ..InputLimits::default()
    });

    let err = s.load_photo(&[0u8; 64], "application/pdf").unwrap_err();
    assert_eq!(notification(&err), "Please select an image file");

    let err = s.load_photo(&[0u8; 64], "image/png").unwrap_err();
    assert!(matches!(err, PosterError::InvalidInput(_)));
    assert!(notification(&err).starts_with("Image size should be less than"));

    let err = s.load_photo(&[0u8; 8], "image/png").unwrap_err();
    assert!(matches!(err, PosterError::PhotoDecode(_)));
    assert!(s.photo().is_none());
}

#[test]
fn failed_upload_keeps_previous_photo() {
    let mut s = PosterSession::new();
    s.load_photo(&png_bytes(3, 2), "image/png").unwrap();
    assert!(s.load_photo(b"not an image", "image/jpeg").is_err());
    assert_eq!(s.photo().map(|p| (p.width(), p.height())), Some((3, 2)));
}

#[test]
fn media_type_check_is_case_insensitive() {
    let limits = InputLimits::default();
    assert!(limits.accepts_media_type("IMAGE/PNG"));
    assert!(limits.accepts_media_type(" image/webp"));
    assert!(!limits.accepts_media_type("text/plain"));
    assert!(!limits.accepts_media_type(""));
}

#[test]
fn generate_requires_name_then_photo() {
    let c = small_compositor();
    let mut s = PosterSession::new();
    assert!(!s.can_generate());

    s.set_name("   ");
    let err = s.generate(&c).unwrap_err();
    assert_eq!(notification(&err), "Please enter your name");

    s.set_name("Ada");
    let err = s.generate(&c).unwrap_err();
    assert_eq!(notification(&err), "Please upload a photo");

    s.load_photo(&png_bytes(4, 4), "image/png").unwrap();
    assert!(s.can_generate());
    s.remove_photo();
    assert!(!s.can_generate());
}

#[test]
fn generate_then_download_uses_event_file_name() {
    let c = small_compositor();
    let mut s = PosterSession::new();
    assert!(s.download().is_err());

    s.set_name("  Ada Lovelace ");
    s.load_photo(&png_bytes(4, 4), "image/png").unwrap();
    let poster = s.generate(&c).unwrap();
    assert_eq!((poster.width, poster.height), (100, 120));

    let (file_name, bytes) = s.download().unwrap();
    assert_eq!(file_name, "Ada-Lovelace-n8n-workshop-poster.png");
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn reset_clears_everything_but_limits() {
    let c = small_compositor();
    let mut s = PosterSession::new();
    s.set_name("Ada");
    s.load_photo(&png_bytes(4, 4), "image/png").unwrap();
    s.generate(&c).unwrap();

    s.reset();
    assert_eq!(s.name(), "");
    assert!(s.photo().is_none());
    assert!(s.output().is_none());
    assert_eq!(s.limits(), &InputLimits::default());
}

#[test]
fn failed_generate_keeps_inputs() {
    let broken = Compositor::new(
        small_compositor().layout().clone(),
        TemplateSource::Raster(std::sync::Arc::new(b"broken".to_vec())),
    )
    .unwrap();
    let mut s = PosterSession::new();
    s.set_name("Ada");
    s.load_photo(&png_bytes(4, 4), "image/png").unwrap();

    let err = s.generate(&broken).unwrap_err();
    assert!(!err.is_caller_error());
    assert_eq!(notification(&err), "Failed to generate poster. Please try again.");
    assert_eq!(s.name(), "Ada");
    assert!(s.photo().is_some());
    assert!(s.output().is_none());
}

#[test]
fn file_names_drop_path_hostile_characters() {
    assert_eq!(
        download_file_name("Ada Lovelace", "n8n-workshop"),
        "Ada-Lovelace-n8n-workshop-poster.png"
    );
    assert_eq!(
        download_file_name("  a/b \t c:d  ", "ev"),
        "ab-cd-ev-poster.png"
    );
    assert_eq!(download_file_name("../..", "ev"), "ev-poster.png");
    assert_eq!(download_file_name("José", "ev"), "José-ev-poster.png");
}

#[test]
fn success_notices_are_stable() {
    assert_eq!(Notice::PhotoUploaded.message(), "Photo uploaded successfully!");
    assert_eq!(Notice::PosterDownloaded.message(), "Poster downloaded!");
}

#[test]
fn file_name_extension_matches_encoded_poster() {
    let name = download_file_name("Ada", "ev");
    assert!(name.ends_with(&format!("-poster.{}", EncodedPoster::EXTENSION)));
}
