use super::*;

#[test]
fn encodes_png_that_decodes_to_same_pixels() {
    let rgba: Vec<u8> = (0..3 * 2)
        .flat_map(|i| [i as u8 * 40, 255 - i as u8 * 40, 7, 255])
        .collect();
    let png = encode_png(&rgba, 3, 2).unwrap();

    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    let back = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (3, 2));
    assert_eq!(back.as_raw(), &rgba);
}

#[test]
fn rejects_mismatched_buffer() {
    assert!(matches!(
        encode_png(&[0u8; 10], 2, 2),
        Err(PosterError::Encode(_))
    ));
}

#[test]
fn encoding_is_deterministic() {
    let rgba = vec![12u8; 16 * 16 * 4];
    assert_eq!(
        encode_png(&rgba, 16, 16).unwrap(),
        encode_png(&rgba, 16, 16).unwrap()
    );
}

#[test]
fn bitmap_encoding_carries_dimensions() {
    let bitmap = Bitmap::from_premul(2, 1, vec![1, 2, 3, 255, 4, 5, 6, 255]).unwrap();
    let poster = encode_bitmap(&bitmap).unwrap();
    assert_eq!((poster.width, poster.height), (2, 1));
    assert_eq!(poster.bytes(), poster.clone().into_bytes().as_slice());
}

#[test]
fn media_type_matches_encoded_bytes() {
    let poster = encode_bitmap(&Bitmap::from_premul(1, 1, vec![0, 0, 0, 255]).unwrap()).unwrap();
    let format = image::guess_format(poster.bytes()).unwrap();
    assert_eq!(format.to_mime_type(), EncodedPoster::MEDIA_TYPE);
    assert!(format.extensions_str().contains(&EncodedPoster::EXTENSION));
}
