use image::ImageEncoder as _;

use crate::{
    assets::decode::Bitmap,
    foundation::error::{PosterError, PosterResult},
};

/// A finished poster: PNG bytes plus the pixel size they decode to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedPoster {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

impl EncodedPoster {
    pub const MEDIA_TYPE: &'static str = "image/png";
    pub const EXTENSION: &'static str = "png";

    pub fn bytes(&self) -> &[u8] {
        &self.png
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.png
    }
}

/// Encode straight-alpha RGBA8 pixels as PNG.
pub fn encode_png(rgba8: &[u8], width: u32, height: u32) -> PosterResult<Vec<u8>> {
    if rgba8.len() != width as usize * height as usize * 4 {
        return Err(PosterError::encode(format!(
            "pixel buffer is {} bytes, expected {}x{}x4",
            rgba8.len(),
            width,
            height
        )));
    }

    let mut out = Vec::new();
    image::codecs::png::PngEncoder::new(&mut out)
        .write_image(rgba8, width, height, image::ExtendedColorType::Rgba8)
        .map_err(|e| PosterError::encode(format!("png: {e}")))?;
    Ok(out)
}

pub(crate) fn encode_bitmap(bitmap: &Bitmap) -> PosterResult<EncodedPoster> {
    let rgba = bitmap
        .to_rgba_image()
        .map_err(|e| PosterError::encode(e.to_string()))?;
    let png = encode_png(rgba.as_raw(), bitmap.width, bitmap.height)?;
    Ok(EncodedPoster {
        width: bitmap.width,
        height: bitmap.height,
        png,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/encode.rs"]
mod tests;
