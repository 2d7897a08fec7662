use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::error::{PosterError, PosterResult};

/// Largest side the rasterizer accepts for an image paint.
pub(crate) const MAX_BITMAP_DIM: u32 = u16::MAX as u32;

/// Decoded pixels, premultiplied RGBA8, tightly packed, row-major.
#[derive(Clone, Debug)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl Bitmap {
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> PosterResult<Self> {
        if width == 0 || height == 0 {
            return Err(PosterError::invalid_input("bitmap must not be empty"));
        }
        if rgba8_premul.len() != width as usize * height as usize * 4 {
            return Err(PosterError::invalid_input("bitmap byte length mismatch"));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    pub fn from_rgba_image(img: image::RgbaImage) -> PosterResult<Self> {
        let (width, height) = img.dimensions();
        let mut rgba = img.into_raw();
        premultiply_rgba8_in_place(&mut rgba);
        Self::from_premul(width, height, rgba)
    }

    /// Straight-alpha copy, for inspection and encoding.
    pub fn to_rgba_image(&self) -> PosterResult<image::RgbaImage> {
        let mut rgba = self.rgba8_premul.as_ref().clone();
        unpremultiply_rgba8_in_place(&mut rgba);
        image::RgbaImage::from_raw(self.width, self.height, rgba)
            .ok_or_else(|| PosterError::invalid_input("bitmap byte length mismatch"))
    }

    /// Composite over opaque black, leaving every pixel fully opaque.
    ///
    /// With premultiplied storage this only needs alpha forced to 255.
    pub(crate) fn flatten_opaque(&mut self) {
        let data = Arc::make_mut(&mut self.rgba8_premul);
        for px in data.chunks_exact_mut(4) {
            px[3] = 255;
        }
    }
}

/// Decode PNG/JPEG/WebP/... bytes into a premultiplied bitmap.
///
/// Images with a side beyond what the rasterizer can sample are downscaled (aspect kept) to
/// fit; this is deterministic for a given input.
pub fn decode_image(bytes: &[u8]) -> anyhow::Result<Bitmap> {
    anyhow::ensure!(!bytes.is_empty(), "image bytes are empty");
    let mut dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    if dyn_img.width() > MAX_BITMAP_DIM || dyn_img.height() > MAX_BITMAP_DIM {
        tracing::debug!(
            width = dyn_img.width(),
            height = dyn_img.height(),
            "downscaling oversized image"
        );
        dyn_img = dyn_img.resize(
            MAX_BITMAP_DIM,
            MAX_BITMAP_DIM,
            image::imageops::FilterType::Triangle,
        );
    }
    let rgba = dyn_img.to_rgba8();
    Bitmap::from_rgba_image(rgba).map_err(anyhow::Error::new)
}

/// The user's photo, decoded and ready to draw.
#[derive(Clone, Debug)]
pub struct Photo {
    bitmap: Bitmap,
}

impl Photo {
    /// Decode encoded image bytes. Anything that is not a decodable raster image (including a
    /// zero-byte file) is a [`PosterError::PhotoDecode`].
    pub fn decode(bytes: &[u8]) -> PosterResult<Self> {
        let bitmap = decode_image(bytes).map_err(|e| PosterError::photo_decode(format!("{e:#}")))?;
        Ok(Self { bitmap })
    }

    pub fn from_rgba_image(img: image::RgbaImage) -> PosterResult<Self> {
        Ok(Self {
            bitmap: Bitmap::from_rgba_image(img)?,
        })
    }

    pub fn width(&self) -> u32 {
        self.bitmap.width
    }

    pub fn height(&self) -> u32 {
        self.bitmap.height
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
