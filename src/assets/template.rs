use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;

use crate::{
    assets::{
        decode::{Bitmap, decode_image},
        fonts,
    },
    foundation::{
        error::{PosterError, PosterResult},
        geom::{Canvas, Point, PxRect},
    },
    layout::config::{BuiltinArtwork, PosterLayout},
    render::raster::RasterTarget,
    text::shaper::{TextBrushRgba8, TextShaper},
};

/// Where a compositor's background artwork comes from.
#[derive(Clone, Debug, Default)]
pub enum TemplateSource {
    /// Gradient plus captions described by [`PosterLayout::artwork`].
    #[default]
    Builtin,
    /// Encoded raster image (PNG, JPEG, ...).
    Raster(Arc<Vec<u8>>),
    /// SVG document, rasterized at canvas size.
    Svg(Arc<Vec<u8>>),
    /// File on disk; `.svg` is treated as SVG, anything else as a raster image.
    File(PathBuf),
}

impl TemplateSource {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }
}

/// Resolve `source` into opaque template pixels.
///
/// Every failure here is environmental (a missing or broken bundled asset), so it surfaces as
/// [`PosterError::RenderingUnsupported`].
pub fn prepare_template(source: &TemplateSource, layout: &PosterLayout) -> PosterResult<Bitmap> {
    let mut bitmap = match source {
        TemplateSource::Builtin => render_builtin(&layout.artwork, layout.canvas)?,
        TemplateSource::Raster(bytes) => decode_raster(bytes)?,
        TemplateSource::Svg(bytes) => rasterize_svg(bytes, layout.canvas, None)?,
        TemplateSource::File(path) => load_file(path, layout.canvas)?,
    };
    bitmap.flatten_opaque();
    tracing::debug!(
        width = bitmap.width,
        height = bitmap.height,
        "template prepared"
    );
    Ok(bitmap)
}

fn load_file(path: &Path, canvas: Canvas) -> PosterResult<Bitmap> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read template '{}'", path.display()))
        .map_err(|e| PosterError::rendering_unsupported(format!("{e:#}")))?;
    let is_svg = path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if is_svg {
        rasterize_svg(&bytes, canvas, path.parent())
    } else {
        decode_raster(&bytes)
    }
}

fn decode_raster(bytes: &[u8]) -> PosterResult<Bitmap> {
    decode_image(bytes)
        .context("decode template image")
        .map_err(|e| PosterError::rendering_unsupported(format!("{e:#}")))
}

fn rasterize_svg(bytes: &[u8], canvas: Canvas, resources_dir: Option<&Path>) -> PosterResult<Bitmap> {
    let opts = usvg::Options {
        resources_dir: resources_dir.map(Path::to_path_buf),
        fontdb: Arc::new(svg_fontdb()),
        ..Default::default()
    };
    let tree = usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| PosterError::rendering_unsupported(format!("parse svg template: {e}")))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
        .ok_or_else(|| PosterError::rendering_unsupported("failed to allocate svg pixmap"))?;

    // Stretch to the canvas like raster templates.
    let sx = (canvas.width as f32) / tree.size().width();
    let sy = (canvas.height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(&tree, xform, &mut pixmap.as_mut());
    Bitmap::from_premul(canvas.width, canvas.height, pixmap.data().to_vec())
}

/// Font database for SVG templates: the bundled faces only, so template text renders the
/// same on every host. `DejaVu Sans` is also the fallback for every generic family.
fn svg_fontdb() -> usvg::fontdb::Database {
    let mut db = usvg::fontdb::Database::new();
    fonts::load_into_fontdb(&mut db);
    db.set_sans_serif_family("DejaVu Sans");
    db.set_serif_family("DejaVu Sans");
    db.set_monospace_family("DejaVu Sans");
    db.set_cursive_family("DejaVu Sans");
    db.set_fantasy_family("DejaVu Sans");
    db
}

fn render_builtin(artwork: &BuiltinArtwork, canvas: Canvas) -> PosterResult<Bitmap> {
    let backdrop = diagonal_gradient(canvas, artwork.gradient_from_rgb8, artwork.gradient_to_rgb8)?;
    if artwork.captions.is_empty() {
        return Ok(backdrop);
    }

    let mut target = RasterTarget::new(canvas)?;
    let full = PxRect::new(0.0, 0.0, f64::from(canvas.width), f64::from(canvas.height));
    target.draw_bitmap(&backdrop, full)?;

    let mut shaper = TextShaper::new();
    for caption in &artwork.captions {
        let line = shaper.shape_line(
            &caption.text,
            caption.weight,
            caption.font_size_px,
            TextBrushRgba8::from_array(caption.color_rgba8),
        )?;
        let origin = Point::new(
            caption.center_x - f64::from(line.width) * 0.5,
            caption.baseline_y - f64::from(line.baseline),
        );
        target.draw_text_line(&line, origin);
    }
    target.finish()
}

/// Linear gradient along the canvas diagonal, matching a 2D canvas
/// `createLinearGradient(0, 0, width, height)`.
fn diagonal_gradient(canvas: Canvas, from: [u8; 3], to: [u8; 3]) -> PosterResult<Bitmap> {
    if canvas.is_empty() {
        return Err(PosterError::rendering_unsupported(
            "canvas width/height must be > 0",
        ));
    }
    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    let denom = w * w + h * h;

    let mut data = Vec::with_capacity(canvas.width as usize * canvas.height as usize * 4);
    for y in 0..canvas.height {
        for x in 0..canvas.width {
            let px = f64::from(x) + 0.5;
            let py = f64::from(y) + 0.5;
            let t = ((px * w + py * h) / denom).clamp(0.0, 1.0);
            for (&a, &b) in from.iter().zip(to.iter()) {
                let (a, b) = (f64::from(a), f64::from(b));
                data.push((a + (b - a) * t).round() as u8);
            }
            data.push(255);
        }
    }
    Bitmap::from_premul(canvas.width, canvas.height, data)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/template.rs"]
mod tests;
