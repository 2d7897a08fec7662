use std::sync::{Arc, Mutex, OnceLock};

use crate::{
    assets::{
        decode::{Bitmap, Photo},
        template::{TemplateSource, prepare_template},
    },
    foundation::{
        error::PosterResult,
        geom::{Point, PxRect},
    },
    layout::{
        config::{FontWeight, PosterLayout},
        presets::LayoutPreset,
    },
    render::{
        encode::{EncodedPoster, encode_bitmap},
        raster::RasterTarget,
    },
    text::{
        shaper::{TextBrushRgba8, TextShaper},
        wrap::{MeasureText, stack_line_centers, wrap_words},
    },
};

/// One line of the wrapped name and where it goes on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct NameLine {
    pub text: String,
    /// Measured advance width in pixels.
    pub width: f32,
    /// Center of the line box in canvas coordinates.
    pub center: Point,
}

/// How a name is broken into lines inside the name box.
#[derive(Clone, Debug, PartialEq)]
pub struct NameLayout {
    pub lines: Vec<NameLine>,
    /// Width each line must fit in (name box width minus padding).
    pub max_width: f32,
    pub line_height: f32,
}

impl NameLayout {
    /// Lines whose width exceeds `max_width`. Only single-word lines can end up here.
    pub fn overflowing(&self) -> impl Iterator<Item = &NameLine> {
        self.lines.iter().filter(|l| l.width > self.max_width)
    }
}

struct ShaperMeasure<'a> {
    shaper: &'a mut TextShaper,
    weight: FontWeight,
    size_px: f32,
}

impl MeasureText for ShaperMeasure<'_> {
    fn measure(&mut self, text: &str) -> PosterResult<f32> {
        self.shaper.measure(text, self.weight, self.size_px)
    }
}

/// Composites a photo and a name onto one template layout.
///
/// The template is prepared on first use and reused read-only afterwards; a failed
/// preparation is not cached, so the next call retries it.
pub struct Compositor {
    layout: PosterLayout,
    source: TemplateSource,
    template: Mutex<Option<Arc<Bitmap>>>,
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("layout", &self.layout.name)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl Compositor {
    /// Validate `layout` and build a compositor for it.
    pub fn new(layout: PosterLayout, source: TemplateSource) -> PosterResult<Self> {
        layout.validate()?;
        Ok(Self::new_unchecked(layout, source))
    }

    /// Compositor for a built-in layout with its built-in artwork.
    pub fn preset(preset: LayoutPreset) -> Self {
        Self::new_unchecked(preset.layout(), TemplateSource::Builtin)
    }

    fn new_unchecked(layout: PosterLayout, source: TemplateSource) -> Self {
        Self {
            layout,
            source,
            template: Mutex::new(None),
        }
    }

    pub fn layout(&self) -> &PosterLayout {
        &self.layout
    }

    /// Prepared template pixels (premultiplied, opaque, native size).
    pub fn template(&self) -> PosterResult<Arc<Bitmap>> {
        let mut slot = self
            .template
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(t) = slot.as_ref() {
            return Ok(Arc::clone(t));
        }
        let prepared = Arc::new(prepare_template(&self.source, &self.layout)?);
        *slot = Some(Arc::clone(&prepared));
        Ok(prepared)
    }

    /// Break `name` into centered lines for the name box.
    pub fn layout_name(&self, name: &str) -> PosterResult<NameLayout> {
        let mut shaper = TextShaper::new();
        self.layout_name_with(&mut shaper, name)
    }

    fn layout_name_with(&self, shaper: &mut TextShaper, name: &str) -> PosterResult<NameLayout> {
        let style = &self.layout.name_style;
        let max_width = self.layout.available_text_width() as f32;

        let mut measure = ShaperMeasure {
            shaper,
            weight: style.weight,
            size_px: style.font_size_px,
        };
        let texts = wrap_words(name, max_width, &mut measure)?;

        let centers = stack_line_centers(
            texts.len(),
            f64::from(style.line_height_px),
            self.layout.name_box,
        );
        let mut lines = Vec::with_capacity(texts.len());
        for (text, center) in texts.into_iter().zip(centers) {
            let width = measure.measure(&text)?;
            lines.push(NameLine {
                text,
                width,
                center,
            });
        }

        Ok(NameLayout {
            lines,
            max_width,
            line_height: style.line_height_px,
        })
    }

    /// Composite and return straight-alpha pixels without encoding.
    pub fn render(&self, name: &str, photo: &Photo) -> PosterResult<image::RgbaImage> {
        self.render_bitmap(name, photo)?.to_rgba_image()
    }

    /// Composite `photo` and `name` onto the template and encode the result as PNG.
    ///
    /// The caller is expected to pass a non-empty, trimmed name; a blank name simply draws no
    /// text. Either a complete image or an error comes back, never a partial image.
    #[tracing::instrument(skip(self, photo), fields(layout = %self.layout.name))]
    pub fn generate(&self, name: &str, photo: &Photo) -> PosterResult<EncodedPoster> {
        let bitmap = self.render_bitmap(name, photo)?;
        let poster = encode_bitmap(&bitmap)?;
        tracing::info!(
            width = poster.width,
            height = poster.height,
            bytes = poster.png.len(),
            "poster generated"
        );
        Ok(poster)
    }

    fn render_bitmap(&self, name: &str, photo: &Photo) -> PosterResult<Bitmap> {
        let layout = &self.layout;
        let mut target = RasterTarget::new(layout.canvas)?;
        let template = self.template()?;

        let full = PxRect::new(
            0.0,
            0.0,
            f64::from(layout.canvas.width),
            f64::from(layout.canvas.height),
        );
        target.draw_bitmap(&template, full)?;
        tracing::debug!("template drawn");

        target.draw_bitmap_masked(photo.bitmap(), layout.photo.rect, &layout.photo.to_path())?;
        tracing::debug!(
            photo_w = photo.width(),
            photo_h = photo.height(),
            "photo drawn"
        );

        let mut shaper = TextShaper::new();
        let name_layout = self.layout_name_with(&mut shaper, name)?;
        let style = &layout.name_style;
        let brush = TextBrushRgba8::from_array(style.color_rgba8);
        for line in &name_layout.lines {
            let shaped = shaper.shape_line(&line.text, style.weight, style.font_size_px, brush)?;
            let origin = Point::new(
                line.center.x - f64::from(shaped.width) * 0.5,
                line.center.y - f64::from(shaped.height) * 0.5,
            );
            target.draw_text_line(&shaped, origin);
        }
        tracing::debug!(lines = name_layout.lines.len(), "name drawn");

        let mut out = target.finish()?;
        // The template is opaque, so this only clears rounding noise in alpha.
        out.flatten_opaque();
        Ok(out)
    }
}

fn default_compositor() -> &'static Compositor {
    static DEFAULT: OnceLock<Compositor> = OnceLock::new();
    DEFAULT.get_or_init(|| Compositor::preset(LayoutPreset::Workshop))
}

/// Generate a poster with the default layout (the `workshop` preset and its built-in
/// artwork).
///
/// The name must be non-empty after trimming; enforcing that (and that a photo was supplied
/// at all) is the caller's job, see [`crate::PosterSession`].
pub fn generate_poster(name: &str, photo: &Photo) -> PosterResult<EncodedPoster> {
    default_compositor().generate(name, photo)
}

/// Decode `photo_bytes` and generate a poster with the default layout.
pub fn generate_poster_from_bytes(name: &str, photo_bytes: &[u8]) -> PosterResult<EncodedPoster> {
    let photo = Photo::decode(photo_bytes)?;
    generate_poster(name, &photo)
}

impl Default for Compositor {
    fn default() -> Self {
        Self::preset(LayoutPreset::Workshop)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
