use std::path::Path;

use anyhow::Context as _;

use crate::foundation::{
    error::{PosterError, PosterResult},
    geom::{Canvas, PhotoFrame, PxRect},
};

/// Which bundled face a piece of text is set in.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    Regular,
    #[default]
    Bold,
}

/// Styling for the user's name inside [`PosterLayout::name_box`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NameStyle {
    pub font_size_px: f32,
    /// Fixed distance between stacked line centers.
    pub line_height_px: f32,
    /// Horizontal inset applied on both sides before wrapping.
    #[serde(default)]
    pub padding_x_px: f32,
    pub color_rgba8: [u8; 4],
    #[serde(default)]
    pub weight: FontWeight,
}

/// A fixed line of text painted into the built-in template artwork.
///
/// Anchored like a canvas `fillText` with centered alignment: `center_x` is the horizontal
/// middle of the line and `baseline_y` its alphabetic baseline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Caption {
    pub text: String,
    pub center_x: f64,
    pub baseline_y: f64,
    pub font_size_px: f32,
    pub color_rgba8: [u8; 4],
    #[serde(default)]
    pub weight: FontWeight,
}

/// Procedural artwork used when no template file is supplied: a diagonal gradient from the
/// top-left to the bottom-right corner, with captions on top.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BuiltinArtwork {
    pub gradient_from_rgb8: [u8; 3],
    pub gradient_to_rgb8: [u8; 3],
    #[serde(default)]
    pub captions: Vec<Caption>,
}

impl Default for BuiltinArtwork {
    fn default() -> Self {
        Self {
            gradient_from_rgb8: [32, 32, 32],
            gradient_to_rgb8: [64, 64, 64],
            captions: Vec::new(),
        }
    }
}

/// Where the photo and the name go on a poster of a given size.
///
/// Layouts are plain configuration: a new template is a new `PosterLayout` value (a preset or
/// a JSON file), never a new code path. Call [`PosterLayout::validate`] after building one by
/// hand; the JSON loaders do it for you.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PosterLayout {
    pub name: String,
    pub canvas: Canvas,
    pub photo: PhotoFrame,
    pub name_box: PxRect,
    pub name_style: NameStyle,
    #[serde(default)]
    pub artwork: BuiltinArtwork,
    /// Identifies the event in download file names, e.g. `n8n-workshop`.
    pub event_slug: String,
}

impl PosterLayout {
    pub fn validate(&self) -> PosterResult<()> {
        if self.name.trim().is_empty() {
            return Err(PosterError::layout("layout name must be non-empty"));
        }
        if self.canvas.is_empty() {
            return Err(PosterError::layout("canvas width/height must be > 0"));
        }

        let photo = self.photo.rect;
        if photo.is_degenerate() {
            return Err(PosterError::layout(
                "photo rect must be finite with positive size",
            ));
        }
        if !photo.fits_within(self.canvas) {
            return Err(PosterError::layout("photo rect must lie within the canvas"));
        }
        let r = self.photo.corner_radius;
        if !r.is_finite() || r < 0.0 || r > self.photo.max_corner_radius() {
            return Err(PosterError::layout(format!(
                "photo corner radius must be in [0, {}]",
                self.photo.max_corner_radius()
            )));
        }

        if self.name_box.is_degenerate() {
            return Err(PosterError::layout(
                "name box must be finite with positive size",
            ));
        }
        if !self.name_box.fits_within(self.canvas) {
            return Err(PosterError::layout("name box must lie within the canvas"));
        }
        if photo.overlaps(self.name_box) {
            return Err(PosterError::layout("photo rect and name box must not overlap"));
        }

        let style = &self.name_style;
        if !style.font_size_px.is_finite() || style.font_size_px <= 0.0 {
            return Err(PosterError::layout("name font size must be finite and > 0"));
        }
        if !style.line_height_px.is_finite() || style.line_height_px <= 0.0 {
            return Err(PosterError::layout(
                "name line height must be finite and > 0",
            ));
        }
        if !style.padding_x_px.is_finite() || style.padding_x_px < 0.0 {
            return Err(PosterError::layout("name padding must be finite and >= 0"));
        }
        if self.available_text_width() <= 0.0 {
            return Err(PosterError::layout(
                "name padding leaves no room for text",
            ));
        }

        for caption in &self.artwork.captions {
            if !caption.font_size_px.is_finite() || caption.font_size_px <= 0.0 {
                return Err(PosterError::layout(format!(
                    "caption '{}' font size must be finite and > 0",
                    caption.text
                )));
            }
            if !caption.center_x.is_finite() || !caption.baseline_y.is_finite() {
                return Err(PosterError::layout(format!(
                    "caption '{}' anchor must be finite",
                    caption.text
                )));
            }
        }

        let slug_ok = !self.event_slug.is_empty()
            && self
                .event_slug
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !slug_ok {
            return Err(PosterError::layout(
                "event slug must be non-empty ASCII alphanumerics, '-' or '_'",
            ));
        }

        Ok(())
    }

    /// Width left for a line of name text once the horizontal padding is taken off.
    pub fn available_text_width(&self) -> f64 {
        self.name_box.width - 2.0 * f64::from(self.name_style.padding_x_px)
    }

    pub fn from_json_str(s: &str) -> PosterResult<Self> {
        let layout: Self = serde_json::from_str(s)
            .map_err(|e| PosterError::serde(format!("parse layout JSON: {e}")))?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn from_path(path: impl AsRef<Path>) -> PosterResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read layout '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn to_json_pretty(&self) -> PosterResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PosterError::serde(format!("serialize layout: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/config.rs"]
mod tests;
