use std::collections::HashMap;

use crate::{
    assets::fonts,
    foundation::error::{PosterError, PosterResult},
    layout::config::FontWeight,
};

/// RGBA8 brush carried through Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl TextBrushRgba8 {
    pub fn from_array([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

/// One unbroken line of shaped text.
///
/// Glyph positions are relative to the line's top-left corner.
pub struct ShapedLine {
    pub layout: parley::Layout<TextBrushRgba8>,
    pub weight: FontWeight,
    /// Advance width of the whole line.
    pub width: f32,
    /// Height of the line box (ascent + descent + leading).
    pub height: f32,
    /// Distance from the top of the line box to the alphabetic baseline.
    pub baseline: f32,
}

struct RegisteredFace {
    font_ctx: parley::FontContext,
    family: String,
}

/// Shapes and measures single lines of text with the bundled fonts.
///
/// Each weight gets its own font context holding exactly one face, so the face Parley picks
/// is always the face the rasterizer draws with.
pub struct TextShaper {
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    faces: HashMap<FontWeight, RegisteredFace>,
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper {
    pub fn new() -> Self {
        Self {
            layout_ctx: parley::LayoutContext::new(),
            faces: HashMap::new(),
        }
    }

    /// Family name resolved for `weight`, registering the face on first use.
    pub fn family_name(&mut self, weight: FontWeight) -> PosterResult<String> {
        Ok(self.face(weight)?.family.clone())
    }

    fn face(&mut self, weight: FontWeight) -> PosterResult<&mut RegisteredFace> {
        if !self.faces.contains_key(&weight) {
            let mut font_ctx = parley::FontContext::default();
            let families = font_ctx.collection.register_fonts(
                parley::fontique::Blob::from(fonts::font_bytes(weight).to_vec()),
                None,
            );
            let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
                PosterError::rendering_unsupported("no font families registered from font bytes")
            })?;
            let family = font_ctx
                .collection
                .family_name(family_id)
                .ok_or_else(|| {
                    PosterError::rendering_unsupported("registered font family has no name")
                })?
                .to_string();
            tracing::debug!(?weight, %family, "registered bundled font");
            self.faces
                .insert(weight, RegisteredFace { font_ctx, family });
        }
        self.faces
            .get_mut(&weight)
            .ok_or_else(|| PosterError::rendering_unsupported("font face missing after register"))
    }

    /// Shape `text` as a single line (no wrapping).
    pub fn shape_line(
        &mut self,
        text: &str,
        weight: FontWeight,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> PosterResult<ShapedLine> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(PosterError::invalid_input(
                "text size_px must be finite and > 0",
            ));
        }

        self.face(weight)?;
        let Self { layout_ctx, faces } = self;
        let face = faces
            .get_mut(&weight)
            .ok_or_else(|| PosterError::rendering_unsupported("font face missing"))?;

        let mut builder = layout_ctx.ranged_builder(&mut face.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(face.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(
            None,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );

        let baseline = layout
            .lines()
            .next()
            .map(|line| line.metrics().baseline)
            .unwrap_or(size_px);
        let width = layout.width();
        let height = layout.height();

        Ok(ShapedLine {
            layout,
            weight,
            width,
            height,
            baseline,
        })
    }

    /// Advance width of `text` on one line.
    pub fn measure(&mut self, text: &str, weight: FontWeight, size_px: f32) -> PosterResult<f32> {
        Ok(self
            .shape_line(text, weight, size_px, TextBrushRgba8::default())?
            .width)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/shaper.rs"]
mod tests;
