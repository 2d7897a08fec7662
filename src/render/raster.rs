use crate::{
    assets::{decode::Bitmap, fonts},
    foundation::{
        error::{PosterError, PosterResult},
        geom::{BezPath, Canvas, Point, PxRect},
    },
    text::shaper::ShapedLine,
};

/// A `vello_cpu` drawing surface sized to one poster canvas.
pub(crate) struct RasterTarget {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
}

impl RasterTarget {
    pub(crate) fn new(canvas: Canvas) -> PosterResult<Self> {
        if canvas.is_empty() {
            return Err(PosterError::rendering_unsupported(
                "canvas width/height must be > 0",
            ));
        }
        let width: u16 = canvas.width.try_into().map_err(|_| {
            PosterError::rendering_unsupported(format!(
                "canvas width {} exceeds rasterizer limit {}",
                canvas.width,
                u16::MAX
            ))
        })?;
        let height: u16 = canvas.height.try_into().map_err(|_| {
            PosterError::rendering_unsupported(format!(
                "canvas height {} exceeds rasterizer limit {}",
                canvas.height,
                u16::MAX
            ))
        })?;

        Ok(Self {
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
        })
    }

    /// Stretch `bitmap` so it exactly covers `dest`.
    pub(crate) fn draw_bitmap(&mut self, bitmap: &Bitmap, dest: PxRect) -> PosterResult<()> {
        let paint = bitmap_paint(bitmap)?;
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint_transform(stretch_transform(bitmap, dest));
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            dest.x,
            dest.y,
            dest.x + dest.width,
            dest.y + dest.height,
        ));
        Ok(())
    }

    /// Stretch `bitmap` over `dest` but only paint the inside of `mask`.
    pub(crate) fn draw_bitmap_masked(
        &mut self,
        bitmap: &Bitmap,
        dest: PxRect,
        mask: &BezPath,
    ) -> PosterResult<()> {
        let paint = bitmap_paint(bitmap)?;
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint_transform(stretch_transform(bitmap, dest));
        self.ctx.set_paint(paint);
        self.ctx.fill_path(&bezpath_to_cpu(mask));
        Ok(())
    }

    /// Draw a shaped line with its top-left corner at `origin`.
    pub(crate) fn draw_text_line(&mut self, line: &ShapedLine, origin: Point) {
        let font = fonts::font_data(line.weight);
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        for layout_line in line.layout.lines() {
            for item in layout_line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    /// Rasterize everything drawn so far and return premultiplied RGBA8.
    pub(crate) fn finish(mut self) -> PosterResult<Bitmap> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        Bitmap::from_premul(
            u32::from(self.width),
            u32::from(self.height),
            pixmap.data_as_u8_slice().to_vec(),
        )
    }
}

/// Paint-space transform mapping bitmap pixels onto `dest`.
fn stretch_transform(bitmap: &Bitmap, dest: PxRect) -> vello_cpu::kurbo::Affine {
    let sx = dest.width / f64::from(bitmap.width);
    let sy = dest.height / f64::from(bitmap.height);
    vello_cpu::kurbo::Affine::translate((dest.x, dest.y))
        * vello_cpu::kurbo::Affine::scale_non_uniform(sx, sy)
}

fn bitmap_paint(bitmap: &Bitmap) -> PosterResult<vello_cpu::Image> {
    let pixmap = premul_bytes_to_pixmap(bitmap.rgba8_premul.as_slice(), bitmap.width, bitmap.height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(std::sync::Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> PosterResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PosterError::rendering_unsupported("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PosterError::rendering_unsupported("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(PosterError::rendering_unsupported(
            "image byte length mismatch",
        ));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let p = |pt: kurbo::Point| vello_cpu::kurbo::Point::new(pt.x, pt.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p0) => out.move_to(p(p0)),
            PathEl::LineTo(p0) => out.line_to(p(p0)),
            PathEl::QuadTo(p1, p2) => out.quad_to(p(p1), p(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(p(p1), p(p2), p(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
