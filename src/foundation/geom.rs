use kurbo::Shape as _;

pub use kurbo::{Affine, BezPath, Point, Rect, RoundedRect};

/// Flattening tolerance used when turning rounded rectangles into paths.
const PATH_TOLERANCE: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Axis-aligned rectangle in canvas pixels, top-left anchored.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PxRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PxRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn to_kurbo(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn center(self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Non-finite coordinates or a non-positive side.
    pub fn is_degenerate(self) -> bool {
        let finite = [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite());
        !finite || self.width <= 0.0 || self.height <= 0.0
    }

    pub fn fits_within(self, canvas: Canvas) -> bool {
        let outer = canvas.rect();
        let r = self.to_kurbo();
        r.x0 >= outer.x0 && r.y0 >= outer.y0 && r.x1 <= outer.x1 && r.y1 <= outer.y1
    }

    /// Whether the two rectangles share a region of positive area. Touching edges do not count.
    pub fn overlaps(self, other: PxRect) -> bool {
        let i = self.to_kurbo().intersect(other.to_kurbo());
        i.width() > 0.0 && i.height() > 0.0
    }
}

/// Photo slot: a rectangle whose corners are rounded by `corner_radius`.
///
/// A radius of half the shorter side turns a square slot into a circle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhotoFrame {
    #[serde(flatten)]
    pub rect: PxRect,
    #[serde(default)]
    pub corner_radius: f64,
}

impl PhotoFrame {
    pub fn new(rect: PxRect, corner_radius: f64) -> Self {
        Self {
            rect,
            corner_radius,
        }
    }

    pub fn max_corner_radius(self) -> f64 {
        self.rect.width.min(self.rect.height) * 0.5
    }

    pub fn rounded_rect(self) -> RoundedRect {
        RoundedRect::from_rect(self.rect.to_kurbo(), self.corner_radius)
    }

    pub fn to_path(self) -> BezPath {
        self.rounded_rect().to_path(PATH_TOLERANCE)
    }

    /// Whether `p` lies inside the rounded shape (not just its bounding box).
    pub fn contains(self, p: Point) -> bool {
        self.rounded_rect().contains(p)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/geom.rs"]
mod tests;
