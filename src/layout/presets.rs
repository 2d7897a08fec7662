use crate::{
    foundation::geom::{Canvas, PhotoFrame, PxRect},
    layout::config::{BuiltinArtwork, Caption, FontWeight, NameStyle, PosterLayout},
};

const WHITE: [u8; 4] = [255, 255, 255, 255];
// hsl(45, 95%, 55%)
const ACCENT: [u8; 4] = [249, 195, 31, 255];
// hsl(200, 95%, 45%) -> hsl(185, 85%, 50%)
const GRADIENT_FROM: [u8; 3] = [6, 151, 224];
const GRADIENT_TO: [u8; 3] = [19, 218, 236];

const EVENT_SLUG: &str = "n8n-workshop";

/// Built-in layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutPreset {
    /// 800x1000 portrait poster with a circular photo.
    Workshop,
    /// 1080x1080 square poster with a rounded-rectangle photo.
    Square,
}

impl LayoutPreset {
    pub const ALL: [LayoutPreset; 2] = [LayoutPreset::Workshop, LayoutPreset::Square];

    pub fn name(self) -> &'static str {
        match self {
            LayoutPreset::Workshop => "workshop",
            LayoutPreset::Square => "square",
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    pub fn layout(self) -> PosterLayout {
        match self {
            LayoutPreset::Workshop => workshop(),
            LayoutPreset::Square => square(),
        }
    }
}

impl std::fmt::Display for LayoutPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn caption(text: &str, center_x: f64, baseline_y: f64, size: f32, weight: FontWeight) -> Caption {
    Caption {
        text: text.to_string(),
        center_x,
        baseline_y,
        font_size_px: size,
        color_rgba8: WHITE,
        weight,
    }
}

fn workshop() -> PosterLayout {
    PosterLayout {
        name: LayoutPreset::Workshop.name().to_string(),
        canvas: Canvas::new(800, 1000),
        photo: PhotoFrame::new(PxRect::new(250.0, 220.0, 300.0, 300.0), 150.0),
        name_box: PxRect::new(40.0, 550.0, 720.0, 150.0),
        name_style: NameStyle {
            font_size_px: 42.0,
            line_height_px: 52.0,
            padding_x_px: 24.0,
            color_rgba8: WHITE,
            weight: FontWeight::Bold,
        },
        artwork: BuiltinArtwork {
            gradient_from_rgb8: GRADIENT_FROM,
            gradient_to_rgb8: GRADIENT_TO,
            captions: vec![
                caption("N8N WORKSHOP", 400.0, 100.0, 48.0, FontWeight::Bold),
                caption("I'm Attending", 400.0, 160.0, 32.0, FontWeight::Regular),
                caption(
                    "The Student Spot & Founders Hub",
                    400.0,
                    750.0,
                    24.0,
                    FontWeight::Regular,
                ),
                Caption {
                    color_rgba8: ACCENT,
                    ..caption(
                        "Join us for an amazing workshop!",
                        400.0,
                        800.0,
                        20.0,
                        FontWeight::Regular,
                    )
                },
            ],
        },
        event_slug: EVENT_SLUG.to_string(),
    }
}

fn square() -> PosterLayout {
    PosterLayout {
        name: LayoutPreset::Square.name().to_string(),
        canvas: Canvas::new(1080, 1080),
        photo: PhotoFrame::new(PxRect::new(340.0, 230.0, 400.0, 400.0), 48.0),
        name_box: PxRect::new(90.0, 660.0, 900.0, 200.0),
        name_style: NameStyle {
            font_size_px: 56.0,
            line_height_px: 68.0,
            padding_x_px: 40.0,
            color_rgba8: WHITE,
            weight: FontWeight::Bold,
        },
        artwork: BuiltinArtwork {
            gradient_from_rgb8: GRADIENT_FROM,
            gradient_to_rgb8: GRADIENT_TO,
            captions: vec![
                caption("N8N WORKSHOP", 540.0, 120.0, 60.0, FontWeight::Bold),
                caption("I'm Attending", 540.0, 185.0, 38.0, FontWeight::Regular),
                caption(
                    "The Student Spot & Founders Hub",
                    540.0,
                    930.0,
                    32.0,
                    FontWeight::Regular,
                ),
                Caption {
                    color_rgba8: ACCENT,
                    ..caption(
                        "Join us for an amazing workshop!",
                        540.0,
                        985.0,
                        26.0,
                        FontWeight::Regular,
                    )
                },
            ],
        },
        event_slug: EVENT_SLUG.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/presets.rs"]
mod tests;
