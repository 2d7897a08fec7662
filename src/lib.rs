//! Posterkit composites personalized event posters.
//!
//! A poster is a fixed template with the attendee's photo clipped into a rounded frame and
//! their name word-wrapped and centered in a text box, encoded as PNG:
//!
//! - Describe where things go with a [`PosterLayout`] (or pick a [`LayoutPreset`])
//! - Build a [`Compositor`] for it and call [`Compositor::generate`]
//! - Or drive the whole form flow through a [`PosterSession`]
#![forbid(unsafe_code)]

pub(crate) mod assets;
pub(crate) mod foundation;
pub(crate) mod layout;
pub(crate) mod render;
pub(crate) mod session;
pub(crate) mod text;

pub use crate::foundation::error::{PosterError, PosterResult};
pub use crate::foundation::geom::{Affine, BezPath, Canvas, PhotoFrame, Point, PxRect, Rect};

pub use crate::assets::decode::{Bitmap, Photo, decode_image};
pub use crate::assets::fonts::font_bytes;
pub use crate::assets::template::{TemplateSource, prepare_template};
pub use crate::layout::config::{BuiltinArtwork, Caption, FontWeight, NameStyle, PosterLayout};
pub use crate::layout::presets::LayoutPreset;
pub use crate::render::compositor::{
    Compositor, NameLayout, NameLine, generate_poster, generate_poster_from_bytes,
};
pub use crate::render::encode::{EncodedPoster, encode_png};
pub use crate::session::form::{
    InputLimits, Notice, PosterSession, download_file_name, notification,
};
pub use crate::text::shaper::{ShapedLine, TextBrushRgba8, TextShaper};
pub use crate::text::wrap::{MeasureText, stack_line_centers, wrap_words};
