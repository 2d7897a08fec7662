//! Fonts bundled into the binary.
//!
//! Poster text is always set in DejaVu Sans so output never depends on what the host has
//! installed. See `assets/fonts/LICENSE-DejaVu.txt`.

use std::sync::OnceLock;

use crate::layout::config::FontWeight;

static SANS_REGULAR: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
static SANS_BOLD: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

pub fn font_bytes(weight: FontWeight) -> &'static [u8] {
    match weight {
        FontWeight::Regular => SANS_REGULAR,
        FontWeight::Bold => SANS_BOLD,
    }
}

/// Rasterizer-side handle for a bundled face, created once per process.
pub(crate) fn font_data(weight: FontWeight) -> vello_cpu::peniko::FontData {
    static REGULAR: OnceLock<vello_cpu::peniko::FontData> = OnceLock::new();
    static BOLD: OnceLock<vello_cpu::peniko::FontData> = OnceLock::new();

    let slot = match weight {
        FontWeight::Regular => &REGULAR,
        FontWeight::Bold => &BOLD,
    };
    slot.get_or_init(|| {
        let blob = vello_cpu::peniko::Blob::from(font_bytes(weight).to_vec());
        vello_cpu::peniko::FontData::new(blob, 0)
    })
    .clone()
}

/// Register every bundled face with an SVG font database so template SVGs can reference
/// `DejaVu Sans` regardless of the host.
pub(crate) fn load_into_fontdb(db: &mut usvg::fontdb::Database) {
    for weight in [FontWeight::Regular, FontWeight::Bold] {
        db.load_font_data(font_bytes(weight).to_vec());
    }
}
