use crate::foundation::{
    error::PosterResult,
    geom::{Point, PxRect},
};

/// Something that can tell how wide a line of text renders.
///
/// The compositor measures with the bundled fonts; tests can plug in fixed-pitch metrics.
pub trait MeasureText {
    fn measure(&mut self, text: &str) -> PosterResult<f32>;
}

/// Greedy word wrap.
///
/// If all of `text` fits in `max_width` it stays one line, spacing untouched. Otherwise words
/// are accumulated while the joined line measures `<= max_width`; the word that would overflow
/// starts the next line. A word wider than `max_width` on its own gets a line to itself and is
/// never broken mid-word, so such a line may overflow.
pub fn wrap_words<M: MeasureText + ?Sized>(
    text: &str,
    max_width: f32,
    measurer: &mut M,
) -> PosterResult<Vec<String>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    if measurer.measure(text)? <= max_width {
        return Ok(vec![text.to_string()]);
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if measurer.measure(&candidate)? <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    Ok(lines)
}

/// Vertical center of each of `count` lines stacked at `line_height`, with the block centered
/// on `rect`'s vertical middle and each line centered horizontally.
pub fn stack_line_centers(count: usize, line_height: f64, rect: PxRect) -> Vec<Point> {
    let center = rect.center();
    let block_h = line_height * count as f64;
    let top = center.y - block_h * 0.5;
    (0..count)
        .map(|i| Point::new(center.x, top + line_height * (i as f64 + 0.5)))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
