use std::borrow::Cow;

use crate::{
    assets::decode::Photo,
    foundation::error::{PosterError, PosterResult},
    render::{compositor::Compositor, encode::EncodedPoster},
};

const NAME_REQUIRED: &str = "Please enter your name";
const PHOTO_REQUIRED: &str = "Please upload a photo";
const NOT_AN_IMAGE: &str = "Please select an image file";
const NOTHING_TO_DOWNLOAD: &str = "Generate a poster first";
const UNREADABLE_PHOTO: &str = "Could not read that image. Please try another photo";
const GENERATE_FAILED: &str = "Failed to generate poster. Please try again.";

/// Limits applied to user input before anything is decoded or drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputLimits {
    /// Counted in `char`s, not bytes.
    pub max_name_chars: usize,
    pub max_photo_bytes: usize,
    /// Media types must start with this, e.g. `image/`.
    pub media_type_prefix: String,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            max_name_chars: 50,
            max_photo_bytes: 10 * 1024 * 1024,
            media_type_prefix: "image/".to_owned(),
        }
    }
}

impl InputLimits {
    pub fn accepts_media_type(&self, media_type: &str) -> bool {
        media_type
            .trim()
            .to_ascii_lowercase()
            .starts_with(&self.media_type_prefix)
    }
}

/// Messages for successful steps, paired with [`notification`] for failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    PhotoUploaded,
    PosterGenerated,
    PosterDownloaded,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Self::PhotoUploaded => "Photo uploaded successfully!",
            Self::PosterGenerated => "Poster generated successfully!",
            Self::PosterDownloaded => "Poster downloaded!",
        }
    }
}

/// Short message suitable for showing to the person filling in the form.
///
/// Input rejections raised by [`PosterSession`] already carry their user-facing text.
pub fn notification(err: &PosterError) -> Cow<'_, str> {
    match err {
        PosterError::InvalidInput(msg) => Cow::Borrowed(msg.as_str()),
        PosterError::PhotoDecode(_) => Cow::Borrowed(UNREADABLE_PHOTO),
        _ => Cow::Borrowed(GENERATE_FAILED),
    }
}

/// Download name for a poster: the name with whitespace runs turned into `-` and characters
/// that are unsafe in file names dropped, then `-<event_slug>-poster.png`.
pub fn download_file_name(name: &str, event_slug: &str) -> String {
    let stem = name
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|&c| !is_path_hostile(c))
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    let stem = stem.trim_start_matches('.');

    let ext = EncodedPoster::EXTENSION;
    if stem.is_empty() {
        format!("{event_slug}-poster.{ext}")
    } else {
        format!("{stem}-{event_slug}-poster.{ext}")
    }
}

fn is_path_hostile(c: char) -> bool {
    c.is_control() || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
}

#[derive(Debug)]
struct GeneratedPoster {
    poster: EncodedPoster,
    file_name: String,
}

/// Form state for one person making one poster at a time.
///
/// Holds the typed name, the uploaded photo and the most recent output. A failed step never
/// clears inputs, so the same request can be retried as-is.
#[derive(Debug, Default)]
pub struct PosterSession {
    limits: InputLimits,
    name: String,
    photo: Option<Photo>,
    output: Option<GeneratedPoster>,
}

impl PosterSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: InputLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    pub fn limits(&self) -> &InputLimits {
        &self.limits
    }

    /// Replace the name, keeping at most `max_name_chars` characters.
    pub fn set_name(&mut self, name: &str) {
        self.name = name.chars().take(self.limits.max_name_chars).collect();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Counter shown under the name field, e.g. `(12/50 characters)`.
    pub fn name_counter(&self) -> String {
        format!(
            "({}/{} characters)",
            self.name.chars().count(),
            self.limits.max_name_chars
        )
    }

    /// Validate and decode an uploaded photo.
    ///
    /// Media type is checked first, then size, then the bytes are decoded. On any error the
    /// previously loaded photo stays in place.
    #[tracing::instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub fn load_photo(&mut self, bytes: &[u8], media_type: &str) -> PosterResult<()> {
        if !self.limits.accepts_media_type(media_type) {
            return Err(PosterError::invalid_input(NOT_AN_IMAGE));
        }
        if bytes.len() > self.limits.max_photo_bytes {
            return Err(PosterError::invalid_input(format!(
                "Image size should be less than {}MB",
                self.limits.max_photo_bytes / (1024 * 1024)
            )));
        }
        let photo = Photo::decode(bytes)?;
        tracing::debug!(
            width = photo.width(),
            height = photo.height(),
            "photo loaded"
        );
        self.photo = Some(photo);
        Ok(())
    }

    pub fn remove_photo(&mut self) {
        self.photo = None;
    }

    pub fn photo(&self) -> Option<&Photo> {
        self.photo.as_ref()
    }

    pub fn can_generate(&self) -> bool {
        !self.name.trim().is_empty() && self.photo.is_some()
    }

    /// Composite the current name and photo with `compositor`.
    ///
    /// Any previous output is dropped before compositing starts.
    pub fn generate(&mut self, compositor: &Compositor) -> PosterResult<&EncodedPoster> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(PosterError::invalid_input(NAME_REQUIRED));
        }
        let Some(photo) = self.photo.as_ref() else {
            return Err(PosterError::invalid_input(PHOTO_REQUIRED));
        };

        self.output = None;
        let poster = compositor.generate(name, photo)?;
        let file_name = download_file_name(name, &compositor.layout().event_slug);

        let out = self.output.insert(GeneratedPoster { poster, file_name });
        Ok(&out.poster)
    }

    pub fn output(&self) -> Option<&EncodedPoster> {
        self.output.as_ref().map(|o| &o.poster)
    }

    /// File name and PNG bytes of the last generated poster.
    pub fn download(&self) -> PosterResult<(&str, &[u8])> {
        let out = self
            .output
            .as_ref()
            .ok_or_else(|| PosterError::invalid_input(NOTHING_TO_DOWNLOAD))?;
        Ok((out.file_name.as_str(), out.poster.bytes()))
    }

    /// Clear name, photo and output. Limits are kept.
    pub fn reset(&mut self) {
        self.name.clear();
        self.photo = None;
        self.output = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/form.rs"]
mod tests;
