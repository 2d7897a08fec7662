pub type PosterResult<T> = Result<T, PosterError>;

#[derive(thiserror::Error, Debug)]
pub enum PosterError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("photo decode error: {0}")]
    PhotoDecode(String),

    #[error("rendering unsupported: {0}")]
    RenderingUnsupported(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error("layout error: {0}")]
    Layout(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PosterError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn photo_decode(msg: impl Into<String>) -> Self {
        Self::PhotoDecode(msg.into())
    }

    pub fn rendering_unsupported(msg: impl Into<String>) -> Self {
        Self::RenderingUnsupported(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether the failed attempt can be retried with the same inputs left in place.
    ///
    /// Every variant is scoped to one generate attempt, so this only separates caller
    /// mistakes (fix the input first) from environment failures (retry as-is).
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::PhotoDecode(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
