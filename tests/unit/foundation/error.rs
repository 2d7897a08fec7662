use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PosterError::invalid_input("x")
            .to_string()
            .contains("invalid input:")
    );
    assert!(
        PosterError::photo_decode("x")
            .to_string()
            .contains("photo decode error:")
    );
    assert!(
        PosterError::rendering_unsupported("x")
            .to_string()
            .contains("rendering unsupported:")
    );
    assert!(
        PosterError::encode("x")
            .to_string()
            .contains("encode error:")
    );
    assert!(
        PosterError::layout("x")
            .to_string()
            .contains("layout error:")
    );
    assert!(
        PosterError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PosterError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn caller_errors_are_classified() {
    assert!(PosterError::invalid_input("x").is_caller_error());
    assert!(PosterError::photo_decode("x").is_caller_error());
    assert!(!PosterError::rendering_unsupported("x").is_caller_error());
    assert!(!PosterError::encode("x").is_caller_error());
}
