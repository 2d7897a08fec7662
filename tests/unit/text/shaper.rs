use super::*;

#[test]
fn bundled_faces_resolve_a_family() {
    let mut shaper = TextShaper::new();
    let bold = shaper.family_name(FontWeight::Bold).unwrap();
    let regular = shaper.family_name(FontWeight::Regular).unwrap();
    assert!(bold.contains("DejaVu"), "{bold}");
    assert!(regular.contains("DejaVu"), "{regular}");
}

#[test]
fn width_grows_with_text_and_size() {
    let mut shaper = TextShaper::new();
    let short = shaper.measure("Ada", FontWeight::Bold, 42.0).unwrap();
    let long = shaper.measure("Ada Lovelace", FontWeight::Bold, 42.0).unwrap();
    let bigger = shaper.measure("Ada", FontWeight::Bold, 84.0).unwrap();

    assert!(short > 0.0);
    assert!(long > short);
    assert!((bigger - 2.0 * short).abs() < 5.0, "{bigger} vs {short}");
}

#[test]
fn bold_is_wider_than_regular() {
    let mut shaper = TextShaper::new();
    let bold = shaper.measure("Montgomery", FontWeight::Bold, 40.0).unwrap();
    let regular = shaper.measure("Montgomery", FontWeight::Regular, 40.0).unwrap();
    assert!(bold > regular);
}

#[test]
fn shaped_line_has_baseline_inside_line_box() {
    let mut shaper = TextShaper::new();
    let line = shaper
        .shape_line(
            "Ada Lovelace",
            FontWeight::Bold,
            42.0,
            TextBrushRgba8::from_array([255, 255, 255, 255]),
        )
        .unwrap();
    assert_eq!(line.layout.lines().count(), 1);
    assert!(line.baseline > 0.0 && line.baseline < line.height);
    assert!(line.height >= 42.0);
}

#[test]
fn measuring_is_deterministic() {
    let mut a = TextShaper::new();
    let mut b = TextShaper::new();
    let text = "Bartholomew Alexander";
    assert_eq!(
        a.measure(text, FontWeight::Bold, 42.0).unwrap(),
        b.measure(text, FontWeight::Bold, 42.0).unwrap()
    );
}

#[test]
fn rejects_non_positive_size() {
    let mut shaper = TextShaper::new();
    assert!(shaper.measure("x", FontWeight::Bold, 0.0).is_err());
    assert!(shaper.measure("x", FontWeight::Bold, f32::NAN).is_err());
}
