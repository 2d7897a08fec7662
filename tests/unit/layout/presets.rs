use super::*;

#[test]
fn all_presets_validate() {
    for preset in LayoutPreset::ALL {
        preset
            .layout()
            .validate()
            .unwrap_or_else(|e| panic!("preset {preset} is invalid: {e}"));
    }
}

#[test]
fn lookup_by_name_is_case_insensitive() {
    assert_eq!(LayoutPreset::by_name("workshop"), Some(LayoutPreset::Workshop));
    assert_eq!(LayoutPreset::by_name(" Square "), Some(LayoutPreset::Square));
    assert_eq!(LayoutPreset::by_name("banner"), None);
}

#[test]
fn layout_name_matches_preset_name() {
    for preset in LayoutPreset::ALL {
        assert_eq!(preset.layout().name, preset.name());
    }
}

#[test]
fn workshop_photo_is_a_circle() {
    let l = LayoutPreset::Workshop.layout();
    assert_eq!(l.canvas, Canvas::new(800, 1000));
    assert_eq!(l.photo.corner_radius, l.photo.max_corner_radius());
}

#[test]
fn square_preset_is_square() {
    let l = LayoutPreset::Square.layout();
    assert_eq!(l.canvas.width, l.canvas.height);
    assert!(l.photo.corner_radius < l.photo.max_corner_radius());
}
