use std::collections::HashMap;

use super::*;

#[test]
fn defaults_match_recognized_configuration() {
    let p = ShadowParams::default();
    assert_eq!(p.light.angle, 45.0);
    assert_eq!(p.light.elevation, 45.0);
    assert_eq!(p.light.shadow_scale, 1.0);
    assert_eq!(p.light.max_shear, 5.0);
    assert_eq!(p.light.min_denominator, 0.2);
    assert_eq!(p.fade.contact_fade, 0.15);
    assert_eq!(p.fade.soft_fade, 1.0);
    p.validate().unwrap();
}

#[test]
fn read_form_float_falls_back_on_missing_blank_and_garbage() {
    assert_eq!(read_form_float(None, 3.0), 3.0);
    assert_eq!(read_form_float(Some(""), 3.0), 3.0);
    assert_eq!(read_form_float(Some("  "), 3.0), 3.0);
    assert_eq!(read_form_float(Some("abc"), 3.0), 3.0);
    assert_eq!(read_form_float(Some(" 12.5 "), 3.0), 12.5);
    assert_eq!(read_form_float(Some("-7"), 3.0), -7.0);
}

#[test]
fn from_fields_reads_known_names_and_keeps_defaults() {
    let form: HashMap<&str, &str> = [
        ("angle", "120"),
        ("elevation", ""),
        ("soft_fade", "0.5"),
        ("max_shear", "nope"),
    ]
    .into_iter()
    .collect();

    let p = ShadowParams::from_fields(|name| form.get(name).copied());
    assert_eq!(p.light.angle, 120.0);
    assert_eq!(p.light.elevation, 45.0);
    assert_eq!(p.light.max_shear, 5.0);
    assert_eq!(p.fade.soft_fade, 0.5);
    assert_eq!(p.fade.contact_fade, 0.15);
}

#[test]
fn from_json_defaults_missing_fields() {
    let p = ShadowParams::from_json(r#"{ "light": { "angle": 10.0 } }"#).unwrap();
    assert_eq!(p.light.angle, 10.0);
    assert_eq!(p.light.elevation, 45.0);
    assert_eq!(p.fade, FadeParams::default());
}

#[test]
fn from_json_rejects_unknown_fields() {
    let err = ShadowParams::from_json(r#"{ "light": { "azimuth": 10.0 } }"#).unwrap_err();
    assert!(matches!(err, ShadowcastError::Validation(_)));
}

#[test]
fn validate_rejects_non_finite_and_non_positive_denominator() {
    let mut p = ShadowParams::default();
    p.light.angle = f64::NAN;
    assert!(p.validate().is_err());

    let mut p = ShadowParams::default();
    p.light.min_denominator = 0.0;
    assert!(p.validate().is_err());
}
