use geostrf_rs::{DynHeightOptions, InterpMode};

#[test]
fn missing_fields_take_defaults() {
    let opts: DynHeightOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(opts, DynHeightOptions::default());
    assert_eq!(opts.interp, InterpMode::Curve);
    assert_eq!(opts.delta_p, 1.0);
}

#[test]
fn interp_mode_names_are_resolved_leniently() {
    let opts: DynHeightOptions =
        serde_json::from_str(r#"{"delta_p": 2.5, "interp": "lin"}"#).unwrap();
    assert_eq!(opts.interp, InterpMode::Linear);
    assert_eq!(opts.delta_p, 2.5);

    let opts: DynHeightOptions = serde_json::from_str(r#"{"interp": "spline"}"#).unwrap();
    assert_eq!(opts.interp, InterpMode::Curve);
}

#[test]
fn interp_mode_serialises_by_name() {
    let s = serde_json::to_string(&DynHeightOptions::with_interp(InterpMode::Linear)).unwrap();
    assert!(s.contains(r#""interp":"linear""#), "unexpected JSON: {s}");
}
