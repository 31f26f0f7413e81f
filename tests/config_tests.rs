use ambient_field::scene::config::is_mobile_user_agent;
use ambient_field::scene::{ColorMode, ConfigError, FieldConfig, LayerConfig, ScrollAxis, Volume};

#[test]
fn empty_json_yields_defaults() {
    let config = FieldConfig::from_json("{}").unwrap();
    assert_eq!(config, FieldConfig::default());
    assert!(config.validate().is_ok());
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let config = FieldConfig::from_json(
        r##"{
            "particle_count": 300,
            "palette": ["#ff0000", "#00ff00", "#0000ff"],
            "color_mode": "pick",
            "volume": { "kind": "sphere", "radius": 12.0 },
            "scroll_axis": "forward",
            "lines": { "enabled": false },
            "motion": { "drift_bound": 5.0 },
            "seed": 42
        }"##,
    )
    .unwrap();
    assert_eq!(config.particle_count, 300);
    assert_eq!(config.color_mode, ColorMode::Pick);
    assert_eq!(config.volume, Volume::Sphere { radius: 12.0 });
    assert_eq!(config.scroll_axis, ScrollAxis::Forward);
    assert!(!config.lines.enabled);
    assert_eq!(config.lines.threshold, FieldConfig::default().lines.threshold);
    assert_eq!(config.motion.drift_bound, 5.0);
    assert_eq!(config.motion.float_amplitude, FieldConfig::default().motion.float_amplitude);
    assert_eq!(config.seed, Some(42));
}

#[test]
fn malformed_json_is_reported() {
    assert!(matches!(
        FieldConfig::from_json("{ not json"),
        Err(ConfigError::Json(_))
    ));
    assert!(matches!(
        FieldConfig::from_json(r#"{ "volume": { "kind": "torus" } }"#),
        Err(ConfigError::Json(_))
    ));
}

#[test]
fn palette_limits_are_enforced() {
    let too_many = r##"{ "palette": ["#000000", "#111111", "#222222", "#333333", "#444444"] }"##;
    assert_eq!(
        FieldConfig::from_json(too_many),
        Err(ConfigError::PaletteSize { got: 5, max: 4 })
    );
    assert_eq!(
        FieldConfig::from_json(r#"{ "palette": [] }"#),
        Err(ConfigError::PaletteSize { got: 0, max: 4 })
    );
    assert!(matches!(
        FieldConfig::from_json(r##"{ "palette": ["#zzzzzz"] }"##),
        Err(ConfigError::InvalidColor(_))
    ));
}

#[test]
fn numeric_ranges_are_enforced() {
    let mut c = FieldConfig::default();
    c.pointer_smoothing = 0.0;
    assert_eq!(c.validate(), Err(ConfigError::Smoothing(0.0)));

    let mut c = FieldConfig::default();
    c.camera.near = 10.0;
    c.camera.far = 5.0;
    assert!(matches!(c.validate(), Err(ConfigError::ClipPlanes { .. })));

    let mut c = FieldConfig::default();
    c.particle_size = -1.0;
    assert!(matches!(
        c.validate(),
        Err(ConfigError::NonPositive {
            field: "particle_size",
            ..
        })
    ));

    let mut c = FieldConfig::default();
    c.camera.fov_degrees = 270.0;
    assert!(matches!(
        c.validate(),
        Err(ConfigError::OutOfRange {
            field: "camera.fov_degrees",
            ..
        })
    ));
    c.camera.fov_degrees = 180.0;
    assert!(c.validate().is_err());

    let mut c = FieldConfig::default();
    c.camera.far = f32::INFINITY;
    assert!(matches!(c.validate(), Err(ConfigError::ClipPlanes { .. })));

    let mut c = FieldConfig::default();
    c.motion.pointer_follow = -5.0;
    assert!(matches!(
        c.validate(),
        Err(ConfigError::OutOfRange {
            field: "motion.pointer_follow",
            ..
        })
    ));
    c.motion.pointer_follow = 1.5;
    assert!(c.validate().is_err());
    c.motion.pointer_follow = 1.0;
    assert!(c.validate().is_ok());

    let mut c = FieldConfig::default();
    c.lines.threshold = 0.0;
    assert!(c.validate().is_err());
    c.lines.enabled = false;
    assert!(c.validate().is_ok());
}

#[test]
fn shape_palette_ignored_when_no_shapes() {
    let mut c = FieldConfig::default();
    c.shapes.palette.clear();
    assert!(c.validate().is_err());
    c.shapes.count = 0;
    assert!(c.validate().is_ok());
}

#[test]
fn mobile_viewports_get_the_reduced_budget() {
    let mut c = FieldConfig::default();
    c.particle_count = 800;
    assert_eq!(c.effective_particle_count(1280.0, false), 800);
    assert_eq!(c.effective_particle_count(375.0, false), 400);
    assert_eq!(c.effective_particle_count(1280.0, true), 400);

    c.mobile_particle_count = Some(150);
    assert_eq!(c.effective_particle_count(375.0, false), 150);
    assert_eq!(c.effective_particle_count(c.mobile_breakpoint_px, false), 800);
}

#[test]
fn recognizes_mobile_user_agents() {
    assert!(is_mobile_user_agent(
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15"
    ));
    assert!(is_mobile_user_agent("Mozilla/5.0 (Linux; Android 14; Pixel 8)"));
    assert!(!is_mobile_user_agent(
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/126.0"
    ));
}

#[test]
fn float_amplitude_must_stay_inside_drift_bound() {
    let mut c = FieldConfig::default();
    c.motion.float_amplitude = 4.0;
    c.motion.drift_bound = 1.0;
    assert_eq!(
        c.validate(),
        Err(ConfigError::FloatExceedsBound {
            amplitude: 4.0,
            bound: 1.0
        })
    );
    c.motion.float_amplitude = 1.0;
    assert!(c.validate().is_err());
    c.motion.float_amplitude = 0.9;
    assert!(c.validate().is_ok());
}

#[test]
fn layers_and_fog_load_from_json() {
    let config = FieldConfig::from_json(
        r##"{
            "layers": [
                { "count": 50, "palette": ["#a78bfa"], "alpha": 0.4 },
                { "count": 10, "volume": { "kind": "sphere", "radius": 5.0 } }
            ],
            "fog": { "density": 0.03 }
        }"##,
    )
    .unwrap();
    assert_eq!(config.layers.len(), 2);
    assert!((config.layers[0].alpha - 0.4).abs() < 1e-6);
    assert_eq!(
        config.layers[0].group_rotation,
        LayerConfig::default().group_rotation
    );
    assert_eq!(config.layers[1].volume, Some(Volume::Sphere { radius: 5.0 }));
    assert!((config.fog.effective_density() - 0.03).abs() < 1e-6);

    let off = FieldConfig::from_json(r#"{ "fog": { "enabled": false }, "layers": [] }"#).unwrap();
    assert_eq!(off.fog.effective_density(), 0.0);
    assert!(off.layers.is_empty());
}

#[test]
fn bad_layers_and_fog_are_rejected() {
    let mut c = FieldConfig::default();
    c.layers[0].alpha = 1.5;
    assert!(matches!(
        c.validate(),
        Err(ConfigError::OutOfRange {
            field: "layers.alpha",
            ..
        })
    ));

    let mut c = FieldConfig::default();
    c.layers[0].palette.clear();
    assert!(c.validate().is_err());
    // An empty layer is ignored entirely
    c.layers[0].count = 0;
    assert!(c.validate().is_ok());

    let mut c = FieldConfig::default();
    c.fog.density = -0.1;
    assert!(matches!(
        c.validate(),
        Err(ConfigError::OutOfRange {
            field: "fog.density",
            ..
        })
    ));
}
