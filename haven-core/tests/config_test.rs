use haven_core::config::*;
use haven_core::errors::ConfigError;
use haven_core::models::RelaxationLevel;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = HavenConfig::from_toml("").unwrap();

    // Relaxation defaults
    assert_eq!(config.relaxation.levels.len(), 3);
    assert_eq!(config.relaxation.levels[0].price_multiplier, 1.10);
    assert_eq!(config.relaxation.levels[1].price_multiplier, 1.20);
    assert_eq!(config.relaxation.levels[2].price_multiplier, 1.35);
    assert_eq!(config.relaxation.levels[0].geo_radius_km, 3.0);
    assert_eq!(config.relaxation.levels[1].geo_radius_km, 8.0);
    assert_eq!(config.relaxation.levels[2].geo_radius_km, 15.0);
    assert_eq!(config.relaxation.levels[0].bed_bath_delta, 0);
    assert_eq!(config.relaxation.levels[1].bed_bath_delta, -1);
    assert_eq!(config.relaxation.levels[2].bed_bath_delta, -1);
    assert_eq!(config.relaxation.bed_bath_floor, 1);

    // Scoring defaults
    assert_eq!(config.scoring.weights.budget, 0.35);
    assert_eq!(config.scoring.weights.bedrooms, 0.25);
    assert_eq!(config.scoring.weights.bathrooms, 0.15);
    assert_eq!(config.scoring.weights.garage, 0.10);
    assert_eq!(config.scoring.weights.metro, 0.10);
    assert_eq!(config.scoring.weights.school, 0.05);
    assert_eq!(config.scoring.alpha_base, 0.4);
    assert_eq!(config.scoring.alpha_max, 0.85);
    assert_eq!(config.scoring.density_cap, 5.0);

    // Diversity / retrieval / observability defaults
    assert_eq!(config.diversity.max_per_neighborhood, 2);
    assert_eq!(config.diversity.default_top_n, 10);
    assert_eq!(config.retrieval.top_k, 200);
    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[diversity]
max_per_neighborhood = 3

[scoring]
alpha_max = 0.9
"#;
    let config = HavenConfig::from_toml(toml).unwrap();
    assert_eq!(config.diversity.max_per_neighborhood, 3);
    assert_eq!(config.scoring.alpha_max, 0.9);
    // Non-overridden fields keep defaults
    assert_eq!(config.diversity.default_top_n, 10);
    assert_eq!(config.scoring.alpha_base, 0.4);
    assert_eq!(config.relaxation.levels.len(), 3);
}

#[test]
fn config_accepts_alternative_relaxation_table() {
    let toml = r#"
[relaxation]
bed_bath_floor = 0

[[relaxation.levels]]
name = "a"
price_multiplier = 1.05
geo_radius_km = 1.0
bed_bath_delta = 0
penalty = 0.01

[[relaxation.levels]]
name = "b"
price_multiplier = 1.5
geo_radius_km = 20.0
bed_bath_delta = -2
penalty = 0.3

[[relaxation.levels]]
name = "c"
price_multiplier = 2.0
geo_radius_km = 50.0
bed_bath_delta = -2
penalty = 0.5
"#;
    let config = HavenConfig::from_toml(toml).unwrap();
    assert_eq!(config.relaxation.bed_bath_floor, 0);
    assert_eq!(config.relaxation.step(RelaxationLevel::Moderate).bed_bath_delta, -2);
    assert_eq!(config.relaxation.penalty(RelaxationLevel::Significant), 0.5);
}

#[test]
fn config_serde_roundtrip() {
    let config = HavenConfig::default();
    let toml_str = toml::to_string(&config).unwrap();
    let roundtripped = HavenConfig::from_toml(&toml_str).unwrap();
    assert_eq!(roundtripped.relaxation.levels, config.relaxation.levels);
    assert_eq!(roundtripped.scoring.weights, config.scoring.weights);
}

#[test]
fn permanent_step_is_identity() {
    let config = RelaxationConfig::default();
    let step = config.step(RelaxationLevel::Permanent);
    assert_eq!(step.price_multiplier, 1.0);
    assert_eq!(step.bed_bath_delta, 0);
    assert_eq!(config.penalty(RelaxationLevel::Permanent), 0.0);
}

#[test]
fn penalties_strictly_increase_with_level() {
    let config = RelaxationConfig::default();
    let penalties: Vec<f64> = RelaxationLevel::ALL
        .iter()
        .map(|l| config.penalty(*l))
        .collect();
    assert_eq!(penalties[0], 0.0);
    assert!(penalties.windows(2).all(|w| w[0] < w[1]), "{penalties:?}");
}

// --- Validation at load time ---

fn relaxation_toml(multiplier: f64, radius: f64, delta: i32, penalties: [f64; 3]) -> String {
    let mut out = String::new();
    for (i, penalty) in penalties.iter().enumerate() {
        out.push_str(&format!(
            "[[relaxation.levels]]\nname = \"l{i}\"\nprice_multiplier = {multiplier}\ngeo_radius_km = {radius}\nbed_bath_delta = {delta}\npenalty = {penalty}\n\n"
        ));
    }
    out
}

#[test]
fn negative_multiplier_rejected_at_load() {
    let err = HavenConfig::from_toml(&relaxation_toml(-1.1, 3.0, 0, [0.1, 0.2, 0.3])).unwrap_err();
    match err {
        ConfigError::Invalid { field, .. } => assert!(field.contains("price_multiplier")),
        other => panic!("expected Invalid, got {other:?}"),
    }
}

#[test]
fn tightening_multiplier_rejected_at_load() {
    assert!(HavenConfig::from_toml(&relaxation_toml(0.9, 3.0, 0, [0.1, 0.2, 0.3])).is_err());
}

#[test]
fn positive_bed_bath_delta_rejected() {
    let err = HavenConfig::from_toml(&relaxation_toml(1.1, 3.0, 1, [0.1, 0.2, 0.3])).unwrap_err();
    assert!(err.to_string().contains("bed_bath_delta"));
}

#[test]
fn non_increasing_penalties_rejected() {
    let err = HavenConfig::from_toml(&relaxation_toml(1.1, 3.0, 0, [0.1, 0.1, 0.3])).unwrap_err();
    assert!(err.to_string().contains("penalty"));
}

#[test]
fn wrong_level_count_rejected() {
    let toml = r#"
[[relaxation.levels]]
name = "only"
price_multiplier = 1.1
geo_radius_km = 3.0
bed_bath_delta = 0
penalty = 0.05
"#;
    let err = HavenConfig::from_toml(toml).unwrap_err();
    assert!(err.to_string().contains("expected 3 levels"));
}

#[test]
fn inverted_alpha_bounds_rejected() {
    let toml = "[scoring]\nalpha_base = 0.9\nalpha_max = 0.5\n";
    assert!(HavenConfig::from_toml(toml).is_err());
}

#[test]
fn zero_weight_rejected() {
    let toml = "[scoring.weights]\nschool = 0.0\n";
    let err = HavenConfig::from_toml(toml).unwrap_err();
    assert!(err.to_string().contains("scoring.weights.school"));
}

#[test]
fn malformed_toml_is_parse_error() {
    let err = HavenConfig::from_toml("[relaxation\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}
