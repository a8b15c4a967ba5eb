use std::collections::HashMap;
use std::io::Write;

use causeway_core::config::*;
use causeway_core::errors::ConfigError;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = SearchConfig::from_toml("").unwrap();

    assert_eq!(config.depth, -1);
    assert_eq!(config.depth_bound(), None);
    assert_eq!(config.penalty_discount, 1.0);
    assert!(!config.verbose);
    assert!(config.parallel);

    // Oracle defaults
    assert_eq!(config.oracle.kind, OracleKind::SemBic);
    assert_eq!(config.oracle.alpha, 0.01);
    assert!(config.oracle.rectify_negatives);

    // Bootstrap defaults
    assert_eq!(config.bootstrap.sample_size, 0);
    assert!(!config.bootstrap.enabled());
    assert_eq!(config.bootstrap.ensemble, EnsemblePolicy::Highest);
    assert_eq!(config.bootstrap.seed, 0);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
depth = 3
penalty_discount = 2.0

[oracle]
kind = "fisher_z"

[bootstrap]
sample_size = 20
ensemble = "majority"
"#;
    let config = SearchConfig::from_toml(toml).unwrap();
    assert_eq!(config.depth_bound(), Some(3));
    assert_eq!(config.penalty_discount, 2.0);
    assert_eq!(config.oracle.kind, OracleKind::FisherZ);
    assert_eq!(config.bootstrap.ensemble, EnsemblePolicy::Majority);
    assert!(config.bootstrap.enabled());
    // Non-overridden fields keep defaults
    assert_eq!(config.oracle.alpha, 0.01);
    assert!(config.oracle.rectify_negatives);
    assert!(config.parallel);
}

#[test]
fn config_roundtrips_through_toml() {
    let mut config = SearchConfig::default();
    config.depth = 2;
    config.bootstrap.ensemble = EnsemblePolicy::Preserved;
    let text = config.to_toml().unwrap();
    assert_eq!(SearchConfig::from_toml(&text).unwrap(), config);
}

#[test]
fn config_rejects_invalid_values() {
    let cases = [
        ("depth = -2", "depth"),
        ("penalty_discount = 0.0", "penalty_discount"),
        ("penalty_discount = -1.5", "penalty_discount"),
        ("[oracle]\nalpha = 1.0", "oracle.alpha"),
        ("[oracle]\nalpha = 0.0", "oracle.alpha"),
    ];
    for (toml, expected) in cases {
        match SearchConfig::from_toml(toml) {
            Err(ConfigError::ValidationFailed { field, .. }) => assert_eq!(field, expected),
            other => panic!("{toml:?} should fail validation on {expected}, got {other:?}"),
        }
    }
}

#[test]
fn config_rejects_malformed_toml() {
    let err = SearchConfig::from_toml("depth = \"deep\"").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
    let err = SearchConfig::from_toml("[bootstrap]\nensemble = \"loudest\"").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn overrides_take_priority_and_skip_garbage() {
    let env: HashMap<&str, &str> = [
        ("CAUSEWAY_DEPTH", "1"),
        ("CAUSEWAY_ORACLE", "fisher-z"),
        ("CAUSEWAY_ALPHA", "0.1"),
        ("CAUSEWAY_PARALLEL", "not-a-bool"),
        ("CAUSEWAY_BOOTSTRAP_ENSEMBLE", "2"),
        ("CAUSEWAY_BOOTSTRAP_SEED", "99"),
    ]
    .into_iter()
    .collect();

    let mut config = SearchConfig::default();
    config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

    assert_eq!(config.depth, 1);
    assert_eq!(config.oracle.kind, OracleKind::FisherZ);
    assert_eq!(config.oracle.alpha, 0.1);
    assert!(config.parallel, "unparsable override leaves the default");
    assert_eq!(config.bootstrap.ensemble, EnsemblePolicy::Majority);
    assert_eq!(config.bootstrap.seed, 99);
}

#[test]
fn ensemble_policy_accepts_names_and_codes() {
    assert_eq!("preserved".parse::<EnsemblePolicy>(), Ok(EnsemblePolicy::Preserved));
    assert_eq!(" Highest ".parse::<EnsemblePolicy>(), Ok(EnsemblePolicy::Highest));
    assert_eq!("0".parse::<EnsemblePolicy>(), Ok(EnsemblePolicy::Preserved));
    assert_eq!("1".parse::<EnsemblePolicy>(), Ok(EnsemblePolicy::Highest));
    assert_eq!("2".parse::<EnsemblePolicy>(), Ok(EnsemblePolicy::Majority));
    assert!("3".parse::<EnsemblePolicy>().is_err());
    assert!("plurality".parse::<EnsemblePolicy>().is_err());

    for policy in [EnsemblePolicy::Preserved, EnsemblePolicy::Highest, EnsemblePolicy::Majority] {
        assert_eq!(EnsemblePolicy::from_code(policy.code() as i64), Some(policy));
    }
}

#[test]
fn oracle_kind_parses_aliases() {
    assert_eq!("bic".parse::<OracleKind>(), Ok(OracleKind::SemBic));
    assert_eq!("FisherZ".parse::<OracleKind>(), Ok(OracleKind::FisherZ));
    assert_eq!(OracleKind::FisherZ.as_str(), "fisher_z");
    assert!("g_square".parse::<OracleKind>().is_err());
}

#[test]
fn config_loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "depth = 4\n[oracle]\nrectify_negatives = false").unwrap();

    let config = SearchConfig::from_file(file.path()).unwrap();
    assert_eq!(config.depth, 4);
    assert!(!config.oracle.rectify_negatives);

    let loaded = SearchConfig::load(Some(file.path())).unwrap();
    assert_eq!(loaded.depth_bound(), Some(4));
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let err = SearchConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
    assert!(err.to_string().contains("absent.toml"));
}
