use causeway_core::errors::error_code;
use causeway_core::errors::*;

#[test]
fn dataset_error_ragged_carries_shape() {
    let err = DatasetError::Ragged {
        row: 7,
        expected: 3,
        found: 2,
    };
    let msg = err.to_string();
    assert!(msg.contains('7'));
    assert!(msg.contains('3'));
    assert!(msg.contains('2'));
    assert_eq!(err.error_code(), error_code::DATASET_ERROR);
}

#[test]
fn mismatched_variables_have_their_own_code() {
    let err = DatasetError::MismatchedVariableSet {
        index: 1,
        expected: "x, y".into(),
        found: "x, z".into(),
    };
    assert_eq!(err.error_code(), error_code::MISMATCHED_VARIABLES);
    assert!(err.to_string().contains("x, z"));

    let err = EnsembleError::MismatchedVariableSet {
        index: 2,
        expected: "a".into(),
        found: "b".into(),
    };
    assert_eq!(err.error_code(), error_code::MISMATCHED_VARIABLES);
    assert_eq!(EnsembleError::NoGraphs.error_code(), error_code::ENSEMBLE_ERROR);
}

#[test]
fn graph_errors_describe_the_bad_slot() {
    let err = GraphError::HeadOutsidePair { lo: 0, hi: 1, head: 4 };
    assert!(err.to_string().contains("(0, 1)"));
    assert_eq!(err.error_code(), error_code::GRAPH_ERROR);

    let err = GraphError::SlotCount {
        variables: 4,
        expected: 6,
        found: 5,
    };
    assert_eq!(err.to_string(), "5 pair slots for 4 variables, expected 6");
}

#[test]
fn knowledge_errors_name_the_variables() {
    let err = KnowledgeError::Contradictory {
        from: "rain".into(),
        to: "wet".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("rain") && msg.contains("wet"));
    assert_eq!(err.error_code(), error_code::KNOWLEDGE_CONTRADICTION);

    let err = KnowledgeError::SelfLoop { name: "rain".into() };
    assert!(err.to_string().contains("rain"));
}

#[test]
fn only_degenerate_oracle_errors_are_recoverable() {
    let degenerate = OracleError::degenerate("singular covariance");
    assert!(degenerate.is_degenerate());
    assert_eq!(degenerate.error_code(), error_code::DEGENERATE_INPUT);
    assert!(degenerate.to_string().contains("singular covariance"));

    let unknown = OracleError::UnknownVariable { index: 9, count: 3 };
    assert!(!unknown.is_degenerate());
    assert_eq!(unknown.error_code(), error_code::ORACLE_ERROR);
}

#[test]
fn search_error_converts_from_subsystems() {
    let err: SearchError = DatasetError::NoRows.into();
    assert!(matches!(err, SearchError::Dataset(DatasetError::NoRows)));
    assert_eq!(err.error_code(), error_code::DATASET_ERROR);

    let err: SearchError = OracleError::degenerate("nan").into();
    assert_eq!(err.error_code(), error_code::DEGENERATE_INPUT);

    let err: SearchError = ConfigError::ValidationFailed {
        field: "depth".into(),
        message: "bad".into(),
    }
    .into();
    assert_eq!(err.error_code(), error_code::CONFIG_ERROR);

    let err: SearchError = EnsembleError::NoGraphs.into();
    assert_eq!(err.error_code(), error_code::ENSEMBLE_ERROR);
}

#[test]
fn search_error_codes_for_own_variants() {
    assert_eq!(SearchError::NoDatasets.error_code(), error_code::NO_DATASETS);
    let err = SearchError::Cancelled { depth: 2 };
    assert_eq!(err.error_code(), error_code::CANCELLED);
    assert!(err.to_string().contains('2'));
}

#[test]
fn coded_string_prefixes_the_code() {
    let err = SearchError::NoDatasets;
    assert_eq!(err.coded_string(), "[NO_DATASETS] no datasets supplied");
}
