//! Conditional independence oracles.

pub mod fisher_z;
pub mod sem_bic;

pub use fisher_z::FisherZTest;
pub use sem_bic::SemBicTest;

use causeway_core::config::OracleKind;
use causeway_core::{Dataset, IndependenceTest, SearchConfig};
use tracing::debug;

/// Build the oracle `config` selects over `data`.
///
/// With `rectify_negatives`, the oracle sees a copy of `data` whose negative
/// entries are set to zero.
pub fn build_oracle(config: &SearchConfig, data: &Dataset) -> Box<dyn IndependenceTest> {
    let rectified;
    let source = if config.oracle.rectify_negatives {
        rectified = data.rectified();
        &rectified
    } else {
        data
    };

    debug!(
        oracle = config.oracle.kind.as_str(),
        rectified = config.oracle.rectify_negatives,
        rows = source.num_rows(),
        "building independence oracle"
    );

    match config.oracle.kind {
        OracleKind::SemBic => Box::new(SemBicTest::new(source, config.penalty_discount)),
        OracleKind::FisherZ => Box::new(FisherZTest::new(source, config.oracle.alpha)),
    }
}
