/// Causeway version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Depth value meaning "no bound on conditioning-set size".
pub const UNBOUNDED_DEPTH: i32 = -1;

/// A non-adjacent pair becomes an orientation candidate when either one-sided
/// slope ratio falls below this magnitude...
pub const CANDIDATE_RATIO_CEILING: f64 = 0.2;

/// ...and the two ratios differ by more than this.
pub const CANDIDATE_RATIO_GAP: f64 = 0.2;

/// Both one-sided slope ratios above this magnitude mark a feedback candidate.
pub const STRONG_ASYMMETRY_RATIO: f64 = 0.5;

/// Pivot magnitude below which a covariance submatrix is treated as singular.
pub const SINGULARITY_TOLERANCE: f64 = 1e-10;
