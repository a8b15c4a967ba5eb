// Single source of truth for all default values.

// --- Search ---
pub const DEFAULT_DEPTH: i32 = crate::constants::UNBOUNDED_DEPTH;
pub const DEFAULT_PENALTY_DISCOUNT: f64 = 1.0;
pub const DEFAULT_VERBOSE: bool = false;
pub const DEFAULT_PARALLEL: bool = true;

// --- Oracle ---
pub const DEFAULT_ALPHA: f64 = 0.01;
pub const DEFAULT_RECTIFY_NEGATIVES: bool = true;

// --- Bootstrap ---
pub const DEFAULT_BOOTSTRAP_SAMPLE_SIZE: usize = 0; // disabled
pub const DEFAULT_BOOTSTRAP_SEED: u64 = 0;
