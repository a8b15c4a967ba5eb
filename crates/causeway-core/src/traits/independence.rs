use crate::errors::OracleError;
use crate::models::Variable;

/// Outcome of one conditional independence test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub independent: bool,
    /// Test statistic; its scale depends on the oracle.
    pub statistic: f64,
    /// Present for oracles that produce one.
    pub p_value: Option<f64>,
}

/// Conditional independence oracle over the columns of one dataset.
///
/// Implementations must be deterministic and read-only: the same `(x, y, z)`
/// always yields the same verdict, from any thread.
pub trait IndependenceTest: Send + Sync {
    /// Test `x _||_ y | z`. `z` never contains `x` or `y`.
    ///
    /// Returns [`OracleError::DegenerateInput`] when the statistic is undefined
    /// for this conditioning set; callers treat the pair as dependent.
    fn test(&self, x: usize, y: usize, z: &[usize]) -> Result<Verdict, OracleError>;

    /// Variables the oracle was built over, in column order.
    fn variables(&self) -> &[Variable];

    /// Short identifier for logs.
    fn name(&self) -> &'static str;
}
