//! Score-based independence: a linear-Gaussian BIC score difference.

use causeway_core::errors::OracleError;
use causeway_core::{Dataset, IndependenceTest, Variable, Verdict};

use crate::linalg::CovarianceMatrix;

/// Judges `x _||_ y | z` by whether adding `x` to `y`'s regressors `z` fails
/// to improve the SEM BIC score of `y`.
#[derive(Debug, Clone)]
pub struct SemBicTest {
    variables: Vec<Variable>,
    cov: CovarianceMatrix,
    penalty_discount: f64,
}

impl SemBicTest {
    pub fn new(data: &Dataset, penalty_discount: f64) -> Self {
        Self {
            variables: data.variables().to_vec(),
            cov: CovarianceMatrix::from_dataset(data),
            penalty_discount,
        }
    }

    pub fn penalty_discount(&self) -> f64 {
        self.penalty_discount
    }

    /// BIC score of `y` regressed on `parents` (higher is better).
    pub fn local_score(&self, y: usize, parents: &[usize]) -> Result<f64, OracleError> {
        let n = self.cov.sample_size() as f64;
        let variance = self.cov.residual_variance(y, parents)?;
        let params = (parents.len() + 1) as f64;
        Ok(-n * variance.ln() - self.penalty_discount * params * n.ln())
    }

    /// Score gain from adding `x` to `y`'s regressors `z`.
    pub fn local_score_diff(&self, x: usize, y: usize, z: &[usize]) -> Result<f64, OracleError> {
        let mut with_x = Vec::with_capacity(z.len() + 1);
        with_x.extend_from_slice(z);
        with_x.push(x);
        Ok(self.local_score(y, &with_x)? - self.local_score(y, z)?)
    }
}

impl IndependenceTest for SemBicTest {
    fn test(&self, x: usize, y: usize, z: &[usize]) -> Result<Verdict, OracleError> {
        for &v in [x, y].iter().chain(z) {
            self.cov.check_index(v)?;
        }
        let diff = self.local_score_diff(x, y, z)?;
        Ok(Verdict {
            independent: diff <= 0.0,
            statistic: diff,
            p_value: None,
        })
    }

    fn variables(&self) -> &[Variable] {
        &self.variables
    }

    fn name(&self) -> &'static str {
        "sem_bic"
    }
}
