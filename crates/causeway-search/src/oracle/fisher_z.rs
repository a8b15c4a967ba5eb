//! Fisher Z test on partial correlation.

use statrs::distribution::{ContinuousCDF, Normal};

use causeway_core::errors::OracleError;
use causeway_core::{Dataset, IndependenceTest, Variable, Verdict};

use crate::linalg::CovarianceMatrix;

/// Gaussian conditional independence test: `x _||_ y | z` when the Fisher
/// transformed partial correlation is not significant at `alpha`.
#[derive(Debug, Clone)]
pub struct FisherZTest {
    variables: Vec<Variable>,
    cov: CovarianceMatrix,
    alpha: f64,
}

impl FisherZTest {
    pub fn new(data: &Dataset, alpha: f64) -> Self {
        Self {
            variables: data.variables().to_vec(),
            cov: CovarianceMatrix::from_dataset(data),
            alpha,
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl IndependenceTest for FisherZTest {
    fn test(&self, x: usize, y: usize, z: &[usize]) -> Result<Verdict, OracleError> {
        for &v in [x, y].iter().chain(z) {
            self.cov.check_index(v)?;
        }

        let dof = self.cov.sample_size() as f64 - z.len() as f64 - 3.0;
        if dof <= 0.0 {
            return Err(OracleError::degenerate(format!(
                "{} samples too few for conditioning set of size {}",
                self.cov.sample_size(),
                z.len()
            )));
        }

        let r = self.cov.partial_correlation(x, y, z)?;
        let fisher = 0.5 * dof.sqrt() * ((1.0 + r) / (1.0 - r)).ln();
        if fisher.is_nan() {
            return Err(OracleError::degenerate("undefined Fisher statistic"));
        }

        let normal = Normal::new(0.0, 1.0).map_err(|e| OracleError::degenerate(e.to_string()))?;
        let p_value = 2.0 * (1.0 - normal.cdf(fisher.abs()));

        Ok(Verdict {
            independent: p_value > self.alpha,
            statistic: fisher,
            p_value: Some(p_value),
        })
    }

    fn variables(&self) -> &[Variable] {
        &self.variables
    }

    fn name(&self) -> &'static str {
        "fisher_z"
    }
}
