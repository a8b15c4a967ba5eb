//! Small dense linear algebra for covariance submatrices.
//!
//! Conditioning sets are tiny (a handful of variables), so a plain Cholesky
//! factorization on row-major `Vec<f64>` is all the oracles need.

use causeway_core::constants::SINGULARITY_TOLERANCE;
use causeway_core::errors::OracleError;
use causeway_core::Dataset;
use rayon::prelude::*;

/// Sample covariance matrix (divisor `n - 1`) of every dataset column.
#[derive(Debug, Clone, PartialEq)]
pub struct CovarianceMatrix {
    sample_size: usize,
    dim: usize,
    values: Vec<f64>,
}

impl CovarianceMatrix {
    pub fn from_dataset(data: &Dataset) -> Self {
        let n = data.num_rows();
        let dim = data.num_columns();
        let divisor = n.saturating_sub(1).max(1) as f64;

        let centered: Vec<Vec<f64>> = data
            .columns()
            .iter()
            .map(|col| {
                let mean = col.iter().sum::<f64>() / n as f64;
                col.iter().map(|v| v - mean).collect()
            })
            .collect();

        let rows: Vec<Vec<f64>> = (0..dim)
            .into_par_iter()
            .map(|i| {
                (0..dim)
                    .map(|j| {
                        centered[i]
                            .iter()
                            .zip(&centered[j])
                            .map(|(a, b)| a * b)
                            .sum::<f64>()
                            / divisor
                    })
                    .collect()
            })
            .collect();

        Self {
            sample_size: n,
            dim,
            values: rows.into_iter().flatten().collect(),
        }
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.dim + j]
    }

    /// Row-major `k x k` submatrix over `indices`.
    pub fn submatrix(&self, indices: &[usize]) -> Vec<f64> {
        indices
            .iter()
            .flat_map(|&i| indices.iter().map(move |&j| self.get(i, j)))
            .collect()
    }

    pub fn check_index(&self, index: usize) -> Result<(), OracleError> {
        if index < self.dim {
            Ok(())
        } else {
            Err(OracleError::UnknownVariable {
                index,
                count: self.dim,
            })
        }
    }

    /// Variance of `y` left after regressing it on `parents`.
    pub fn residual_variance(&self, y: usize, parents: &[usize]) -> Result<f64, OracleError> {
        let syy = self.get(y, y);
        let variance = if parents.is_empty() {
            syy
        } else {
            let k = parents.len();
            let l = cholesky(&self.submatrix(parents), k)
                .ok_or_else(|| OracleError::degenerate("singular parent covariance"))?;
            let spy: Vec<f64> = parents.iter().map(|&p| self.get(p, y)).collect();
            let beta = cholesky_solve(&l, k, &spy);
            syy - spy.iter().zip(&beta).map(|(a, b)| a * b).sum::<f64>()
        };

        if !variance.is_finite() || variance <= SINGULARITY_TOLERANCE {
            return Err(OracleError::degenerate(format!(
                "non-positive residual variance {variance}"
            )));
        }
        Ok(variance)
    }

    /// Partial correlation of `x` and `y` given `z`, from the precision matrix
    /// of the `{x, y} ∪ z` block.
    pub fn partial_correlation(&self, x: usize, y: usize, z: &[usize]) -> Result<f64, OracleError> {
        let mut indices = Vec::with_capacity(z.len() + 2);
        indices.push(x);
        indices.push(y);
        indices.extend_from_slice(z);
        let k = indices.len();

        let l = cholesky(&self.submatrix(&indices), k)
            .ok_or_else(|| OracleError::degenerate("singular covariance submatrix"))?;
        let precision = cholesky_inverse(&l, k);

        let r = -precision[1] / (precision[0] * precision[k + 1]).sqrt();
        if !r.is_finite() {
            return Err(OracleError::degenerate("undefined partial correlation"));
        }
        Ok(r.clamp(-1.0, 1.0))
    }
}

/// Lower-triangular Cholesky factor of a row-major SPD matrix, or `None` if a
/// pivot is not safely positive.
pub fn cholesky(a: &[f64], k: usize) -> Option<Vec<f64>> {
    let mut l = vec![0.0; k * k];
    for i in 0..k {
        for j in 0..=i {
            let dot: f64 = (0..j).map(|m| l[i * k + m] * l[j * k + m]).sum();
            if i == j {
                let pivot = a[i * k + i] - dot;
                if !pivot.is_finite() || pivot <= SINGULARITY_TOLERANCE {
                    return None;
                }
                l[i * k + i] = pivot.sqrt();
            } else {
                l[i * k + j] = (a[i * k + j] - dot) / l[j * k + j];
            }
        }
    }
    Some(l)
}

/// Solve `L Lᵀ x = b` given the Cholesky factor `L`.
pub fn cholesky_solve(l: &[f64], k: usize, b: &[f64]) -> Vec<f64> {
    let mut y = vec![0.0; k];
    for i in 0..k {
        let dot: f64 = (0..i).map(|m| l[i * k + m] * y[m]).sum();
        y[i] = (b[i] - dot) / l[i * k + i];
    }
    let mut x = vec![0.0; k];
    for i in (0..k).rev() {
        let dot: f64 = ((i + 1)..k).map(|m| l[m * k + i] * x[m]).sum();
        x[i] = (y[i] - dot) / l[i * k + i];
    }
    x
}

/// Inverse of `L Lᵀ`, column by column.
pub fn cholesky_inverse(l: &[f64], k: usize) -> Vec<f64> {
    let mut inverse = vec![0.0; k * k];
    let mut e = vec![0.0; k];
    for col in 0..k {
        e.iter_mut().for_each(|v| *v = 0.0);
        e[col] = 1.0;
        let x = cholesky_solve(l, k, &e);
        for row in 0..k {
            inverse[row * k + col] = x[row];
        }
    }
    inverse
}
