//! Full factorial designs.
//!
//! Crossing every level of every factor yields a sample in which the factors
//! are exactly independent: every cross moment factorizes, so sample
//! covariances and partial correlations between them are zero up to rounding.

/// One column per factor, with one row for every combination of levels. The
/// last factor varies fastest.
pub fn product_columns(levels: &[&[f64]]) -> Vec<Vec<f64>> {
    let rows: usize = levels.iter().map(|l| l.len()).product();
    let mut columns: Vec<Vec<f64>> = levels.iter().map(|_| Vec::with_capacity(rows)).collect();

    for r in 0..rows {
        let mut rest = r;
        for (f, factor) in levels.iter().enumerate().rev() {
            columns[f].push(factor[rest % factor.len()]);
            rest /= factor.len();
        }
    }
    columns
}

/// Ten skewed levels with mean near zero, a convenient default factor.
pub const SKEWED_LEVELS: [f64; 10] = [-1.0, -0.8, -0.7, -0.5, -0.3, 0.0, 0.2, 0.6, 1.1, 2.4];
