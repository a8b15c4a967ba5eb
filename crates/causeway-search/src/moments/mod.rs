//! Sign-partitioned moments of standardized variable pairs.
//!
//! Skewed causes leave an asymmetric trace in the one-sided regressions of a
//! pair: the slope of `y` on `x` over the rows where `x > 0` differs from the
//! slope of `x` on `y` over the rows where `y > 0`. These statistics drive
//! both the candidate heuristic and the orientation rules.

use causeway_core::errors::OracleError;

/// Sign with `0.0` mapping to `0` (unlike [`f64::signum`]).
pub fn sign(v: f64) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Which rows of a pair enter a partial statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    All,
    XPositive,
    YPositive,
    XNegative,
    YNegative,
}

impl Part {
    fn admits(&self, x: f64, y: f64) -> bool {
        match self {
            Self::All => true,
            Self::XPositive => x > 0.0,
            Self::YPositive => y > 0.0,
            Self::XNegative => x < 0.0,
            Self::YNegative => y < 0.0,
        }
    }
}

/// Covariance over the `m` rows admitted by `part`, divided by `m`.
/// An empty subset yields 0.
pub fn covariance_of_part(x: &[f64], y: &[f64], part: Part) -> f64 {
    let rows: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .map(|(&a, &b)| (a, b))
        .filter(|&(a, b)| part.admits(a, b))
        .collect();
    let m = rows.len();
    if m == 0 {
        return 0.0;
    }
    let (mx, my) = rows
        .iter()
        .fold((0.0, 0.0), |(sx, sy), (a, b)| (sx + a, sy + b));
    let (mx, my) = (mx / m as f64, my / m as f64);
    rows.iter().map(|(a, b)| (a - mx) * (b - my)).sum::<f64>() / m as f64
}

pub fn covariance(x: &[f64], y: &[f64]) -> f64 {
    covariance_of_part(x, y, Part::All)
}

/// One-sided second moments and their slope ratios, computed for every pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OneSidedMoments {
    /// Mean of `x*y` over rows with `x > 0`.
    pub sxy_xp: f64,
    /// Mean of `x*x` over rows with `x > 0`.
    pub sxx_xp: f64,
    /// Mean of `x*y` over rows with `y > 0`.
    pub sxy_yp: f64,
    /// Mean of `y*y` over rows with `y > 0`.
    pub syy_yp: f64,
    /// `sxy_xp / sxx_xp`, or 0 when no row has `x > 0`.
    pub q1: f64,
    /// `sxy_yp / syy_yp`, or 0 when no row has `y > 0`.
    pub q2: f64,
}

impl OneSidedMoments {
    pub fn compute(x: &[f64], y: &[f64]) -> Result<Self, OracleError> {
        let (mut sxy_xp, mut sxx_xp, mut na) = (0.0, 0.0, 0usize);
        let (mut sxy_yp, mut syy_yp, mut nb) = (0.0, 0.0, 0usize);

        for (&a, &b) in x.iter().zip(y) {
            if a > 0.0 {
                sxy_xp += a * b;
                sxx_xp += a * a;
                na += 1;
            }
            if b > 0.0 {
                sxy_yp += a * b;
                syy_yp += b * b;
                nb += 1;
            }
        }

        let mean = |sum: f64, count: usize| if count == 0 { 0.0 } else { sum / count as f64 };
        let ratio = |num: f64, den: f64| if den == 0.0 { 0.0 } else { num / den };

        let (sxy_xp, sxx_xp) = (mean(sxy_xp, na), mean(sxx_xp, na));
        let (sxy_yp, syy_yp) = (mean(sxy_yp, nb), mean(syy_yp, nb));
        let moments = Self {
            sxy_xp,
            sxx_xp,
            sxy_yp,
            syy_yp,
            q1: ratio(sxy_xp, sxx_xp),
            q2: ratio(sxy_yp, syy_yp),
        };

        if [moments.sxy_xp, moments.sxy_yp, moments.q1, moments.q2]
            .iter()
            .any(|v| !v.is_finite())
        {
            return Err(OracleError::degenerate("non-finite one-sided moments"));
        }
        Ok(moments)
    }
}

/// Full statistics for a pair that reaches the orientation rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairMoments {
    pub one_sided: OneSidedMoments,
    /// Covariance over all rows.
    pub c: f64,
    /// Covariance over rows with `x > 0`.
    pub c1: f64,
    /// Covariance over rows with `y > 0`.
    pub c2: f64,
    /// Covariance over rows with `x < 0`.
    pub c3: f64,
    /// Covariance over rows with `y < 0`.
    pub c4: f64,
}

impl PairMoments {
    pub fn compute(x: &[f64], y: &[f64], one_sided: OneSidedMoments) -> Result<Self, OracleError> {
        let moments = Self {
            one_sided,
            c: covariance(x, y),
            c1: covariance_of_part(x, y, Part::XPositive),
            c2: covariance_of_part(x, y, Part::YPositive),
            c3: covariance_of_part(x, y, Part::XNegative),
            c4: covariance_of_part(x, y, Part::YNegative),
        };
        if [moments.c, moments.c1, moments.c2, moments.c3, moments.c4]
            .iter()
            .any(|v| !v.is_finite())
        {
            return Err(OracleError::degenerate("non-finite partial covariance"));
        }
        Ok(moments)
    }

    /// The full covariance sign disagrees with both variables' sign-partitioned
    /// covariances.
    pub fn sign_disagreement(&self) -> bool {
        let s = sign(self.c);
        let x_agrees = s == sign(self.c1) && s == sign(self.c3);
        let y_agrees = s == sign(self.c2) && s == sign(self.c4);
        !x_agrees && !y_agrees
    }

    /// Skew direction score; positive favours `x -> y`.
    pub fn skew_score(&self) -> f64 {
        self.c * (self.one_sided.sxy_xp - self.one_sided.sxy_yp)
    }
}
