//! Lexicographic enumeration of fixed-size subsets.

use causeway_core::models::ConditioningSet;

/// Every `k`-subset of `pool`, in lexicographic order of positions.
///
/// `k == 0` yields the empty set once; `k > pool.len()` yields nothing.
#[derive(Debug, Clone)]
pub struct Combinations<'a> {
    pool: &'a [usize],
    positions: Vec<usize>,
    done: bool,
}

impl<'a> Combinations<'a> {
    pub fn new(pool: &'a [usize], k: usize) -> Self {
        Self {
            pool,
            positions: (0..k).collect(),
            done: k > pool.len(),
        }
    }
}

impl Iterator for Combinations<'_> {
    type Item = ConditioningSet;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current: ConditioningSet = self.positions.iter().map(|&p| self.pool[p]).collect();

        // Advance: find the rightmost position that can still move right.
        let k = self.positions.len();
        let n = self.pool.len();
        match (0..k).rev().find(|&i| self.positions[i] < n - k + i) {
            Some(i) => {
                self.positions[i] += 1;
                for j in (i + 1)..k {
                    self.positions[j] = self.positions[j - 1] + 1;
                }
            }
            None => self.done = true,
        }
        Some(current)
    }
}

/// Number of `k`-subsets of an `n`-set, saturating.
pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1usize, |acc, i| acc.saturating_mul(n - i) / (i + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(pool: &[usize], k: usize) -> Vec<Vec<usize>> {
        Combinations::new(pool, k).map(|s| s.to_vec()).collect()
    }

    #[test]
    fn enumerates_in_lexicographic_order() {
        assert_eq!(
            collect(&[2, 5, 7, 9], 2),
            vec![
                vec![2, 5],
                vec![2, 7],
                vec![2, 9],
                vec![5, 7],
                vec![5, 9],
                vec![7, 9]
            ]
        );
    }

    #[test]
    fn edge_sizes() {
        assert_eq!(collect(&[1, 2], 0), vec![Vec::<usize>::new()]);
        assert_eq!(collect(&[], 0), vec![Vec::<usize>::new()]);
        assert!(collect(&[1, 2], 3).is_empty());
        assert_eq!(collect(&[4, 6, 8], 3), vec![vec![4, 6, 8]]);
    }

    #[test]
    fn counts_match_binomial() {
        let pool: Vec<usize> = (0..9).collect();
        for k in 0..=9 {
            assert_eq!(Combinations::new(&pool, k).count(), binomial(9, k));
        }
        assert_eq!(binomial(3, 5), 0);
    }
}
