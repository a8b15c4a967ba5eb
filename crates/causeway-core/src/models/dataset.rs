//! Column-major numeric datasets.
//!
//! Every statistic the engine computes reads whole columns, so values are
//! stored one `Vec<f64>` per variable. Construction rejects ragged input and
//! non-finite values; later transforms (standardize, rectify, resample) always
//! produce a new dataset and never mutate in place.

use std::collections::HashSet;

use rand::Rng;

use super::variable::{join_names, same_names, Variable};
use crate::errors::DatasetError;

/// A rectangular sample over an ordered list of variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    variables: Vec<Variable>,
    columns: Vec<Vec<f64>>,
    rows: usize,
}

impl Dataset {
    /// Build a dataset from one vector of values per variable.
    pub fn from_columns<S: Into<String>>(
        names: impl IntoIterator<Item = S>,
        columns: Vec<Vec<f64>>,
    ) -> Result<Self, DatasetError> {
        let variables = build_variables(names)?;
        if columns.len() != variables.len() {
            return Err(DatasetError::ColumnCount {
                expected: variables.len(),
                found: columns.len(),
            });
        }

        let rows = columns.first().map(Vec::len).unwrap_or(0);
        if rows == 0 {
            return Err(DatasetError::NoRows);
        }
        for (column, values) in columns.iter().enumerate() {
            if values.len() != rows {
                return Err(DatasetError::ColumnLength {
                    column,
                    expected: rows,
                    found: values.len(),
                });
            }
            if let Some(row) = values.iter().position(|v| !v.is_finite()) {
                return Err(DatasetError::NonFinite { row, column });
            }
        }

        Ok(Self {
            variables,
            columns,
            rows,
        })
    }

    /// Build a dataset from records, each holding one value per variable.
    pub fn from_rows<S: Into<String>>(
        names: impl IntoIterator<Item = S>,
        records: &[Vec<f64>],
    ) -> Result<Self, DatasetError> {
        let variables = build_variables(names)?;
        let width = variables.len();
        if records.is_empty() {
            return Err(DatasetError::NoRows);
        }

        let mut columns = vec![Vec::with_capacity(records.len()); width];
        for (row, record) in records.iter().enumerate() {
            if record.len() != width {
                return Err(DatasetError::Ragged {
                    row,
                    expected: width,
                    found: record.len(),
                });
            }
            for (column, &value) in record.iter().enumerate() {
                if !value.is_finite() {
                    return Err(DatasetError::NonFinite { row, column });
                }
                columns[column].push(value);
            }
        }

        Ok(Self {
            variables,
            columns,
            rows: records.len(),
        })
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn num_rows(&self) -> usize {
        self.rows
    }

    pub fn num_columns(&self) -> usize {
        self.variables.len()
    }

    pub fn column(&self, index: usize) -> &[f64] {
        &self.columns[index]
    }

    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    pub fn value(&self, row: usize, column: usize) -> f64 {
        self.columns[column][row]
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.variables.iter().position(|v| v.name() == name)
    }

    /// True when `other` has the same variable names in the same order.
    pub fn has_same_variables(&self, other: &Dataset) -> bool {
        same_names(&self.variables, &other.variables)
    }

    /// Center every column and scale it to unit sample variance.
    ///
    /// Constant columns (and single-row datasets) are centered only; they have
    /// no scale to remove.
    pub fn standardize(&self) -> Dataset {
        let n = self.rows as f64;
        let columns = self
            .columns
            .iter()
            .map(|values| {
                let mean = values.iter().sum::<f64>() / n;
                let ss = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
                let sd = if self.rows > 1 {
                    (ss / (n - 1.0)).sqrt()
                } else {
                    0.0
                };
                if sd > 0.0 && sd.is_finite() {
                    values.iter().map(|v| (v - mean) / sd).collect()
                } else {
                    values.iter().map(|v| v - mean).collect()
                }
            })
            .collect();

        Dataset {
            variables: self.variables.clone(),
            columns,
            rows: self.rows,
        }
    }

    /// Copy with every negative value replaced by zero.
    pub fn rectified(&self) -> Dataset {
        let columns = self
            .columns
            .iter()
            .map(|values| values.iter().map(|&v| if v < 0.0 { 0.0 } else { v }).collect())
            .collect();

        Dataset {
            variables: self.variables.clone(),
            columns,
            rows: self.rows,
        }
    }

    /// Copy holding only the given rows, in the given order (repeats allowed).
    pub fn select_rows(&self, rows: &[usize]) -> Dataset {
        let columns = self
            .columns
            .iter()
            .map(|values| rows.iter().map(|&r| values[r]).collect())
            .collect();

        Dataset {
            variables: self.variables.clone(),
            columns,
            rows: rows.len(),
        }
    }

    /// Draw `num_rows()` rows with replacement.
    pub fn resample<R: Rng + ?Sized>(&self, rng: &mut R) -> Dataset {
        let picks: Vec<usize> = (0..self.rows).map(|_| rng.gen_range(0..self.rows)).collect();
        self.select_rows(&picks)
    }

    /// Fail unless every dataset shares the first one's variable list and order.
    pub fn check_compatible(datasets: &[Dataset]) -> Result<(), DatasetError> {
        let Some(first) = datasets.first() else {
            return Ok(());
        };
        for (index, other) in datasets.iter().enumerate().skip(1) {
            if !first.has_same_variables(other) {
                return Err(DatasetError::MismatchedVariableSet {
                    index,
                    expected: join_names(&first.variables),
                    found: join_names(&other.variables),
                });
            }
        }
        Ok(())
    }

    /// Stack datasets row-wise. All inputs must share the same variables.
    pub fn concatenate(datasets: &[Dataset]) -> Result<Dataset, DatasetError> {
        let Some(first) = datasets.first() else {
            return Err(DatasetError::NoRows);
        };
        Self::check_compatible(datasets)?;

        let rows = datasets.iter().map(|d| d.rows).sum();
        let columns = (0..first.num_columns())
            .map(|c| {
                let mut column = Vec::with_capacity(rows);
                for dataset in datasets {
                    column.extend_from_slice(&dataset.columns[c]);
                }
                column
            })
            .collect();

        Ok(Dataset {
            variables: first.variables.clone(),
            columns,
            rows,
        })
    }
}

fn build_variables<S: Into<String>>(
    names: impl IntoIterator<Item = S>,
) -> Result<Vec<Variable>, DatasetError> {
    let variables: Vec<Variable> = names
        .into_iter()
        .enumerate()
        .map(|(i, name)| Variable::new(name, i))
        .collect();
    if variables.is_empty() {
        return Err(DatasetError::NoVariables);
    }

    {
        let mut seen = HashSet::new();
        for v in &variables {
            if !seen.insert(v.name()) {
                return Err(DatasetError::DuplicateVariable {
                    name: v.name().to_string(),
                });
            }
        }
    }
    Ok(variables)
}
