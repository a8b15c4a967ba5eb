use serde::{Deserialize, Serialize};

/// A named measured variable and its column position in a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variable {
    name: String,
    index: usize,
}

impl Variable {
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Render a variable list as `a, b, c` for error messages.
pub fn join_names(variables: &[Variable]) -> String {
    variables
        .iter()
        .map(Variable::name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// True when both lists carry the same names in the same order.
pub fn same_names(a: &[Variable], b: &[Variable]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.name == y.name)
}
