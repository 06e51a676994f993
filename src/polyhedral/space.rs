//! Spaces describe the dimensions of a constraint system.
//!
//! A space is the triple (parameters, input dimensions, output dimensions),
//! each dimension optionally carrying the name it was declared with:
//! - Parameter dimensions (symbolic constants)
//! - Input dimensions (maps only; zero for sets)
//! - Output dimensions (the set dimensions of a set)
//!
//! Rows of a constraint system lay their columns out in exactly this order,
//! after the constant term and before any existential dimensions.

use serde::{Serialize, Deserialize};
use std::fmt;

/// The kind of a dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DimType {
    /// Symbolic constant
    Param,
    /// Domain dimension of a map
    In,
    /// Range dimension of a map, or set dimension
    Out,
    /// Existentially quantified local dimension
    Div,
}

/// The dimension descriptor of a set or map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    /// Number of parameter dimensions
    pub n_param: usize,
    /// Number of input dimensions (zero for sets)
    pub n_in: usize,
    /// Number of output/set dimensions
    pub n_out: usize,
    /// Parameter names, empty when no parameter is named
    pub param_names: Vec<Option<String>>,
    /// Input dimension names, empty when no input dimension is named
    pub in_names: Vec<Option<String>>,
    /// Output dimension names, empty when no output dimension is named
    pub out_names: Vec<Option<String>>,
}

impl Space {
    /// Create a set space with the given number of dimensions.
    pub fn set(n_dim: usize) -> Self {
        Self::map_with_params(0, n_dim, 0)
    }

    /// Create a set space with parameters.
    pub fn set_with_params(n_dim: usize, n_param: usize) -> Self {
        Self::map_with_params(0, n_dim, n_param)
    }

    /// Create a map space.
    pub fn map(n_in: usize, n_out: usize) -> Self {
        Self::map_with_params(n_in, n_out, 0)
    }

    /// Create a map space with parameters; all dimensions unnamed.
    ///
    /// Unnamed dimensions take no storage, so the counts may come straight
    /// from untrusted input.
    pub fn map_with_params(n_in: usize, n_out: usize, n_param: usize) -> Self {
        Self {
            n_param,
            n_in,
            n_out,
            param_names: Vec::new(),
            in_names: Vec::new(),
            out_names: Vec::new(),
        }
    }

    /// Check if this is a set space (no input dimensions).
    pub fn is_set(&self) -> bool {
        self.n_in == 0
    }

    /// Number of dimensions of the given type. Spaces have no existentials.
    pub fn dim(&self, ty: DimType) -> usize {
        match ty {
            DimType::Param => self.n_param,
            DimType::In => self.n_in,
            DimType::Out => self.n_out,
            DimType::Div => 0,
        }
    }

    /// Total number of dimensions.
    pub fn total_dim(&self) -> usize {
        self.n_param + self.n_in + self.n_out
    }

    /// Offset of the first dimension of `ty` among the variable columns.
    pub fn offset(&self, ty: DimType) -> usize {
        match ty {
            DimType::Param => 0,
            DimType::In => self.n_param,
            DimType::Out => self.n_param + self.n_in,
            DimType::Div => self.total_dim(),
        }
    }

    /// Set parameter names.
    pub fn with_param_names(mut self, names: Vec<Option<String>>) -> Self {
        debug_assert_eq!(names.len(), self.n_param);
        self.param_names = names;
        self
    }

    /// Set input dimension names.
    pub fn with_in_names(mut self, names: Vec<Option<String>>) -> Self {
        debug_assert_eq!(names.len(), self.n_in);
        self.in_names = names;
        self
    }

    /// Set output dimension names.
    pub fn with_out_names(mut self, names: Vec<Option<String>>) -> Self {
        debug_assert_eq!(names.len(), self.n_out);
        self.out_names = names;
        self
    }

    /// Get the name of a dimension.
    pub fn name(&self, ty: DimType, idx: usize) -> Option<&str> {
        let names = match ty {
            DimType::Param => &self.param_names,
            DimType::In => &self.in_names,
            DimType::Out => &self.out_names,
            DimType::Div => return None,
        };
        names.get(idx).and_then(|n| n.as_deref())
    }

    /// Name of parameter `idx`.
    pub fn param_name(&self, idx: usize) -> Option<&str> {
        self.name(DimType::Param, idx)
    }

    /// Name of input dimension `idx`.
    pub fn in_name(&self, idx: usize) -> Option<&str> {
        self.name(DimType::In, idx)
    }

    /// Name of output dimension `idx`.
    pub fn out_name(&self, idx: usize) -> Option<&str> {
        self.name(DimType::Out, idx)
    }

    /// Names of all dimensions in column order, with defaults for unnamed ones.
    pub fn all_names(&self) -> Vec<String> {
        let group = |ty: DimType, prefix: &str| {
            (0..self.dim(ty))
                .map(|i| {
                    self.name(ty, i)
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("{}{}", prefix, i))
                })
                .collect::<Vec<_>>()
        };
        let mut names = group(DimType::Param, "p");
        names.extend(group(DimType::In, "i"));
        names.extend(group(DimType::Out, "o"));
        names
    }

    /// Check whether two spaces have the same dimension counts.
    pub fn is_compatible(&self, other: &Space) -> bool {
        self.n_param == other.n_param && self.n_in == other.n_in && self.n_out == other.n_out
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_set() {
            write!(f, "[{}]", self.n_out)?;
        } else {
            write!(f, "[{}] -> [{}]", self.n_in, self.n_out)?;
        }
        if self.n_param > 0 {
            write!(f, " : {} params", self.n_param)?;
        }
        Ok(())
    }
}
