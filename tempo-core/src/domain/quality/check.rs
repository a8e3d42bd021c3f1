// tempo-core/src/domain/quality/check.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// The fixed set of quality check kinds.
///
/// The registry is an immutable lookup built at compile time; resolving a
/// name never mutates anything. Any name outside this set is a
/// configuration error, not a runtime assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    HasRows,
    RowCountBetween,
    NoNulls,
    AllDistinct,
}

impl CheckKind {
    pub const REGISTRY: [CheckKind; 4] = [
        CheckKind::HasRows,
        CheckKind::RowCountBetween,
        CheckKind::NoNulls,
        CheckKind::AllDistinct,
    ];

    pub fn resolve(name: &str) -> Result<Self, DomainError> {
        Self::REGISTRY
            .iter()
            .copied()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| DomainError::UnknownCheck(name.to_string()))
    }

    pub const fn name(self) -> &'static str {
        match self {
            CheckKind::HasRows => "has_rows",
            CheckKind::RowCountBetween => "row_count_between",
            CheckKind::NoNulls => "no_nulls",
            CheckKind::AllDistinct => "all_distinct",
        }
    }

    pub const fn required_params(self) -> &'static [&'static str] {
        match self {
            CheckKind::HasRows => &[],
            CheckKind::RowCountBetween => &["lower_bound", "upper_bound"],
            CheckKind::NoNulls => &["column"],
            CheckKind::AllDistinct => &["column"],
        }
    }
}

/// Declarative form of one check, as written in configuration:
/// a check name plus a free-form parameter mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckDefinition {
    pub name: String,
    #[serde(default)]
    pub params: HashMap<String, serde_yaml::Value>,
}

impl CheckDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: HashMap::new(),
        }
    }

    pub fn with_param(mut self, key: &str, value: impl Into<serde_yaml::Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    fn param_i64(&self, kind: CheckKind, key: &'static str) -> Result<i64, DomainError> {
        self.params
            .get(key)
            .and_then(serde_yaml::Value::as_i64)
            .ok_or(DomainError::InvalidParameter {
                check: kind.name(),
                parameter: key,
                expected: "an integer",
            })
    }

    fn param_str(&self, kind: CheckKind, key: &'static str) -> Result<String, DomainError> {
        self.params
            .get(key)
            .and_then(serde_yaml::Value::as_str)
            .map(str::to_string)
            .ok_or(DomainError::InvalidParameter {
                check: kind.name(),
                parameter: key,
                expected: "a string",
            })
    }
}

/// Validated, typed form of a check, ready to evaluate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    HasRows,
    RowCountBetween { lower_bound: i64, upper_bound: i64 },
    NoNulls { column: String },
    AllDistinct { column: String },
}

impl Check {
    /// Resolve a definition against the registry.
    ///
    /// Dispatch is strictly by check name; the parameter shape plays no
    /// part in selecting the kind. Every required parameter must be
    /// present and well-typed before any query is issued.
    pub fn from_definition(def: &CheckDefinition) -> Result<Self, DomainError> {
        let kind = CheckKind::resolve(&def.name)?;

        for &parameter in kind.required_params() {
            if !def.params.contains_key(parameter) {
                return Err(DomainError::MissingParameter {
                    check: kind.name(),
                    parameter,
                });
            }
        }

        match kind {
            CheckKind::HasRows => Ok(Check::HasRows),
            CheckKind::RowCountBetween => {
                let lower_bound = def.param_i64(kind, "lower_bound")?;
                let upper_bound = def.param_i64(kind, "upper_bound")?;
                if lower_bound > upper_bound {
                    return Err(DomainError::InvalidBounds {
                        lower: lower_bound,
                        upper: upper_bound,
                    });
                }
                Ok(Check::RowCountBetween {
                    lower_bound,
                    upper_bound,
                })
            }
            CheckKind::NoNulls => Ok(Check::NoNulls {
                column: def.param_str(kind, "column")?,
            }),
            CheckKind::AllDistinct => Ok(Check::AllDistinct {
                column: def.param_str(kind, "column")?,
            }),
        }
    }

    pub fn kind(&self) -> CheckKind {
        match self {
            Check::HasRows => CheckKind::HasRows,
            Check::RowCountBetween { .. } => CheckKind::RowCountBetween,
            Check::NoNulls { .. } => CheckKind::NoNulls,
            Check::AllDistinct { .. } => CheckKind::AllDistinct,
        }
    }
}
