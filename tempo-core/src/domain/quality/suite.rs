// tempo-core/src/domain/quality/suite.rs

use std::collections::HashMap;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::domain::error::DomainError;
use crate::domain::quality::check::{Check, CheckDefinition};

/// Ordered set of check definitions for one table.
///
/// The declarative format is a mapping from check name to its parameter
/// mapping, run in file order:
///
/// ```yaml
/// has_rows: {}
/// row_count_between: { lower_bound: 5000, upper_bound: 10000 }
/// no_nulls: { column: playid }
/// all_distinct: { column: playid }
/// ```
#[derive(Debug, Clone, Default)]
pub struct QualitySuite {
    pub checks: Vec<CheckDefinition>,
}

impl QualitySuite {
    pub fn new(checks: Vec<CheckDefinition>) -> Self {
        Self { checks }
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Resolve and type every definition. All configuration errors surface
    /// here, before a single query has run.
    pub fn validate(&self) -> Result<Vec<Check>, DomainError> {
        self.checks.iter().map(Check::from_definition).collect()
    }
}

impl<'de> Deserialize<'de> for QualitySuite {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mapping = serde_yaml::Mapping::deserialize(deserializer)?;
        let mut checks = Vec::with_capacity(mapping.len());

        for (key, value) in mapping {
            let name = key
                .as_str()
                .ok_or_else(|| de::Error::custom("check name must be a string"))?
                .to_string();

            let params = match value {
                serde_yaml::Value::Null => HashMap::new(),
                serde_yaml::Value::Mapping(params) => params
                    .into_iter()
                    .map(|(k, v)| {
                        let k = k
                            .as_str()
                            .ok_or_else(|| {
                                de::Error::custom(format!(
                                    "parameter names of check '{name}' must be strings"
                                ))
                            })?
                            .to_string();
                        Ok((k, v))
                    })
                    .collect::<Result<_, D::Error>>()?,
                _ => {
                    return Err(de::Error::custom(format!(
                        "parameters of check '{name}' must be a mapping"
                    )));
                }
            };

            checks.push(CheckDefinition { name, params });
        }

        Ok(QualitySuite { checks })
    }
}

impl Serialize for QualitySuite {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.checks.len()))?;
        for def in &self.checks {
            map.serialize_entry(&def.name, &def.params)?;
        }
        map.end()
    }
}
