// tempo-core/src/domain/project/configuration.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::quality::QualitySuite;

/// Warehouse engine backing the pipeline.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    #[default]
    DuckDB,
}

/// Disposition of the fact load.
///
/// Both dispositions run the same insert statement; `Append` only skips the
/// TRUNCATE, so replayed appends can duplicate play ids. Truncate is the
/// idempotent default.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WriteDisposition {
    #[default]
    Truncate,
    Append,
}

/// Object storage session settings: region plus a fixed credential pair.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StorageConfig {
    #[serde(default = "default_region")]
    pub region: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_access_key: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            access_key_id: None,
            secret_access_key: None,
        }
    }
}

/// JSON layout of a staging source.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum JsonFormat {
    #[default]
    Auto,
    NewlineDelimited,
}

/// One staging source: a JSON location bulk-loaded into a staging table.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StagingSource {
    pub table: String,
    pub path: String,
    #[serde(default)]
    pub format: JsonFormat,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct QualityConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub suites: HashMap<String, QualitySuite>,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            suites: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PipelineConfig {
    pub name: String,
    pub version: String,

    #[serde(default = "default_profile")]
    pub profile: String,

    #[serde(default)]
    pub engine: Engine,

    #[serde(rename = "db-path", default = "default_db_path")]
    pub db_path: String,

    #[serde(rename = "config-paths", default)]
    pub config_paths: Vec<String>,

    #[serde(rename = "target-path", default = "default_target_path")]
    pub target_path: String,

    #[serde(rename = "clean-targets", default = "default_clean_targets")]
    pub clean_targets: Vec<String>,

    #[serde(rename = "fact-load", default)]
    pub fact_load: WriteDisposition,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub sources: Vec<StagingSource>,

    #[serde(default)]
    pub quality: QualityConfig,
}

fn default_profile() -> String {
    "dev".to_string()
}
fn default_db_path() -> String {
    "tempo_db.duckdb".to_string()
}
fn default_target_path() -> String {
    "target".to_string()
}
fn default_clean_targets() -> Vec<String> {
    vec!["target".to_string()]
}
fn default_region() -> String {
    "us-west-2".to_string()
}
fn default_true() -> bool {
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_defaults() {
        let config: PipelineConfig =
            serde_yaml::from_str("name: sparkline\nversion: \"0.1.0\"\n").unwrap();
        assert_eq!(config.profile, "dev");
        assert_eq!(config.engine, Engine::DuckDB);
        assert_eq!(config.db_path, "tempo_db.duckdb");
        assert_eq!(config.target_path, "target");
        assert_eq!(config.fact_load, WriteDisposition::Truncate);
        assert!(config.quality.enabled);
        assert!(config.sources.is_empty());
        assert_eq!(config.storage.region, "us-west-2");
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
name: sparkline
version: "0.1.0"
engine: duckdb
db-path: warehouse.duckdb
config-paths:
  - config
fact-load: append
storage:
  region: us-west-2
  access_key_id: AKIA123
sources:
  - table: staging_events
    path: s3://udacity-dend/log_data/*.json
    format: newline-delimited
  - table: staging_songs
    path: s3://udacity-dend/song_data/*.json
quality:
  suites:
    songplays:
      has_rows: {}
      row_count_between: { lower_bound: 5000, upper_bound: 10000 }
"#;
        let config: PipelineConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.db_path, "warehouse.duckdb");
        assert_eq!(config.fact_load, WriteDisposition::Append);
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.sources[0].format, JsonFormat::NewlineDelimited);
        assert_eq!(config.sources[1].format, JsonFormat::Auto);

        let suite = config.quality.suites.get("songplays").unwrap();
        assert_eq!(suite.len(), 2);
        assert_eq!(suite.checks[0].name, "has_rows");
        assert_eq!(suite.checks[1].name, "row_count_between");
    }
}
