// tempo-core/src/domain/project/mod.rs

pub mod configuration;

pub use configuration::{
    Engine, JsonFormat, PipelineConfig, QualityConfig, StagingSource, StorageConfig,
    WriteDisposition,
};
