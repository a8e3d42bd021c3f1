// tempo-core/src/infrastructure/config/project.rs

use serde::{Deserialize, de::DeserializeOwned};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::domain::project::configuration::PipelineConfig;
use crate::domain::quality::QualitySuite;
use crate::infrastructure::error::InfrastructureError;

// --- LOADER ---

#[instrument(skip(project_dir))] // Log automatique de l'entrée/sortie de la fonction
pub fn load_pipeline_config(project_dir: &Path) -> Result<PipelineConfig, InfrastructureError> {
    // 1. Découverte du fichier principal
    let config_path = find_main_config(project_dir)?;
    info!(path = ?config_path, "Loading project manifest");

    // 2. Chargement YAML Base
    let content = fs::read_to_string(&config_path)?;
    let mut config: PipelineConfig = serde_yaml::from_str(&content)?;

    // 3. Hydratation des Satellites (Fail-Secure)
    if let Some(config_folder) = config.config_paths.first() {
        let config_dir = project_dir.join(config_folder);
        if config_dir.exists() {
            // Ici, si une erreur survient, on propage avec '?'
            load_satellite_configs(&mut config, &config_dir)?;
        }
    }

    // 4. Override via Variables d'Environnement (Pattern 'Layering')
    // Permet de faire: TEMPO_TARGET_PATH=/tmp/build tempo run
    apply_env_overrides(&mut config);

    Ok(config)
}

fn find_main_config(root: &Path) -> Result<PathBuf, InfrastructureError> {
    let candidates = ["tempo_project_conf.yaml", "tempo.yaml"];
    for filename in candidates {
        let p = root.join(filename);
        if p.exists() {
            return Ok(p);
        }
    }
    Err(InfrastructureError::ConfigNotFound(format!(
        "No configuration file found in {:?}. Checked: {:?}",
        root, candidates
    )))
}

// --- LOGIQUE GÉNÉRIQUE ---

/// Charge un fragment de configuration typé depuis un fichier.
/// T est le type de la struct Wrapper attendue dans le fichier.
fn load_fragment<T: DeserializeOwned>(path: &Path) -> Result<T, InfrastructureError> {
    let content = fs::read_to_string(path)?;
    serde_yaml::from_str(&content).map_err(Into::into)
}

fn load_satellite_configs(
    config: &mut PipelineConfig,
    config_dir: &Path,
) -> Result<(), InfrastructureError> {
    // Quality suites per table
    let qual_path = config_dir.join("quality.yml");
    if qual_path.exists() {
        #[derive(Deserialize)]
        struct QualityWrapper {
            #[serde(default = "default_true")]
            enabled: bool,
            #[serde(default)]
            suites: HashMap<String, QualitySuite>,
        }

        // Note le '?' ici : Si le fichier est corrompu, on ARRÊTE tout.
        let wrapper: QualityWrapper = load_fragment(&qual_path)?;
        config.quality.enabled = wrapper.enabled;
        config.quality.suites.extend(wrapper.suites);
        info!("  ✅ Quality suites loaded");
    }

    Ok(())
}

fn default_true() -> bool {
    true
}

fn apply_env_overrides(config: &mut PipelineConfig) {
    if let Ok(val) = std::env::var("TEMPO_TARGET_PATH") {
        info!(old = ?config.target_path, new = ?val, "Overriding target path via ENV");
        config.target_path = val;
    }
    if let Ok(val) = std::env::var("TEMPO_PROFILE") {
        info!(old = ?config.profile, new = ?val, "Overriding profile via ENV");
        config.profile = val;
    }
    if let Ok(val) = std::env::var("TEMPO_DB_PATH") {
        info!(old = ?config.db_path, new = ?val, "Overriding db path via ENV");
        config.db_path = val;
    }
    // The fixed credential pair is usually injected, not committed.
    if let Ok(val) = std::env::var("TEMPO_S3_ACCESS_KEY_ID") {
        config.storage.access_key_id = Some(val);
    }
    if let Ok(val) = std::env::var("TEMPO_S3_SECRET_ACCESS_KEY") {
        config.storage.secret_access_key = Some(val);
    }
}
