use std::path::Path;

use serde::{Deserialize, Serialize};

use labore_core::procedures::BASELINE_MANDATORY;

use crate::error::StorageError;
use crate::state;

/// Contents of `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logo shown in the app header.
    #[serde(default)]
    pub logo_path: Option<String>,
    /// Logo drawn in the PDF header band.
    #[serde(default)]
    pub logo_pdf_path: Option<String>,
    #[serde(default = "baseline_mandatory")]
    pub mandatory_procedures: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logo_path: None,
            logo_pdf_path: None,
            mandatory_procedures: baseline_mandatory(),
        }
    }
}

fn baseline_mandatory() -> Vec<String> {
    BASELINE_MANDATORY.iter().map(|s| s.to_string()).collect()
}

/// Load `config.json`. A missing or unreadable file yields the defaults; one
/// that does not parse is moved aside to `config.json.bak`.
pub fn load_config(path: &Path) -> AppConfig {
    match try_load_config(path) {
        Ok(config) => config,
        Err(StorageError::NotFound { .. }) => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            AppConfig::default()
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "unreadable config, using defaults");
            if matches!(e, StorageError::Serialization(_) | StorageError::Shape(_)) {
                state::set_aside(path);
            }
            AppConfig::default()
        }
    }
}

fn try_load_config(path: &Path) -> Result<AppConfig, StorageError> {
    // Parse as raw JSON so legacy keys can be migrated before deserializing.
    let json: serde_json::Value = state::load_state(path)?;
    let migrated = migrate(json)?;
    Ok(serde_json::from_value(migrated)?)
}

/// Files written by the first release used a Portuguese key for the
/// mandatory list. Renamed in place; an existing new-style key wins.
fn migrate(mut json: serde_json::Value) -> Result<serde_json::Value, StorageError> {
    let obj = json
        .as_object_mut()
        .ok_or_else(|| StorageError::Shape("config is not a JSON object".to_string()))?;

    if let Some(legacy) = obj.remove("procedimentos_obrigatorios") {
        obj.entry("mandatory_procedures").or_insert(legacy);
        tracing::info!("migrated legacy config key procedimentos_obrigatorios");
    }

    Ok(json)
}

pub fn save_config(path: &Path, config: &AppConfig) -> Result<(), StorageError> {
    state::save_state(path, config)?;
    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
