//! The procedure catalog and the mandatory list.
//!
//! Two files back this: `procedures.json` (name → attributes, insertion
//! ordered) and `config.json` (which holds the mandatory list). Every
//! mutation builds the next state, writes it, and only then replaces the
//! in-memory copy, so a failed write leaves both untouched.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use labore_core::models::procedure::{ChecklistItem, ProcedureAttributes, ProcedureDefinition};
use labore_core::procedures::{BASELINE_MANDATORY, DEFAULT_CATALOG};

use crate::config::{self, AppConfig};
use crate::error::{CatalogError, StorageError};
use crate::paths::DataPaths;
use crate::state;

/// The two shapes `procedures.json` has had.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Keyed(serde_json::Map<String, serde_json::Value>),
    /// First release: a bare list of names, no attributes.
    Legacy(Vec<String>),
}

impl CatalogFile {
    fn normalize(self) -> Result<Vec<ProcedureDefinition>, StorageError> {
        match self {
            CatalogFile::Keyed(map) => map
                .into_iter()
                .map(|(name, value)| -> Result<ProcedureDefinition, StorageError> {
                    let attrs: ProcedureAttributes = serde_json::from_value(value)?;
                    Ok(ProcedureDefinition {
                        name,
                        requires_report: attrs.requires_report,
                    })
                })
                .collect(),
            CatalogFile::Legacy(names) => {
                tracing::info!(count = names.len(), "importing legacy procedure list");
                let mut definitions: Vec<ProcedureDefinition> = Vec::with_capacity(names.len());
                for name in names {
                    if !definitions.iter().any(|d| d.name == name) {
                        definitions.push(ProcedureDefinition::new(name));
                    }
                }
                Ok(definitions)
            }
        }
    }
}

fn read_catalog(path: &Path) -> Result<Vec<ProcedureDefinition>, StorageError> {
    let raw: serde_json::Value = state::load_state(path)?;
    let file: CatalogFile = serde_json::from_value(raw).map_err(|_| {
        StorageError::Shape("procedures file is neither a map nor a list".to_string())
    })?;
    file.normalize()
}

fn write_catalog(path: &Path, procedures: &[ProcedureDefinition]) -> Result<(), StorageError> {
    let mut map = serde_json::Map::with_capacity(procedures.len());
    for def in procedures {
        let attrs = ProcedureAttributes {
            requires_report: def.requires_report,
        };
        map.insert(def.name.clone(), serde_json::to_value(attrs)?);
    }
    state::save_state(path, &map)
}

fn default_catalog() -> Vec<ProcedureDefinition> {
    DEFAULT_CATALOG
        .iter()
        .map(|name| ProcedureDefinition::new(*name))
        .collect()
}

pub struct ProcedureCatalog {
    catalog_path: PathBuf,
    config_path: PathBuf,
    procedures: Vec<ProcedureDefinition>,
    config: AppConfig,
}

impl ProcedureCatalog {
    /// Load both files. Never fails: a missing catalog is seeded with the
    /// default procedures and written out, anything unreadable falls back
    /// to defaults in memory. A catalog that does not parse is moved aside
    /// to `procedures.json.bak` first.
    pub fn load(paths: &DataPaths) -> Self {
        let catalog_path = paths.catalog();
        let config_path = paths.config();

        let procedures = match read_catalog(&catalog_path) {
            Ok(procedures) => procedures,
            Err(StorageError::NotFound { .. }) => {
                let seeded = default_catalog();
                if let Err(e) = write_catalog(&catalog_path, &seeded) {
                    tracing::warn!(error = %e, "failed to seed procedure catalog");
                } else {
                    tracing::info!(path = %catalog_path.display(), "seeded procedure catalog");
                }
                seeded
            }
            Err(e) => {
                tracing::warn!(
                    path = %catalog_path.display(),
                    error = %e,
                    "unreadable procedure catalog, using defaults"
                );
                if matches!(e, StorageError::Serialization(_) | StorageError::Shape(_)) {
                    state::set_aside(&catalog_path);
                }
                default_catalog()
            }
        };

        let config = config::load_config(&config_path);

        Self {
            catalog_path,
            config_path,
            procedures,
            config,
        }
    }

    pub fn definitions(&self) -> &[ProcedureDefinition] {
        &self.procedures
    }

    pub fn names(&self) -> Vec<String> {
        self.procedures.iter().map(|d| d.name.clone()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Unknown names do not require a report.
    pub fn requires_report(&self, name: &str) -> bool {
        self.procedures
            .iter()
            .find(|d| d.name == name)
            .is_some_and(|d| d.requires_report)
    }

    pub fn mandatory(&self) -> &[String] {
        &self.config.mandatory_procedures
    }

    pub fn is_mandatory(&self, name: &str) -> bool {
        self.config.mandatory_procedures.iter().any(|m| m == name)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Case-insensitive substring filter over the catalog, in catalog order.
    pub fn search(&self, filter: &str) -> Vec<&ProcedureDefinition> {
        let needle = filter.trim().to_lowercase();
        self.procedures
            .iter()
            .filter(|d| needle.is_empty() || d.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Resolve a selection into printable rows.
    pub fn items_for(&self, selected: &[String]) -> Vec<ChecklistItem> {
        selected
            .iter()
            .map(|name| ChecklistItem {
                name: name.clone(),
                requires_report: self.requires_report(name),
            })
            .collect()
    }

    pub fn add(&mut self, name: &str) -> Result<(), CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if self.contains(name) {
            return Err(CatalogError::Duplicate(name.to_string()));
        }

        let mut next = self.procedures.clone();
        next.push(ProcedureDefinition::new(name));
        self.commit_procedures(next)?;
        tracing::info!(procedure = name, "procedure added");
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Result<(), CatalogError> {
        let idx = self
            .position(name)
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))?;

        let mut next = self.procedures.clone();
        next.remove(idx);
        self.commit_procedures(next)?;
        tracing::info!(procedure = name, "procedure removed");
        Ok(())
    }

    /// Rekey `old` as `new`, keeping its catalog position, its attributes
    /// and its slot in the mandatory list.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<(), CatalogError> {
        let new = new.trim();
        let idx = self
            .position(old)
            .ok_or_else(|| CatalogError::NotFound(old.to_string()))?;
        if new.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if self.contains(new) {
            return Err(CatalogError::Duplicate(new.to_string()));
        }

        let mut procedures = self.procedures.clone();
        procedures[idx].name = new.to_string();

        let mut config = self.config.clone();
        for slot in config
            .mandatory_procedures
            .iter_mut()
            .filter(|m| m.as_str() == old)
        {
            *slot = new.to_string();
        }

        write_catalog(&self.catalog_path, &procedures)?;
        if config != self.config {
            config::save_config(&self.config_path, &config)?;
        }
        self.procedures = procedures;
        self.config = config;

        tracing::info!(from = old, to = new, "procedure renamed");
        Ok(())
    }

    pub fn set_requires_report(&mut self, name: &str, flag: bool) -> Result<(), CatalogError> {
        let idx = self
            .position(name)
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))?;

        let mut next = self.procedures.clone();
        next[idx].requires_report = flag;
        self.commit_procedures(next)?;
        tracing::info!(procedure = name, requires_report = flag, "report flag updated");
        Ok(())
    }

    /// Flip mandatory membership. Works for names outside the catalog too.
    /// Returns whether `name` is mandatory afterwards.
    pub fn toggle_mandatory(&mut self, name: &str) -> Result<bool, CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        let mut next = self.config.clone();
        let now_mandatory = match next.mandatory_procedures.iter().position(|m| m == name) {
            Some(idx) => {
                next.mandatory_procedures.remove(idx);
                false
            }
            None => {
                next.mandatory_procedures.push(name.to_string());
                true
            }
        };
        self.commit_config(next)?;
        tracing::info!(procedure = name, mandatory = now_mandatory, "mandatory toggled");
        Ok(now_mandatory)
    }

    pub fn set_logo_paths(
        &mut self,
        logo_path: Option<String>,
        logo_pdf_path: Option<String>,
    ) -> Result<(), CatalogError> {
        let mut next = self.config.clone();
        next.logo_path = logo_path;
        next.logo_pdf_path = logo_pdf_path;
        self.commit_config(next)
    }

    /// Make sure the baseline procedures exist in the catalog and in the
    /// mandatory list. Writes only what changed; running it twice is a no-op.
    pub fn reconcile_baseline(&mut self) -> Result<(), CatalogError> {
        let mut procedures = self.procedures.clone();
        let mut config = self.config.clone();

        for name in BASELINE_MANDATORY {
            if !config.mandatory_procedures.iter().any(|m| m == name) {
                config.mandatory_procedures.push(name.to_string());
            }
            if !procedures.iter().any(|d| d.name == name) {
                procedures.push(ProcedureDefinition::new(name));
            }
        }

        if procedures != self.procedures {
            self.commit_procedures(procedures)?;
            tracing::info!("baseline procedures restored to catalog");
        }
        if config != self.config {
            self.commit_config(config)?;
            tracing::info!("baseline procedures restored to mandatory list");
        }
        Ok(())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.procedures.iter().position(|d| d.name == name)
    }

    fn commit_procedures(&mut self, next: Vec<ProcedureDefinition>) -> Result<(), CatalogError> {
        write_catalog(&self.catalog_path, &next)?;
        self.procedures = next;
        Ok(())
    }

    fn commit_config(&mut self, next: AppConfig) -> Result<(), CatalogError> {
        config::save_config(&self.config_path, &next)?;
        self.config = next;
        Ok(())
    }
}
