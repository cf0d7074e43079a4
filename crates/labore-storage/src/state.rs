use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};

use crate::error::StorageError;

/// Read and deserialize a JSON file.
pub fn load_state<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let body = match std::fs::read(path) {
        Ok(body) => body,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(StorageError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_slice(&body)?)
}

/// Pretty-print `value` to `path`, creating parent directories.
///
/// Written to a sibling `.tmp` file first and renamed over the target, so a
/// crash mid-write never leaves a truncated file behind.
pub fn save_state<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_vec_pretty(value)?;
    let write_err = |source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, &json).map_err(write_err)?;
    std::fs::rename(&tmp_path, path).map_err(write_err)?;

    tracing::debug!(path = %path.display(), bytes = json.len(), "state saved");
    Ok(())
}

/// Move a file that could not be parsed to `<name>.bak`, so the next save
/// does not destroy it. Returns the new path, or `None` if the rename failed.
pub fn set_aside(path: &Path) -> Option<PathBuf> {
    let mut name = path.file_name()?.to_os_string();
    name.push(".bak");
    let backup = path.with_file_name(name);

    match std::fs::rename(path, &backup) {
        Ok(()) => {
            tracing::warn!(
                path = %path.display(),
                backup = %backup.display(),
                "unparseable file moved aside"
            );
            Some(backup)
        }
        Err(e) => {
            tracing::error!(
                path = %path.display(),
                error = %e,
                "could not move unparseable file aside"
            );
            None
        }
    }
}
