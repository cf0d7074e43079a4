use std::path::{Path, PathBuf};

use labore_storage::paths::DataPaths;

/// Directory name under the platform data dir.
const APP_DIR: &str = "com.laboreplus.checklist";

/// Environment override for the data directory.
pub const DATA_DIR_ENV: &str = "LABORE_DATA_DIR";

fn default_data_dir() -> eyre::Result<PathBuf> {
    let base = dirs::data_dir().ok_or_else(|| eyre::eyre!("no data directory found"))?;
    Ok(base.join(APP_DIR))
}

/// Pick the data directory: the explicit override if given (the CLI flag,
/// which clap also fills from [`DATA_DIR_ENV`]), otherwise the platform
/// default.
pub fn resolve_data_dir(override_dir: Option<&Path>) -> eyre::Result<PathBuf> {
    match override_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => default_data_dir(),
    }
}

/// Create the data directory and its `documents/` folder if needed.
pub fn prepare_data_dir(root: &Path) -> eyre::Result<DataPaths> {
    let paths = DataPaths::new(root);
    std::fs::create_dir_all(paths.documents()).map_err(|e| {
        eyre::eyre!(
            "failed to create data directory at {}: {e}",
            paths.root().display()
        )
    })?;
    tracing::info!(path = %paths.root().display(), "data directory ready");
    Ok(paths)
}
