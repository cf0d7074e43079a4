use std::path::PathBuf;

use labore_storage::catalog::ProcedureCatalog;
use labore_storage::paths::DataPaths;
use labore_storage::records::RecordStore;

/// Everything the commands work on. Built once at startup and handed to
/// each command by reference.
pub struct AppState {
    pub paths: DataPaths,
    pub catalog: ProcedureCatalog,
    pub store: RecordStore,
}

impl AppState {
    /// Load catalog, config and history from `paths`, then make sure the
    /// baseline procedures are present. A failed baseline write is logged and
    /// the app keeps running on the in-memory state.
    pub fn load(paths: DataPaths) -> Self {
        let mut catalog = ProcedureCatalog::load(&paths);
        if let Err(e) = catalog.reconcile_baseline() {
            tracing::warn!(error = %e, "could not persist baseline procedures");
        }
        let store = RecordStore::load(paths.history());

        tracing::info!(
            procedures = catalog.definitions().len(),
            mandatory = catalog.mandatory().len(),
            history = store.len(),
            "state loaded"
        );
        Self {
            paths,
            catalog,
            store,
        }
    }

    /// The logo configured for the PDF header, if any.
    pub fn pdf_logo(&self) -> Option<PathBuf> {
        self.catalog
            .config()
            .logo_pdf_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
    }
}
