use labore_core::procedures::{BASELINE_MANDATORY, DEFAULT_CATALOG};
use labore_storage::catalog::ProcedureCatalog;
use labore_storage::error::CatalogError;
use labore_storage::paths::DataPaths;
use tempfile::TempDir;

fn fresh() -> (TempDir, DataPaths) {
    let dir = TempDir::new().unwrap();
    let paths = DataPaths::new(dir.path());
    (dir, paths)
}

#[test]
fn missing_catalog_is_seeded_and_written() {
    let (_dir, paths) = fresh();
    let catalog = ProcedureCatalog::load(&paths);
    assert_eq!(catalog.names(), DEFAULT_CATALOG.to_vec());
    assert!(paths.catalog().exists());
    assert_eq!(catalog.mandatory(), BASELINE_MANDATORY.to_vec());
}

#[test]
fn added_procedure_round_trips_without_report() {
    let (_dir, paths) = fresh();
    let mut catalog = ProcedureCatalog::load(&paths);
    catalog.add("Teste Ergométrico").unwrap();

    let reloaded = ProcedureCatalog::load(&paths);
    assert!(reloaded.contains("Teste Ergométrico"));
    assert!(!reloaded.requires_report("Teste Ergométrico"));
    assert_eq!(reloaded.names().last().unwrap(), "Teste Ergométrico");
}

#[test]
fn duplicate_add_fails_and_changes_nothing() {
    let (_dir, paths) = fresh();
    let mut catalog = ProcedureCatalog::load(&paths);
    let before = catalog.names();

    assert!(matches!(catalog.add("Glicemia"), Err(CatalogError::Duplicate(_))));
    assert!(matches!(catalog.add("   "), Err(CatalogError::EmptyName)));
    assert_eq!(catalog.names(), before);
    assert_eq!(ProcedureCatalog::load(&paths).names(), before);
}

#[test]
fn legacy_list_is_imported_without_reports() {
    let (_dir, paths) = fresh();
    std::fs::write(paths.catalog(), r#"["Audiometria", "Glicemia", "Audiometria"]"#).unwrap();

    let catalog = ProcedureCatalog::load(&paths);
    assert_eq!(catalog.names(), vec!["Audiometria", "Glicemia"]);
    assert!(catalog.definitions().iter().all(|d| !d.requires_report));
}

#[test]
fn legacy_attribute_key_is_read() {
    let (_dir, paths) = fresh();
    std::fs::write(
        paths.catalog(),
        r#"{"Audiometria": {"requer_laudo": true}, "Glicemia": {"requires_report": false}}"#,
    )
    .unwrap();
    std::fs::write(
        paths.config(),
        r#"{"logo_path": null, "logo_pdf_path": "logo.png", "procedimentos_obrigatorios": ["Audiometria"]}"#,
    )
    .unwrap();

    let catalog = ProcedureCatalog::load(&paths);
    assert!(catalog.requires_report("Audiometria"));
    assert!(!catalog.requires_report("Glicemia"));
    assert_eq!(catalog.mandatory(), ["Audiometria".to_string()]);
    assert_eq!(catalog.config().logo_pdf_path.as_deref(), Some("logo.png"));
}

#[test]
fn report_flag_persists() {
    let (_dir, paths) = fresh();
    let mut catalog = ProcedureCatalog::load(&paths);
    catalog.set_requires_report("Audiometria", true).unwrap();
    assert!(matches!(
        catalog.set_requires_report("Nope", true),
        Err(CatalogError::NotFound(_))
    ));

    let reloaded = ProcedureCatalog::load(&paths);
    assert!(reloaded.requires_report("Audiometria"));
}

#[test]
fn toggle_mandatory_adds_then_removes() {
    let (_dir, paths) = fresh();
    let mut catalog = ProcedureCatalog::load(&paths);

    assert!(catalog.toggle_mandatory("Audiometria").unwrap());
    assert!(catalog.is_mandatory("Audiometria"));
    assert!(!catalog.toggle_mandatory("Audiometria").unwrap());
    assert!(!catalog.is_mandatory("Audiometria"));

    // Not in the catalog: still toggles the mandatory list.
    assert!(!catalog.contains("Inexistente"));
    assert!(catalog.toggle_mandatory("Inexistente").unwrap());
    assert!(ProcedureCatalog::load(&paths).is_mandatory("Inexistente"));
}

#[test]
fn malformed_catalog_is_kept_as_backup() {
    let (_dir, paths) = fresh();
    std::fs::write(paths.catalog(), "{ \"Audiometria\": ").unwrap();

    let mut catalog = ProcedureCatalog::load(&paths);
    assert_eq!(catalog.names(), DEFAULT_CATALOG.to_vec());
    catalog.add("Teste Ergométrico").unwrap();

    let backup = paths.root().join("procedures.json.bak");
    assert_eq!(std::fs::read_to_string(backup).unwrap(), "{ \"Audiometria\": ");
}

#[test]
fn blank_names_cannot_become_mandatory() {
    let (_dir, paths) = fresh();
    let mut catalog = ProcedureCatalog::load(&paths);
    let before = catalog.mandatory().to_vec();

    assert!(matches!(catalog.toggle_mandatory(""), Err(CatalogError::EmptyName)));
    assert!(matches!(catalog.toggle_mandatory("   "), Err(CatalogError::EmptyName)));
    assert_eq!(catalog.mandatory(), before.as_slice());
    assert_eq!(ProcedureCatalog::load(&paths).mandatory(), before.as_slice());
}

#[test]
fn toggle_mandatory_trims_the_name() {
    let (_dir, paths) = fresh();
    let mut catalog = ProcedureCatalog::load(&paths);

    assert!(catalog.toggle_mandatory("  Audiometria ").unwrap());
    assert!(catalog.is_mandatory("Audiometria"));
    assert!(!catalog.toggle_mandatory("Audiometria").unwrap());
}

#[test]
fn rename_moves_payload_and_mandatory_slot() {
    let (_dir, paths) = fresh();
    let mut catalog = ProcedureCatalog::load(&paths);
    catalog.set_requires_report("Exame Clínico", true).unwrap();
    let position = catalog.names().iter().position(|n| n == "Exame Clínico");

    catalog.rename("Exame Clínico", "Exame Clínico Ocupacional").unwrap();

    let reloaded = ProcedureCatalog::load(&paths);
    assert!(!reloaded.contains("Exame Clínico"));
    assert!(reloaded.requires_report("Exame Clínico Ocupacional"));
    assert_eq!(
        reloaded.names().iter().position(|n| n == "Exame Clínico Ocupacional"),
        position
    );
    assert_eq!(reloaded.mandatory()[0], "Exame Clínico Ocupacional");
}

#[test]
fn rename_rejects_bad_targets() {
    let (_dir, paths) = fresh();
    let mut catalog = ProcedureCatalog::load(&paths);
    assert!(matches!(catalog.rename("Nope", "X"), Err(CatalogError::NotFound(_))));
    assert!(matches!(catalog.rename("Glicemia", ""), Err(CatalogError::EmptyName)));
    assert!(matches!(
        catalog.rename("Glicemia", "Audiometria"),
        Err(CatalogError::Duplicate(_))
    ));
    assert!(catalog.contains("Glicemia"));
}

#[test]
fn baseline_is_restored_idempotently() {
    let (_dir, paths) = fresh();
    let mut catalog = ProcedureCatalog::load(&paths);
    catalog.remove("Triagem").unwrap();
    catalog.toggle_mandatory("Faturamento").unwrap();
    assert!(!catalog.contains("Triagem"));
    assert!(!catalog.is_mandatory("Faturamento"));

    catalog.reconcile_baseline().unwrap();
    let once_names = catalog.names();
    let once_mandatory = catalog.mandatory().to_vec();
    catalog.reconcile_baseline().unwrap();

    assert_eq!(catalog.names(), once_names);
    assert_eq!(catalog.mandatory(), once_mandatory);
    for name in BASELINE_MANDATORY {
        assert!(catalog.contains(name));
        assert!(catalog.is_mandatory(name));
    }
    let reloaded = ProcedureCatalog::load(&paths);
    assert!(reloaded.contains("Triagem"));
    assert!(reloaded.is_mandatory("Faturamento"));
}

#[test]
fn search_filters_case_insensitively() {
    let (_dir, paths) = fresh();
    let catalog = ProcedureCatalog::load(&paths);
    let hits: Vec<&str> = catalog.search("EXAME").iter().map(|d| d.name.as_str()).collect();
    assert_eq!(hits, vec!["Exame Clínico", "Exame de Urina", "Exame Dermatológico"]);
    assert_eq!(catalog.search("").len(), DEFAULT_CATALOG.len());
}

#[test]
fn items_resolve_report_flags() {
    let (_dir, paths) = fresh();
    let mut catalog = ProcedureCatalog::load(&paths);
    catalog.set_requires_report("Audiometria", true).unwrap();
    let items = catalog.items_for(&["Audiometria".to_string(), "Desconhecido".to_string()]);
    assert!(items[0].requires_report);
    assert!(!items[1].requires_report);
}
