//! `--self-test`: exercise validation, storage, layout and rendering in a
//! throwaway data directory and report each check.

use std::io::Write;
use std::path::Path;

use eyre::ensure;

use labore_core::models::exam::ExamType;
use labore_core::models::procedure::ChecklistItem;
use labore_core::national_id;
use labore_core::procedures::{BILLING, TRIAGE, order_procedures};
use labore_core::selection::Selection;
use labore_export::layout::{BodyFrame, plan_body};
use labore_storage::catalog::ProcedureCatalog;
use labore_storage::paths::DataPaths;
use labore_storage::records::RecordStore;

use crate::commands;
use crate::state::AppState;

type Check = fn(&Path) -> eyre::Result<()>;

const CHECKS: &[(&str, Check)] = &[
    ("validação de CPF", national_id_validation),
    ("formatação de CPF", national_id_formatting),
    ("catálogo: adicionar e recarregar", catalog_round_trip),
    ("catálogo: duplicado rejeitado", catalog_duplicate),
    ("procedimentos obrigatórios", mandatory_toggle),
    ("histórico: inserir e buscar", history_search),
    ("layout: ajuste em uma página", layout_fits),
    ("ordenação de procedimentos", ordering),
    ("geração de checklist", generation),
];

/// Run every check, print one line per check plus a summary, and return
/// whether all passed.
pub fn run<W: Write>(out: &mut W) -> eyre::Result<bool> {
    let mut passed = 0;

    for (name, check) in CHECKS {
        let dir = tempfile::TempDir::new()?;
        match check(dir.path()) {
            Ok(()) => {
                passed += 1;
                writeln!(out, "[OK]     {name}")?;
            }
            Err(e) => {
                tracing::error!(check = *name, error = %e, "self-test check failed");
                writeln!(out, "[FALHOU] {name}: {e}")?;
            }
        }
    }

    let total = CHECKS.len();
    writeln!(out)?;
    if passed == total {
        writeln!(out, "Todos os {total} testes passaram.")?;
    } else {
        writeln!(out, "{} de {total} testes falharam.", total - passed)?;
    }
    Ok(passed == total)
}

fn national_id_validation(_: &Path) -> eyre::Result<()> {
    ensure!(national_id::is_valid("12345678909"), "12345678909 should pass");
    ensure!(national_id::is_valid("529.982.247-25"), "masked ID should pass");
    ensure!(!national_id::is_valid("11111111111"), "repeated digits should fail");
    ensure!(!national_id::is_valid("12345678900"), "bad check digit should fail");
    ensure!(!national_id::is_valid("123"), "short input should fail");
    Ok(())
}

fn national_id_formatting(_: &Path) -> eyre::Result<()> {
    let cases = [
        ("123", "123"),
        ("123456", "123.456"),
        ("123456789", "123.456.789"),
        ("12345678909", "123.456.789-09"),
        ("123.456.789-09", "123.456.789-09"),
    ];
    for (input, expected) in cases {
        let got = national_id::format(input);
        ensure!(got == expected, "format({input}) = {got}, expected {expected}");
    }
    Ok(())
}

fn catalog_round_trip(root: &Path) -> eyre::Result<()> {
    let paths = DataPaths::new(root);
    let mut catalog = ProcedureCatalog::load(&paths);
    catalog.add("Teste de Acuidade")?;

    let reloaded = ProcedureCatalog::load(&paths);
    ensure!(reloaded.contains("Teste de Acuidade"), "added procedure lost on reload");
    ensure!(
        !reloaded.requires_report("Teste de Acuidade"),
        "new procedure should not require a report"
    );
    Ok(())
}

fn catalog_duplicate(root: &Path) -> eyre::Result<()> {
    let paths = DataPaths::new(root);
    let mut catalog = ProcedureCatalog::load(&paths);
    let before = catalog.names();
    ensure!(catalog.add(TRIAGE).is_err(), "duplicate add should fail");
    ensure!(catalog.names() == before, "catalog changed after failed add");
    Ok(())
}

fn mandatory_toggle(root: &Path) -> eyre::Result<()> {
    let paths = DataPaths::new(root);
    let mut catalog = ProcedureCatalog::load(&paths);
    ensure!(catalog.toggle_mandatory("Audiometria")?, "toggle should make it mandatory");
    ensure!(catalog.is_mandatory("Audiometria"), "not listed as mandatory");
    ensure!(!catalog.toggle_mandatory("Audiometria")?, "second toggle should remove it");
    ensure!(
        catalog.toggle_mandatory("Fora do Catálogo")?,
        "names outside the catalog can be mandatory"
    );
    Ok(())
}

fn history_search(root: &Path) -> eyre::Result<()> {
    let mut store = RecordStore::load(DataPaths::new(root).history());
    let procedures = vec![TRIAGE.to_string(), BILLING.to_string()];
    let people = [
        ("Ana Souza", "529.982.247-25"),
        ("Bruno Lima", "123.456.789-09"),
        ("Carla Dias", "111.444.777-35"),
    ];
    let mut ids = Vec::new();
    for (name, id) in people {
        ids.push(store.append(name, id, ExamType::Admission, &procedures, "doc.pdf")?);
    }
    ensure!(ids == [1, 2, 3], "ids should be 1, 2, 3, got {ids:?}");

    let by_name = store.find_by_name("bruno");
    ensure!(
        by_name.len() == 1 && by_name[0].id == 2,
        "name search should find only the second record"
    );
    let by_id = store.find_by_national_id("12345678909");
    ensure!(
        by_id.len() == 1 && by_id[0].id == 2,
        "ID search should ignore punctuation"
    );
    Ok(())
}

fn layout_fits(_: &Path) -> eyre::Result<()> {
    let items: Vec<ChecklistItem> = (0..14)
        .map(|i| ChecklistItem {
            name: format!("Procedimento {i}"),
            requires_report: i % 4 == 0,
        })
        .collect();
    let layout = plan_body(&items, &BodyFrame::default());
    ensure!(layout.scale < 1.0, "long list should shrink");
    ensure!(layout.metrics.respects_floor(), "metrics below floor");
    ensure!(
        layout.height <= layout.available,
        "height {} exceeds available {}",
        layout.height,
        layout.available
    );
    Ok(())
}

fn ordering(_: &Path) -> eyre::Result<()> {
    let ordered = order_procedures(vec![
        BILLING.to_string(),
        "Audiometria".to_string(),
        TRIAGE.to_string(),
        "Glicemia".to_string(),
    ]);
    ensure!(
        ordered == [TRIAGE, "Audiometria", "Glicemia", BILLING],
        "unexpected order: {ordered:?}"
    );
    Ok(())
}

fn generation(root: &Path) -> eyre::Result<()> {
    let mut state = AppState::load(DataPaths::new(root));
    let selection = Selection::reset(state.catalog.mandatory())
        .with_person_name("Maria da Silva")
        .with_national_id("52998224725")
        .add_procedure("Audiometria");

    let generated =
        commands::generate_checklist(&mut state, &selection).map_err(|e| eyre::eyre!(e))?;
    ensure!(generated.path.is_file(), "PDF not written");
    ensure!(state.store.len() == 1, "history not updated");

    let bytes = std::fs::read(&generated.path)?;
    ensure!(bytes.starts_with(b"%PDF"), "output is not a PDF");
    Ok(())
}
