use labore_core::models::exam::ExamType;
use labore_storage::records::RecordStore;
use tempfile::TempDir;

fn at(day: i8, hour: i8, minute: i8) -> jiff::Zoned {
    jiff::civil::date(2025, 3, day)
        .at(hour, minute, 0, 0)
        .to_zoned(jiff::tz::TimeZone::fixed(jiff::tz::offset(-3)))
        .unwrap()
}

fn procs(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn seeded(dir: &TempDir) -> RecordStore {
    let mut store = RecordStore::load(dir.path().join("history.json"));
    store
        .append_at(
            &at(1, 9, 0),
            "Ana Souza",
            "123.456.789-09",
            ExamType::Admission,
            &procs(&["Triagem", "Exame Clínico", "Faturamento"]),
            "checklist_Ana_Souza_20250301_090000.pdf",
        )
        .unwrap();
    store
        .append_at(
            &at(2, 10, 30),
            "Bruno Lima",
            "987.654.321-00",
            ExamType::Periodic,
            &procs(&["Exame Clínico", "Faturamento"]),
            "checklist_Bruno_Lima_20250302_103000.pdf",
        )
        .unwrap();
    store
        .append_at(
            &at(3, 8, 15),
            "Ana Souza",
            "12345678909",
            ExamType::Termination,
            &procs(&["Exame Clínico", "Faturamento"]),
            "checklist_Ana_Souza_20250303_081500.pdf",
        )
        .unwrap();
    store
}

#[test]
fn ids_are_sequential() {
    let dir = TempDir::new().unwrap();
    let store = seeded(&dir);
    let ids: Vec<u64> = store.records().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn append_stamps_display_date_and_reserved_fields() {
    let dir = TempDir::new().unwrap();
    let store = seeded(&dir);
    let first = store.get(1).unwrap();
    assert_eq!(first.display_date, "01/03/2025 09:00");
    assert!(!first.edited);
    assert!(first.edit_history.is_empty());
}

#[test]
fn history_survives_reload() {
    let dir = TempDir::new().unwrap();
    let store = seeded(&dir);
    let reloaded = RecordStore::load(store.path());
    assert_eq!(reloaded.records(), store.records());
}

#[test]
fn name_search_is_case_insensitive_substring() {
    let dir = TempDir::new().unwrap();
    let store = seeded(&dir);

    let found = store.find_by_name("bruno");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, 2);

    let ids: Vec<u64> = store.find_by_name("  SOUZA ").iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![3, 1]);
}

#[test]
fn national_id_search_ignores_punctuation() {
    let dir = TempDir::new().unwrap();
    let store = seeded(&dir);

    let with_mask: Vec<u64> = store
        .find_by_national_id("123.456.789-09")
        .iter()
        .map(|r| r.id)
        .collect();
    let bare: Vec<u64> = store
        .find_by_national_id("12345678909")
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(with_mask, vec![3, 1]);
    assert_eq!(bare, with_mask);
    assert!(store.find_by_national_id("123456789").is_empty());
    assert_eq!(store.latest_for_national_id("123.456.789-09").unwrap().id, 3);
}

#[test]
fn distinct_people_keep_latest_exam_and_count() {
    let dir = TempDir::new().unwrap();
    let store = seeded(&dir);
    let people = store.distinct_people();

    assert_eq!(people.len(), 2);
    assert_eq!(people[0].person_name, "Ana Souza");
    assert_eq!(people[0].total_checklists, 2);
    assert_eq!(people[0].last_exam_type, ExamType::Termination);
    assert_eq!(people[0].last_display_date, "03/03/2025 08:15");
    assert_eq!(people[1].person_name, "Bruno Lima");
    assert_eq!(people[1].total_checklists, 1);
}

#[test]
fn missing_or_malformed_file_is_empty_store() {
    let dir = TempDir::new().unwrap();
    assert!(RecordStore::load(dir.path().join("absent.json")).is_empty());

    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(RecordStore::load(&path).is_empty());
}

#[test]
fn malformed_history_survives_the_next_append() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("checklist_history.json");
    std::fs::write(&path, "[{ truncated").unwrap();

    let mut store = RecordStore::load(&path);
    assert!(store.is_empty());
    store
        .append(
            "Ana Souza",
            "12345678909",
            ExamType::Admission,
            &procs(&["Exame Clínico"]),
            "x.pdf",
        )
        .unwrap();

    let backup = dir.path().join("checklist_history.json.bak");
    assert_eq!(std::fs::read_to_string(backup).unwrap(), "[{ truncated");
    assert_eq!(RecordStore::load(&path).len(), 1);
}

#[test]
fn failed_write_rolls_back() {
    let dir = TempDir::new().unwrap();
    // A directory where the file should be makes the rename fail.
    let path = dir.path().join("history.json");
    std::fs::create_dir(&path).unwrap();

    let mut store = RecordStore::load(&path);
    let result = store.append(
        "Ana Souza",
        "12345678909",
        ExamType::Admission,
        &procs(&["Exame Clínico"]),
        "x.pdf",
    );
    assert!(result.is_err());
    assert!(store.is_empty());
}
