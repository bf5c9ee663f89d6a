use t201_script::store::csv::{read_csv_from_path, read_csv_from_reader};
use t201_script::store::{DirectoryStore, RecordStore};
use t201_script::types::COLUMN_NAMES;

#[test]
fn read_csv_from_path_happy_path() {
    let records = read_csv_from_path("tests/fixtures/inventory/Kingston.csv").unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].columns().collect::<Vec<_>>(), COLUMN_NAMES.to_vec());
    assert_eq!(records[0].get("Product ID"), Some("KIN-001"));
    assert_eq!(records[2].get("Unit Price"), Some("0.0"));
}

#[test]
fn directory_store_lists_csv_sources_only() {
    let store = DirectoryStore::new("tests/fixtures/inventory");
    assert_eq!(store.list_sources().unwrap(), vec!["Kingston.csv", "Salem.csv"]);
}

#[test]
fn read_keeps_values_as_raw_strings() {
    let input = "name,age,score\nAlice,25,85.5\nBob,030,92.30\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let records = read_csv_from_reader(&mut rdr).unwrap();
    assert_eq!(records[1].get("age"), Some("030"));
    assert_eq!(records[1].get("score"), Some("92.30"));
}

#[test]
fn read_source_wraps_failures_with_source_id() {
    let store = DirectoryStore::new("tests/fixtures/inventory");
    let err = store.read_source("does_not_exist.csv").unwrap_err();

    assert_eq!(err.source_id(), Some("does_not_exist.csv"));
    assert!(err.to_string().starts_with("csv error"));
}
