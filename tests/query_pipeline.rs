use std::collections::BTreeMap;

use t201_script::error::{InventoryError, InventoryResult};
use t201_script::query::{execute, Query, QueryOptions, SortSpec};
use t201_script::store::{DirectoryStore, RecordStore};
use t201_script::types::{Predicate, Record};

/// In-memory store, one source per entry, read in insertion order.
struct MemoryStore {
    sources: Vec<(String, String)>,
}

impl MemoryStore {
    fn new(sources: &[(&str, &str)]) -> Self {
        Self {
            sources: sources
                .iter()
                .map(|(id, text)| (id.to_string(), text.to_string()))
                .collect(),
        }
    }
}

impl RecordStore for MemoryStore {
    fn list_sources(&self) -> InventoryResult<Vec<String>> {
        Ok(self.sources.iter().map(|(id, _)| id.clone()).collect())
    }

    fn read_source(&self, source_id: &str) -> InventoryResult<Vec<Record>> {
        let (_, text) = self
            .sources
            .iter()
            .find(|(id, _)| id == source_id)
            .expect("listed source");
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(text.as_bytes());
        t201_script::store::csv::read_csv_from_reader(&mut rdr)
            .map_err(|e| e.in_source(source_id))
    }
}

const PEOPLE: &str = "name,age,score\nAlice,25,85.5\nBob,30,92.3\nCharlie,22,78.1";

fn names(data: &[Record]) -> Vec<&str> {
    data.iter().filter_map(|r| r.get("name")).collect()
}

#[test]
fn no_filters_returns_every_record() {
    let store = MemoryStore::new(&[("test1.csv", "name,age,score\nAlice,25,85.5\nBob,30,92.3")]);
    let data = execute(&store, &Query::new(), &QueryOptions::default()).unwrap();

    assert_eq!(data.len(), 2);
    assert_eq!(data[0].get("name"), Some("Alice"));
    assert_eq!(data[0].get("age"), Some("25"));
}

#[test]
fn filter_keeps_only_matching_records() {
    let store = MemoryStore::new(&[("test1.csv", "name,age\nAlice,25\nBob,30")]);
    let query = Query::new().filter(Predicate::new("age", ">", "25"));
    let data = execute(&store, &query, &QueryOptions::default()).unwrap();

    assert_eq!(data, vec![Record::from_pairs([("name", "Bob"), ("age", "30")])]);
}

#[test]
fn sort_ascending_and_descending() {
    let store = MemoryStore::new(&[("test1.csv", PEOPLE)]);

    let asc = execute(
        &store,
        &Query::new().sort_by(SortSpec::ascending("age")),
        &QueryOptions::default(),
    )
    .unwrap();
    assert_eq!(names(&asc), vec!["Charlie", "Alice", "Bob"]);

    let desc = execute(
        &store,
        &Query::new().sort_by(SortSpec::descending("age")),
        &QueryOptions::default(),
    )
    .unwrap();
    assert_eq!(names(&desc), vec!["Bob", "Alice", "Charlie"]);
}

#[test]
fn sources_concatenate_in_listing_order() {
    let store = MemoryStore::new(&[
        ("z.csv", "name,age\nZed,1"),
        ("a.csv", "name,age\nAnn,2\nAbe,3"),
    ]);
    let data = execute(&store, &Query::new(), &QueryOptions::default()).unwrap();
    assert_eq!(names(&data), vec!["Zed", "Ann", "Abe"]);
}

#[test]
fn projection_selects_columns_in_requested_order() {
    let store = MemoryStore::new(&[("test1.csv", PEOPLE)]);
    let query = Query::new()
        .filter(Predicate::new("score", ">=", "85.5"))
        .select(["score", "name"]);
    let data = execute(&store, &query, &QueryOptions::default()).unwrap();

    assert_eq!(
        data.iter()
            .map(|r| r.iter().collect::<Vec<_>>())
            .collect::<Vec<_>>(),
        vec![
            vec![("score", "85.5"), ("name", "Alice")],
            vec![("score", "92.3"), ("name", "Bob")],
        ]
    );
}

#[test]
fn filter_on_column_outside_projection_still_applies() {
    let store = MemoryStore::new(&[("test1.csv", PEOPLE)]);
    let query = Query::new()
        .filter(Predicate::new("age", "<", "25"))
        .select(["name"]);
    let data = execute(&store, &query, &QueryOptions::default()).unwrap();

    assert_eq!(data, vec![Record::from_pairs([("name", "Charlie")])]);
}

#[test]
fn invalid_operator_aborts_the_query() {
    let store = MemoryStore::new(&[("test1.csv", PEOPLE)]);
    let query = Query::new()
        .filter(Predicate::new("age", ">", "100"))
        .filter(Predicate::new("age", "===", "25"));
    let err = execute(&store, &query, &QueryOptions::default()).unwrap_err();
    assert_eq!(err.to_string(), "Invalid operator: ===");
}

#[test]
fn invalid_operator_aborts_even_without_records() {
    let store = MemoryStore::new(&[]);
    let query = Query::new().filter(Predicate::new("age", "=", "25"));
    assert!(matches!(
        execute(&store, &query, &QueryOptions::default()),
        Err(InventoryError::InvalidOperator { .. })
    ));
}

#[test]
fn fixture_directory_query() {
    let store = DirectoryStore::new("tests/fixtures/inventory");
    let query = Query::new()
        .filter(Predicate::new("Origin", "==", "Peru"))
        .filter(Predicate::new("Stock", ">", "100"))
        .sort_by(SortSpec::descending("Unit Price"))
        .select(["Product ID", "Unit Price"]);
    let data = execute(&store, &query, &QueryOptions::default()).unwrap();

    let ids: Vec<_> = data.iter().filter_map(|r| r.get("Product ID")).collect();
    assert_eq!(ids, vec!["SAL-002", "KIN-001", "KIN-003"]);
}

#[test]
fn unknown_projected_column_skips_the_source() {
    let store = MemoryStore::new(&[
        ("people.csv", PEOPLE),
        ("other.csv", "name,city\nDora,Lima"),
    ]);
    let query = Query::new().select(["name", "age"]);
    let data = execute(&store, &query, &QueryOptions::default()).unwrap();

    let mut seen = BTreeMap::new();
    for record in &data {
        *seen.entry(record.get("name").unwrap_or("?")).or_insert(0) += 1;
    }
    assert_eq!(seen.len(), 3);
    assert!(!seen.contains_key("Dora"));
}
