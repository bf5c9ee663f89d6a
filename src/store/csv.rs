//! CSV source parsing.

use std::path::Path;

use crate::error::InventoryResult;
use crate::types::Record;

/// Read a CSV file into records.
///
/// Rules:
///
/// - The first line is the header and names the columns.
/// - Every later line becomes one [`Record`] keyed by those names.
/// - Fields are taken verbatim; values never contain quoted commas.
pub fn read_csv_from_path(path: impl AsRef<Path>) -> InventoryResult<Vec<Record>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    read_csv_from_reader(&mut rdr)
}

/// Read records from an existing CSV reader.
pub fn read_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
) -> InventoryResult<Vec<Record>> {
    let headers = rdr.headers()?.clone();

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let mut record = Record::new();
        for (idx, column) in headers.iter().enumerate() {
            record.insert(column, row.get(idx).unwrap_or(""));
        }
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::read_csv_from_reader;

    fn reader(input: &str) -> csv::Reader<&[u8]> {
        csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(input.as_bytes())
    }

    #[test]
    fn reads_header_keyed_records() {
        let mut rdr = reader("name,age,score\nAlice,25,85.5\nBob,30,92.3");
        let records = read_csv_from_reader(&mut rdr).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("name"), Some("Alice"));
        assert_eq!(records[0].get("age"), Some("25"));
        assert_eq!(records[1].get("score"), Some("92.3"));
        assert_eq!(
            records[0].columns().collect::<Vec<_>>(),
            vec!["name", "age", "score"]
        );
    }

    #[test]
    fn ragged_row_is_a_csv_error() {
        let mut rdr = reader("name,age\nAlice,25,extra\n");
        let err = read_csv_from_reader(&mut rdr).unwrap_err();
        assert!(err.to_string().starts_with("csv error"));
    }

    #[test]
    fn header_only_source_has_no_records() {
        let mut rdr = reader("Product ID,Company,Origin,Category,Stock,Unit Price");
        assert!(read_csv_from_reader(&mut rdr).unwrap().is_empty());
    }
}
