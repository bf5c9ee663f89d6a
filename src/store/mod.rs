//! Record store: enumerates sources in a data directory and reads them as records.
//!
//! [`RecordStore`] is the seam the query pipeline reads through. [`DirectoryStore`] is the
//! CSV-on-disk implementation; the directory is listed fresh on every call.
//!
//! Per-source outcomes are reported through a [`SourceObserver`].

pub mod csv;
pub mod observability;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::InventoryResult;
use crate::types::Record;

pub use observability::{
    failure_message, CompositeObserver, LogObserver, SourceContext, SourceObserver, SourceStats,
    StdErrObserver,
};

/// A collection of named sources of records.
pub trait RecordStore {
    /// Identifiers of the available sources, in the order they should be read.
    fn list_sources(&self) -> InventoryResult<Vec<String>>;

    /// Read every record of one source.
    ///
    /// Failures are returned as [`crate::InventoryError::SourceRead`] naming `source_id`.
    fn read_source(&self, source_id: &str) -> InventoryResult<Vec<Record>>;

    /// Path or location of a source, used for reporting.
    fn locate(&self, source_id: &str) -> PathBuf {
        PathBuf::from(source_id)
    }
}

/// CSV files in a single directory, one file per department.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    dir: PathBuf,
}

impl DirectoryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl RecordStore for DirectoryStore {
    /// Every entry with a `.csv` extension (case-insensitive), sorted by name.
    ///
    /// Other files such as the JSON export are skipped. Entries are not checked for being
    /// regular files; an unreadable entry fails later, in [`RecordStore::read_source`].
    fn list_sources(&self) -> InventoryResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_csv_name(&name) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    fn read_source(&self, source_id: &str) -> InventoryResult<Vec<Record>> {
        csv::read_csv_from_path(self.locate(source_id)).map_err(|e| e.in_source(source_id))
    }

    fn locate(&self, source_id: &str) -> PathBuf {
        self.dir.join(source_id)
    }
}

fn is_csv_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::error::InventoryError;

    #[test]
    fn lists_only_csv_sources_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.csv"), "a\n1\n").unwrap();
        fs::write(dir.path().join("A.CSV"), "a\n1\n").unwrap();
        fs::write(dir.path().join("output.json"), "[]\n").unwrap();
        fs::write(dir.path().join("notes"), "x").unwrap();

        let store = DirectoryStore::new(dir.path());
        assert_eq!(store.list_sources().unwrap(), vec!["A.CSV", "b.csv"]);
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryStore::new(dir.path().join("nope"));
        assert!(matches!(store.list_sources(), Err(InventoryError::Io(_))));
    }

    #[test]
    fn read_failure_names_the_source() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryStore::new(dir.path());
        let err = store.read_source("gone.csv").unwrap_err();
        assert_eq!(err.source_id(), Some("gone.csv"));
    }
}
