//! JSON export of a query result.
//!
//! The export is a JSON array: element 0 is the records, element 1 (only when analytics were
//! requested) is the `[numeric, categorical]` pair of a [`Summary`].

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::analytics::Summary;
use crate::error::{InventoryError, InventoryResult};
use crate::types::Record;

/// File name of the export inside the data directory.
pub const EXPORT_FILE_NAME: &str = "output.json";

/// What gets written to the export file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportDocument {
    pub records: Vec<Record>,
    pub analytics: Option<Summary>,
}

impl ExportDocument {
    pub fn new(records: Vec<Record>, analytics: Option<Summary>) -> Self {
        Self { records, analytics }
    }
}

impl Serialize for ExportDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 1 + usize::from(self.analytics.is_some());
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.records)?;
        if let Some(analytics) = &self.analytics {
            seq.serialize_element(analytics)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for ExportDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DocVisitor;

        impl<'de> Visitor<'de> for DocVisitor {
            type Value = ExportDocument;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an array of [records] or [records, [numeric, categorical]]")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ExportDocument, A::Error> {
                let records: Vec<Record> = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let analytics: Option<Summary> = seq.next_element()?;
                if seq.next_element::<de::IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_length(3, &self));
                }
                Ok(ExportDocument { records, analytics })
            }
        }

        deserializer.deserialize_seq(DocVisitor)
    }
}

/// Write `doc` to `path`, replacing any previous content. The file ends with a newline.
pub fn write_export(path: impl AsRef<Path>, doc: &ExportDocument) -> InventoryResult<()> {
    let path = path.as_ref();
    let write = || -> InventoryResult<()> {
        let mut text = serde_json::to_string(doc)?;
        text.push('\n');
        fs::write(path, text)?;
        Ok(())
    };
    write().map_err(|e| InventoryError::ExportWrite {
        path: path.to_path_buf(),
        source: Box::new(e),
    })
}

/// Write `doc` to [`EXPORT_FILE_NAME`] inside `dir` and return the path written.
pub fn export_to_dir(dir: impl AsRef<Path>, doc: &ExportDocument) -> InventoryResult<PathBuf> {
    let path = dir.as_ref().join(EXPORT_FILE_NAME);
    write_export(&path, doc)?;
    log::info!("exported {} records to {}", doc.records.len(), path.display());
    Ok(path)
}

/// Read an export file back.
pub fn read_export(path: impl AsRef<Path>) -> InventoryResult<ExportDocument> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
