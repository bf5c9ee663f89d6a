//! Store → filter → project → sort.
//!
//! Most callers should use [`execute`] with a [`DirectoryStore`](crate::store::DirectoryStore).
//!
//! - Sources are read in the order the store lists them and concatenated.
//! - A source that fails to read, or lacks a selected column, is reported to
//!   [`QueryOptions::observer`] and skipped.
//! - An invalid filter operator aborts the whole query.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::error::{InventoryError, InventoryResult};
use crate::store::{RecordStore, SourceContext, SourceObserver, SourceStats};
use crate::types::{parse_number, Predicate, Record};

use super::filter;

/// Sort order of a query result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub descending: bool,
}

impl SortSpec {
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: false,
        }
    }

    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: true,
        }
    }
}

/// What to fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// ANDed filter conditions. Empty keeps every record.
    pub predicates: Vec<Predicate>,
    /// Optional sort applied to the concatenated result.
    pub sort: Option<SortSpec>,
    /// Columns to keep, in output order. `None` keeps every column.
    pub columns: Option<Vec<String>>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn sort_by(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Human readable summary, e.g.
    /// `all columns with filters (Stock > 10) sorted by 'Company' in ascending order`.
    pub fn describe(&self) -> String {
        let mut out = match &self.columns {
            Some(cols) if !cols.is_empty() => format!("columns {}", cols.join(", ")),
            _ => "all columns".to_string(),
        };
        if !self.predicates.is_empty() {
            let preds: Vec<String> = self.predicates.iter().map(|p| p.to_string()).collect();
            out.push_str(&format!(" with filters ({})", preds.join(", ")));
        }
        if let Some(sort) = &self.sort {
            out.push_str(&format!(
                " sorted by '{}' in {} order",
                sort.column,
                if sort.descending { "descending" } else { "ascending" }
            ));
        }
        out
    }
}

/// Options controlling query execution.
///
/// Use [`Default`] for common cases.
#[derive(Clone, Default)]
pub struct QueryOptions {
    /// Optional observer for per-source outcomes.
    pub observer: Option<Arc<dyn SourceObserver>>,
}

impl fmt::Debug for QueryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryOptions")
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

/// Run `query` over every source of `store`.
///
/// Records are filtered first and projected after, so predicates may use columns that are
/// not selected. A source that fails to read, or lacks a selected column, is passed to
/// `options.observer` and skipped. Listing the store and invalid operators are hard
/// errors.
///
/// ```no_run
/// use t201_script::query::{execute, Query, QueryOptions, SortSpec};
/// use t201_script::store::DirectoryStore;
/// use t201_script::types::Predicate;
///
/// # fn main() -> Result<(), t201_script::InventoryError> {
/// let store = DirectoryStore::new("/tmp/inventory");
/// let query = Query::new()
///     .filter(Predicate::new("Stock", ">", "500"))
///     .sort_by(SortSpec::descending("Unit Price"))
///     .select(["Product ID", "Stock", "Unit Price"]);
/// for record in execute(&store, &query, &QueryOptions::default())? {
///     println!("{record}");
/// }
/// # Ok(())
/// # }
/// ```
pub fn execute(
    store: &dyn RecordStore,
    query: &Query,
    options: &QueryOptions,
) -> InventoryResult<Vec<Record>> {
    filter::validate(&query.predicates)?;

    let mut data = Vec::new();
    for source_id in store.list_sources()? {
        let ctx = SourceContext {
            path: store.locate(&source_id),
            source_id,
        };

        let records = match store.read_source(&ctx.source_id) {
            Ok(records) => records,
            Err(e) => {
                report_failure(options, &ctx, &e);
                continue;
            }
        };

        let total = records.len();
        let mut kept = Vec::new();
        for record in records {
            if filter::matches(&record, &query.predicates)? {
                kept.push(record);
            }
        }
        if let Some(columns) = &query.columns {
            kept = match project_all(&kept, columns) {
                Ok(projected) => projected,
                Err(e) => {
                    report_failure(options, &ctx, &e.in_source(ctx.source_id.as_str()));
                    continue;
                }
            };
        }

        let stats = SourceStats {
            records: total,
            matched: kept.len(),
        };
        if let Some(obs) = options.observer.as_ref() {
            obs.on_source_read(&ctx, stats);
        }
        data.extend(kept);
    }

    if let Some(sort) = &query.sort {
        sort_records(&mut data, &sort.column, sort.descending);
    }
    Ok(data)
}

fn report_failure(options: &QueryOptions, ctx: &SourceContext, error: &InventoryError) {
    if let Some(obs) = options.observer.as_ref() {
        obs.on_source_failure(ctx, error);
    }
}

// Narrow every record to `columns`; a column missing from any record fails the whole set.
fn project_all(records: &[Record], columns: &[String]) -> InventoryResult<Vec<Record>> {
    records
        .iter()
        .map(|record| {
            record.project(columns).ok_or_else(|| {
                let missing = columns
                    .iter()
                    .find(|c| record.get(c).is_none())
                    .map(String::as_str)
                    .unwrap_or_default();
                InventoryError::SchemaMismatch {
                    message: format!(
                        "missing column '{missing}'. columns={:?}",
                        record.columns().collect::<Vec<_>>()
                    ),
                }
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Numeric,
    Text,
}

#[derive(Debug, PartialEq)]
enum SortKey<'a> {
    Number(f64),
    Text(&'a str),
    /// Missing, or not a number in a numeric column.
    Unparsable,
}

impl SortKey<'_> {
    fn cmp_with(&self, other: &Self, descending: bool) -> Ordering {
        let ord = match (self, other) {
            (Self::Unparsable, Self::Unparsable) => return Ordering::Equal,
            (Self::Unparsable, _) => return Ordering::Greater,
            (_, Self::Unparsable) => return Ordering::Less,
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            // A key set is built with a single kind.
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
        };
        if descending { ord.reverse() } else { ord }
    }
}

/// Stable sort of `data` by `column`.
///
/// The column kind is taken from the first record's value: numeric if it parses as a number,
/// text otherwise. That kind is applied to every record. Values that do not fit it (and
/// missing values) go last in both directions, in their original relative order.
pub fn sort_records(data: &mut [Record], column: &str, descending: bool) {
    let Some(first) = data.first() else {
        return;
    };
    let kind = match first.get(column).and_then(parse_number) {
        Some(_) => ColumnKind::Numeric,
        None => ColumnKind::Text,
    };

    data.sort_by(|a, b| {
        sort_key(a.get(column), kind).cmp_with(&sort_key(b.get(column), kind), descending)
    });
}

fn sort_key(value: Option<&str>, kind: ColumnKind) -> SortKey<'_> {
    match (value, kind) {
        (None, _) => SortKey::Unparsable,
        (Some(v), ColumnKind::Numeric) => {
            parse_number(v).map_or(SortKey::Unparsable, SortKey::Number)
        }
        (Some(v), ColumnKind::Text) => SortKey::Text(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ages(values: &[&str]) -> Vec<Record> {
        values
            .iter()
            .enumerate()
            .map(|(i, age)| Record::from_pairs([("id", i.to_string()), ("age", age.to_string())]))
            .collect()
    }

    fn column<'a>(data: &'a [Record], col: &str) -> Vec<&'a str> {
        data.iter().map(|r| r.get(col).unwrap_or("-")).collect()
    }

    #[test]
    fn sorts_numerically_ascending_and_descending() {
        let mut data = ages(&["25", "30", "22"]);
        sort_records(&mut data, "age", false);
        assert_eq!(column(&data, "age"), vec!["22", "25", "30"]);

        sort_records(&mut data, "age", true);
        assert_eq!(column(&data, "age"), vec!["30", "25", "22"]);
    }

    #[test]
    fn numeric_not_lexical() {
        let mut data = ages(&["9", "100", "10.5"]);
        sort_records(&mut data, "age", false);
        assert_eq!(column(&data, "age"), vec!["9", "10.5", "100"]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let mut data = ages(&["30", "25", "30", "25"]);
        sort_records(&mut data, "age", false);
        assert_eq!(column(&data, "id"), vec!["1", "3", "0", "2"]);

        let mut data = ages(&["30", "25", "30", "25"]);
        sort_records(&mut data, "age", true);
        assert_eq!(column(&data, "id"), vec!["0", "2", "1", "3"]);
    }

    #[test]
    fn text_sort_when_first_value_is_text() {
        let mut data = ages(&["Bob", "Alice", "10"]);
        sort_records(&mut data, "age", false);
        assert_eq!(column(&data, "age"), vec!["10", "Alice", "Bob"]);
    }

    #[test]
    fn unparsable_values_sort_last_both_ways() {
        let mut data = ages(&["5", "n/a", "1", "?", "3"]);
        sort_records(&mut data, "age", false);
        assert_eq!(column(&data, "age"), vec!["1", "3", "5", "n/a", "?"]);

        let mut data = ages(&["5", "n/a", "1", "?", "3"]);
        sort_records(&mut data, "age", true);
        assert_eq!(column(&data, "age"), vec!["5", "3", "1", "n/a", "?"]);
    }

    #[test]
    fn missing_sort_column_goes_last() {
        let mut data = ages(&["2", "1"]);
        data.push(Record::from_pairs([("id", "x")]));
        data.insert(1, Record::from_pairs([("id", "y")]));
        sort_records(&mut data, "age", false);
        assert_eq!(column(&data, "id"), vec!["1", "0", "y", "x"]);
    }

    #[test]
    fn sorting_empty_is_noop() {
        let mut data: Vec<Record> = Vec::new();
        sort_records(&mut data, "age", true);
        assert!(data.is_empty());
    }

    #[test]
    fn describe_matches_prompt_wording() {
        let q = Query::new()
            .filter(Predicate::new("Stock", ">", "10"))
            .filter(Predicate::new("Origin", "==", "France"))
            .sort_by(SortSpec::descending("Unit Price"))
            .select(["Company", "Stock"]);
        assert_eq!(
            q.describe(),
            "columns Company, Stock with filters (Stock > 10, Origin == France) sorted by 'Unit Price' in descending order"
        );
        assert_eq!(Query::new().describe(), "all columns");
    }
}
