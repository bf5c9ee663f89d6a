//! `t201-script` generates synthetic per-department inventory CSV files and queries them.
//!
//! The query engine reads every source of a [`store::RecordStore`] (normally the CSV files in
//! a [`store::DirectoryStore`]), keeps the [`types::Record`]s that pass a list of
//! [`types::Predicate`]s, optionally projects and sorts them, and can summarize the result
//! with [`analytics::summarize`] and write it with [`export::export_to_dir`].
//!
//! ## Typing
//!
//! Values are kept as raw strings. A value is numeric if it parses as an `f64`:
//!
//! - filters compare numerically when both sides are numeric, lexically otherwise
//!   ([`query::compare_values`]);
//! - sorting infers the column kind from the first result record ([`query::sort_records`]);
//! - analytics classify each value on its own, so a mixed column appears in both maps of the
//!   [`analytics::Summary`].
//!
//! ## Errors
//!
//! A source that fails to read is reported to the [`store::SourceObserver`] and skipped. An
//! unknown filter operator aborts the query with [`InventoryError::InvalidOperator`].
//!
//! ## Example
//!
//! ```no_run
//! use t201_script::analytics::summarize;
//! use t201_script::query::{execute, Query, QueryOptions, SortSpec};
//! use t201_script::store::DirectoryStore;
//! use t201_script::types::Predicate;
//!
//! # fn main() -> Result<(), t201_script::InventoryError> {
//! let store = DirectoryStore::new("/home/me/.t201-script");
//! let query = Query::new()
//!     .filter(Predicate::new("Origin", "==", "Peru"))
//!     .filter(Predicate::new("Unit Price", "<", "20"))
//!     .sort_by(SortSpec::ascending("Stock"));
//!
//! let rows = execute(&store, &query, &QueryOptions::default())?;
//! let summary = summarize(&rows);
//! println!("{} rows\n{summary}", rows.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`types`]: records, operators, predicates
//! - [`store`]: source listing/reading and per-source observers
//! - [`query`]: filter engine and query pipeline
//! - [`analytics`]: numeric and categorical summaries
//! - [`export`]: JSON export
//! - [`generate`]: seeded synthetic data
//! - [`prompt`]: yes/no confirmation
//! - [`config`]: data directory resolution
//! - [`error`]: error type used across the crate

pub mod analytics;
pub mod config;
pub mod error;
pub mod export;
pub mod generate;
pub mod prompt;
pub mod query;
pub mod store;
pub mod types;

pub use error::{InventoryError, InventoryResult};
