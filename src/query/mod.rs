//! Query engine over [`crate::types::Record`]s.
//!
//! - [`filter`]: numeric-aware predicate evaluation ([`matches`], [`compare_values`])
//! - [`pipeline`]: store → filter → project → sort ([`execute`])
//!
//! ## Example
//!
//! ```rust
//! use t201_script::query::{matches, sort_records};
//! use t201_script::types::{Predicate, Record};
//!
//! let mut rows = vec![
//!     Record::from_pairs([("name", "Alice"), ("age", "25")]),
//!     Record::from_pairs([("name", "Bob"), ("age", "30")]),
//!     Record::from_pairs([("name", "Charlie"), ("age", "22")]),
//! ];
//!
//! let older = [Predicate::new("age", ">", "24")];
//! rows.retain(|r| matches(r, &older).unwrap());
//! sort_records(&mut rows, "age", true);
//!
//! let names: Vec<_> = rows.iter().filter_map(|r| r.get("name")).collect();
//! assert_eq!(names, vec!["Bob", "Alice"]);
//! ```

pub mod filter;
pub mod pipeline;

pub use filter::{compare_values, matches};
pub use pipeline::{execute, sort_records, Query, QueryOptions, SortSpec};
