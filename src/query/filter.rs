//! Predicate evaluation for [`crate::types::Record`]s.

use crate::error::InventoryResult;
use crate::types::{parse_number, Operator, Predicate, Record, MISSING_VALUE};

/// Compare two raw values with `op`.
///
/// If both sides parse as numbers the comparison is numeric, otherwise it is a lexical
/// comparison of the raw strings.
pub fn compare_values(lhs: &str, op: Operator, rhs: &str) -> bool {
    match (parse_number(lhs), parse_number(rhs)) {
        (Some(l), Some(r)) => op.apply(&l, &r),
        _ => op.apply(lhs, rhs),
    }
}

/// Returns whether `record` satisfies every predicate.
///
/// - An empty predicate list matches everything.
/// - A column missing from the record compares as the string `"None"`.
/// - Every predicate is evaluated even after one fails, so an invalid operator anywhere in
///   the list is always reported.
pub fn matches(record: &Record, predicates: &[Predicate]) -> InventoryResult<bool> {
    let mut all = true;
    for predicate in predicates {
        let op = predicate.operator()?;
        let value = record.get(&predicate.column).unwrap_or(MISSING_VALUE);
        all &= compare_values(value, op, &predicate.value);
    }
    Ok(all)
}

/// Returns the first invalid operator in `predicates` as an error, if any.
pub fn validate(predicates: &[Predicate]) -> InventoryResult<()> {
    for predicate in predicates {
        predicate.operator()?;
    }
    Ok(())
}
