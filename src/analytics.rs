//! Descriptive statistics over a query result.
//!
//! Every value is classified on its own: numbers feed [`NumericStats`], anything else is
//! counted in the categorical map. A column holding both kinds of values therefore shows up
//! in both maps of the [`Summary`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{parse_number, Record};

/// Running numeric statistics for one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    #[serde(with = "float_repr")]
    pub total: f64,
    #[serde(with = "float_repr")]
    pub max: f64,
    #[serde(with = "float_repr")]
    pub min: f64,
    pub count: u64,
    /// `total / count`, filled in once all records are seen.
    #[serde(with = "float_repr")]
    pub mean: f64,
}

/// JSON has no infinities or NaN, so non-finite stats are written as the strings `"inf"`,
/// `"-inf"` and `"NaN"`.
mod float_repr {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if value.is_sign_positive() {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(n),
            Repr::Text(text) => text
                .parse::<f64>()
                .map_err(|_| de::Error::custom(format!("expected a number, got {text:?}"))),
        }
    }
}

impl NumericStats {
    fn first(value: f64) -> Self {
        Self {
            total: 0.0,
            max: value,
            min: value,
            count: 0,
            mean: 0.0,
        }
    }

    fn observe(&mut self, value: f64) {
        self.total += value;
        self.max = self.max.max(value);
        self.min = self.min.min(value);
        self.count += 1;
    }
}

/// Numeric stats keyed by column.
pub type NumericSummary = BTreeMap<String, NumericStats>;

/// Value occurrence counts keyed by column, then by value.
pub type CategoricalSummary = BTreeMap<String, BTreeMap<String, u64>>;

type SummaryRepr = (NumericSummary, CategoricalSummary);

/// Result of [`summarize`].
///
/// Serializes as the two-element array `[numeric, categorical]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "SummaryRepr", into = "SummaryRepr")]
pub struct Summary {
    pub numeric: NumericSummary,
    pub categorical: CategoricalSummary,
}

impl From<SummaryRepr> for Summary {
    fn from((numeric, categorical): SummaryRepr) -> Self {
        Self {
            numeric,
            categorical,
        }
    }
}

impl From<Summary> for SummaryRepr {
    fn from(summary: Summary) -> Self {
        (summary.numeric, summary.categorical)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (column, s) in &self.numeric {
            writeln!(
                f,
                "{column}: count={} min={} max={} mean={:.2} total={:.2}",
                s.count, s.min, s.max, s.mean, s.total
            )?;
        }
        for (column, counts) in &self.categorical {
            let mut by_count: Vec<(&String, &u64)> = counts.iter().collect();
            by_count.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
            let top: Vec<String> = by_count
                .iter()
                .take(5)
                .map(|(v, n)| format!("{v}={n}"))
                .collect();
            writeln!(
                f,
                "{column}: {} distinct, top: {}",
                counts.len(),
                top.join(", ")
            )?;
        }
        Ok(())
    }
}

/// Compute per-column statistics over `records`.
pub fn summarize<'a, I>(records: I) -> Summary
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut summary = Summary::default();

    for record in records {
        for (column, value) in record.iter() {
            match parse_number(value) {
                Some(n) => summary
                    .numeric
                    .entry(column.to_owned())
                    .or_insert_with(|| NumericStats::first(n))
                    .observe(n),
                None => {
                    *summary
                        .categorical
                        .entry(column.to_owned())
                        .or_default()
                        .entry(value.to_owned())
                        .or_insert(0) += 1;
                }
            }
        }
    }

    for stats in summary.numeric.values_mut() {
        stats.mean = stats.total / stats.count as f64;
    }
    summary
}
