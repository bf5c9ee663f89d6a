//! Synthetic inventory data.
//!
//! One CSV file per department, named after a city, with the [`COLUMN_NAMES`] header. All
//! randomness comes from the caller's generator, so a seeded [`StdRng`](rand::rngs::StdRng)
//! reproduces the same files.

use std::fs;
use std::path::{Path, PathBuf};

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::error::{InventoryError, InventoryResult};
use crate::types::{Record, COLUMN_NAMES};

/// Seed used by the CLI when none is given.
pub const DEFAULT_SEED: u64 = 717;

const SUPPLIER_COUNT: usize = 30;
const ORIGIN_COUNT: usize = 50;
const CATEGORY_COUNT: usize = 50;

const CITIES: &[&str] = &[
    "Aberdeen", "Ashford", "Bakersfield", "Bellevue", "Boulder", "Bristol", "Camden",
    "Chester", "Clifton", "Dayton", "Denton", "Dover", "Easton", "Elgin", "Fairview",
    "Franklin", "Georgetown", "Glendale", "Greenville", "Hampton", "Harrison", "Hudson",
    "Irvine", "Jackson", "Kingston", "Lakewood", "Lancaster", "Lexington", "Lincoln",
    "Madison", "Marion", "Milford", "Newport", "Norwood", "Oakland", "Oxford", "Palmer",
    "Quincy", "Raleigh", "Richmond", "Riverside", "Salem", "Shelby", "Springfield",
    "Stratford", "Taylor", "Trenton", "Troy", "Union", "Vernon", "Warren", "Wayne",
    "Weston", "Wilmington", "Windsor", "Yorktown", "Zanesville",
];

const SURNAMES: &[&str] = &[
    "Adams", "Baker", "Barnes", "Bell", "Brooks", "Carter", "Clark", "Collins", "Cook",
    "Davis", "Edwards", "Evans", "Fisher", "Garcia", "Gray", "Hall", "Hayes", "Hughes",
    "Jenkins", "Kelly", "Lewis", "Martin", "Miller", "Moore", "Murphy", "Nelson", "Parker",
    "Price", "Reed", "Rogers", "Ross", "Sanders", "Scott", "Stewart", "Turner", "Walker",
    "Ward", "Watson", "Wood", "Young",
];

const COMPANY_SUFFIXES: &[&str] = &["Inc", "LLC", "Ltd", "Group", "PLC", "and Sons"];

const COUNTRIES: &[&str] = &[
    "Argentina", "Australia", "Austria", "Belgium", "Bolivia", "Brazil", "Bulgaria",
    "Canada", "Chile", "China", "Colombia", "Croatia", "Cuba", "Denmark", "Ecuador",
    "Egypt", "Estonia", "Ethiopia", "Finland", "France", "Germany", "Ghana", "Greece",
    "Hungary", "Iceland", "India", "Indonesia", "Ireland", "Italy", "Jamaica", "Japan",
    "Kenya", "Latvia", "Lithuania", "Malaysia", "Mexico", "Morocco", "Nepal", "Netherlands",
    "Nigeria", "Norway", "Peru", "Poland", "Portugal", "Romania", "Senegal", "Spain",
    "Sweden", "Thailand", "Tunisia", "Uruguay", "Vietnam",
];

const WORDS: &[&str] = &[
    "anchor", "basket", "beacon", "blanket", "bottle", "bracket", "bucket", "cable",
    "candle", "canvas", "carpet", "chisel", "clamp", "compass", "cushion", "drill",
    "engine", "fabric", "filter", "funnel", "gasket", "glove", "hammer", "helmet",
    "hinge", "jacket", "kettle", "ladder", "lantern", "lever", "magnet", "mirror",
    "nozzle", "paddle", "pillow", "pipe", "pulley", "ribbon", "saddle", "scissors",
    "shovel", "socket", "spindle", "spring", "stapler", "switch", "thread", "towel",
    "valve", "wrench",
];

/// Picks department names and row values from pools drawn once at construction.
#[derive(Debug, Clone)]
pub struct DataGenerator {
    suppliers: Vec<String>,
    origins: Vec<String>,
    categories: Vec<String>,
}

/// Outcome of [`DataGenerator::generate`].
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Files written, in generation order.
    pub written: Vec<PathBuf>,
    /// Files that could not be written. Generation carries on past these.
    pub failed: Vec<(PathBuf, InventoryError)>,
}

impl DataGenerator {
    /// Draw the supplier, origin and category pools from `rng`.
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self {
            suppliers: (0..SUPPLIER_COUNT).map(|_| fake_company(rng)).collect(),
            origins: pick(rng, COUNTRIES, ORIGIN_COUNT),
            categories: pick(rng, WORDS, CATEGORY_COUNT)
                .iter()
                .map(|w| capitalize(w))
                .collect(),
        }
    }

    /// `n` distinct department (city) names.
    pub fn departments<R: Rng>(&self, rng: &mut R, n: usize) -> InventoryResult<Vec<String>> {
        if n == 0 || n > CITIES.len() {
            return Err(InventoryError::InvalidArgument {
                message: format!("files={n} must be between 1 and {}", CITIES.len()),
            });
        }
        Ok(CITIES
            .choose_multiple(rng, n)
            .map(|c| c.to_string())
            .collect())
    }

    /// `rows` records for `department`, with ids `ABC-001`, `ABC-002`, ...
    pub fn records<R: Rng>(&self, rng: &mut R, department: &str, rows: usize) -> Vec<Record> {
        let prefix: String = department.chars().take(3).collect::<String>().to_uppercase();
        (1..=rows)
            .map(|i| {
                let values = [
                    format!("{prefix}-{i:03}"),
                    choose(rng, &self.suppliers),
                    choose(rng, &self.origins),
                    choose(rng, &self.categories),
                    rng.random_range(0..=999_u32).to_string(),
                    format_price(rng.random_range(0..=9999_u32)),
                ];
                Record::from_pairs(COLUMN_NAMES.iter().copied().zip(values))
            })
            .collect()
    }

    /// Write `files` department files of `rows` rows each into `dir`, creating `dir` if needed.
    ///
    /// A file that fails to write is recorded in the report and the rest are still written.
    pub fn generate<R: Rng>(
        &self,
        rng: &mut R,
        dir: impl AsRef<Path>,
        files: usize,
        rows: usize,
    ) -> InventoryResult<GenerationReport> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let mut report = GenerationReport::default();
        for department in self.departments(rng, files)? {
            let path = dir.join(format!("{department}.csv"));
            let records = self.records(rng, &department, rows);
            match write_source(&path, &records) {
                Ok(()) => {
                    log::info!("wrote {} rows to {}", records.len(), path.display());
                    report.written.push(path);
                }
                Err(e) => {
                    log::error!("failed writing {}: {}", path.display(), e);
                    report.failed.push((path, e));
                }
            }
        }
        Ok(report)
    }
}

/// Remove every regular file in `dir`. Returns the removed file names, sorted.
pub fn delete_data(dir: impl AsRef<Path>) -> InventoryResult<Vec<String>> {
    let mut removed = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        fs::remove_file(entry.path())?;
        log::info!("removed {}", entry.path().display());
        removed.push(entry.file_name().to_string_lossy().into_owned());
    }
    removed.sort();
    Ok(removed)
}

fn write_source(path: &Path, records: &[Record]) -> InventoryResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(COLUMN_NAMES)?;
    for record in records {
        wtr.write_record(record.iter().map(|(_, v)| v))?;
    }
    wtr.flush()?;
    Ok(())
}

// Prices are cents / 100, printed the shortest way that keeps one decimal: 12.5, 0.0, 99.99.
fn format_price(cents: u32) -> String {
    let price = f64::from(cents) / 100.0;
    if price.fract() == 0.0 {
        format!("{price:.1}")
    } else {
        price.to_string()
    }
}

fn fake_company<R: Rng>(rng: &mut R) -> String {
    let a = choose(rng, SURNAMES);
    let name = match rng.random_range(0..3) {
        0 => format!("{a} {}", choose(rng, COMPANY_SUFFIXES)),
        1 => format!("{a}-{}", choose(rng, SURNAMES)),
        _ => format!("{a}, {} and {}", choose(rng, SURNAMES), choose(rng, SURNAMES)),
    };
    // Values are written unquoted, so commas must go.
    name.replace(',', "")
}

fn pick<R: Rng>(rng: &mut R, pool: &[&str], n: usize) -> Vec<String> {
    (0..n).map(|_| choose(rng, pool)).collect()
}

fn choose<R: Rng, S: AsRef<str>>(rng: &mut R, pool: &[S]) -> String {
    pool.choose(rng)
        .map(|s| s.as_ref().to_owned())
        .unwrap_or_default()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
