//! Where the inventory lives.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{InventoryError, InventoryResult};

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "T201_DATA_DIR";

/// Directory name used under the home directory by default.
pub const DEFAULT_DIR_NAME: &str = ".t201-script";

/// Resolved data directory: department CSV files plus the JSON export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    path: PathBuf,
}

impl DataDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `explicit` if given, else `$T201_DATA_DIR`, else `~/.t201-script`.
    pub fn resolve(explicit: Option<PathBuf>) -> InventoryResult<Self> {
        if let Some(path) = explicit {
            return Ok(Self::new(path));
        }
        if let Some(path) = env::var_os(DATA_DIR_ENV).filter(|p| !p.is_empty()) {
            return Ok(Self::new(path));
        }
        Self::default_location()
    }

    /// `~/.t201-script`, from `HOME` (or `USERPROFILE` on Windows).
    pub fn default_location() -> InventoryResult<Self> {
        let home = env::var_os("HOME")
            .or_else(|| env::var_os("USERPROFILE"))
            .filter(|p| !p.is_empty())
            .ok_or_else(|| InventoryError::InvalidArgument {
                message: format!(
                    "cannot locate home directory; set {DATA_DIR_ENV} or pass --data-dir"
                ),
            })?;
        Ok(Self::new(PathBuf::from(home).join(DEFAULT_DIR_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the directory (and parents) if it does not exist.
    pub fn ensure_exists(&self) -> InventoryResult<()> {
        std::fs::create_dir_all(&self.path)?;
        Ok(())
    }
}

impl AsRef<Path> for DataDir {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}
