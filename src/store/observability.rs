use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::InventoryError;
use crate::prompt::PREFIX;

/// Context about one source read.
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Source identifier (file name inside the data directory).
    pub source_id: String,
    /// Full path that was read.
    pub path: PathBuf,
}

/// Minimal stats reported after a source was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceStats {
    /// Records read from the source.
    pub records: usize,
    /// Records that passed the filters.
    pub matched: usize,
}

/// Observer interface for per-source outcomes during a query.
///
/// A failing source never aborts the query; this is where it gets reported.
pub trait SourceObserver {
    /// Called after a source was read and filtered.
    fn on_source_read(&self, _ctx: &SourceContext, _stats: SourceStats) {}

    /// Called when a source could not be read. `error` is a [`InventoryError::SourceRead`].
    fn on_source_failure(&self, _ctx: &SourceContext, _error: &InventoryError) {}
}

/// Prints source failures to stderr in the CLI's message format.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl SourceObserver for StdErrObserver {
    fn on_source_failure(&self, ctx: &SourceContext, error: &InventoryError) {
        eprintln!("{PREFIX} {}", failure_message(ctx, error));
    }
}

/// Forwards every outcome to the `log` facade.
#[derive(Debug, Default)]
pub struct LogObserver;

impl SourceObserver for LogObserver {
    fn on_source_read(&self, ctx: &SourceContext, stats: SourceStats) {
        log::debug!(
            "[store][ok] path={} records={} matched={}",
            ctx.path.display(),
            stats.records,
            stats.matched
        );
    }

    fn on_source_failure(&self, ctx: &SourceContext, error: &InventoryError) {
        log::warn!("[store][fail] path={} err={}", ctx.path.display(), error);
    }
}

/// Fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn SourceObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn SourceObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl SourceObserver for CompositeObserver {
    fn on_source_read(&self, ctx: &SourceContext, stats: SourceStats) {
        for o in &self.observers {
            o.on_source_read(ctx, stats);
        }
    }

    fn on_source_failure(&self, ctx: &SourceContext, error: &InventoryError) {
        for o in &self.observers {
            o.on_source_failure(ctx, error);
        }
    }
}

/// `Error processing file <id> : <error>`
pub fn failure_message(ctx: &SourceContext, error: &InventoryError) -> String {
    format!("Error processing file {} : {}", ctx.source_id, error)
}
