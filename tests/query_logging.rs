use std::fs;
use std::sync::{Arc, Mutex};

use log::{Level, LevelFilter, Log, Metadata, Record as LogRecord};

use t201_script::query::{execute, Query, QueryOptions};
use t201_script::store::{DirectoryStore, LogObserver};

struct CaptureLogger {
    lines: Mutex<Vec<(Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &LogRecord) {
        self.lines
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    lines: Mutex::new(Vec::new()),
};

#[test]
fn failing_source_is_logged_once() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.csv"), "name,age\nAlice,25\n").unwrap();
    fs::write(dir.path().join("b.csv"), "name,age\nBob,30,extra\n").unwrap();

    let store = DirectoryStore::new(dir.path());
    let options = QueryOptions {
        observer: Some(Arc::new(LogObserver)),
    };
    let data = execute(&store, &Query::new(), &options).unwrap();
    assert_eq!(data.len(), 1);

    let lines = LOGGER.lines.lock().unwrap().clone();
    let warnings: Vec<_> = lines
        .iter()
        .filter(|(level, _)| *level == Level::Warn)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].1.contains("b.csv"));

    let reads = lines
        .iter()
        .filter(|(level, msg)| *level == Level::Debug && msg.contains("a.csv"))
        .count();
    assert_eq!(reads, 1);
}
