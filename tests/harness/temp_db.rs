use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use arbhunter::adapter::outbound::sqlite::SqliteRecorder;

/// Temporary SQLite database for integration tests.
pub struct TempDb {
    path: PathBuf,
    recorder: SqliteRecorder,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        path.push(format!("arbhunter-{name}-{nanos}.db"));

        let recorder = SqliteRecorder::open(&path).expect("open sqlite recorder");
        Self { path, recorder }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn recorder(&self) -> &SqliteRecorder {
        &self.recorder
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
