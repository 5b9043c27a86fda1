use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static DIR_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Creates a fresh directory under the system temp dir, unique within and across test runs.
pub(crate) fn unique_temp_dir(scope: &str) -> PathBuf {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap();
    let counter = DIR_COUNTER.fetch_add(1, Ordering::AcqRel);

    let dir = std::env::temp_dir().join(scope).join(format!(
        "{}-{}{}-{}",
        std::process::id(),
        now.as_secs(),
        now.subsec_micros(),
        counter
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
