//! Temporary workspaces and JSON fixtures for CLI tests.

use camino::{Utf8Path, Utf8PathBuf};
use ridepool_core::test_support::passenger_stop;
use ridepool_core::{Route, StopStatus};
use serde::Serialize;
use tempfile::TempDir;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write fixture file");
}

/// A temporary directory addressed with UTF-8 paths.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    /// Serialise `value` to `name` and return its path.
    pub(super) fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Utf8PathBuf {
        let path = self.path(name);
        let payload = serde_json::to_string_pretty(value).expect("serialise fixture");
        write_utf8(&path, payload.as_bytes());
        path
    }
}

/// Three consecutive northbound passenger stops, five kilometres each.
pub(super) fn northbound_route() -> Route {
    Route::new(vec![
        passenger_stop("a", (0.0, 0.0), (0.0, 50.0)),
        passenger_stop("b", (0.0, 50.0), (0.0, 100.0)),
        passenger_stop("c", (0.0, 100.0), (0.0, 150.0)),
    ])
}

/// `a` delivered and `b` still pending.
pub(super) fn half_driven_route() -> Route {
    Route::new(vec![
        passenger_stop("a", (0.0, 0.0), (0.0, 50.0)).with_status(StopStatus::Delivered),
        passenger_stop("b", (0.0, 50.0), (0.0, 100.0)),
    ])
}

pub(super) fn ids(route: &Route) -> Vec<&str> {
    route.iter().map(|stop| stop.id.as_str()).collect()
}
