//! Runtime configuration
//!
//! Settings come from the environment:
//! - `NUTRIGOALS_DATABASE_PATH`: profile database file
//! - `RUST_LOG`: tracing filter, on top of the `nutrigoals=info` default

use std::path::{Path, PathBuf};

pub const DATABASE_PATH_ENV: &str = "NUTRIGOALS_DATABASE_PATH";
pub const DEFAULT_LOG_DIRECTIVE: &str = "nutrigoals=info";
const DEFAULT_DATABASE_FILE: &str = "nutrigoals.db";

/// Database path from the environment, or `<project>/data/nutrigoals.db`
pub fn get_database_path() -> PathBuf {
    std::env::var(DATABASE_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let exe_dir = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(Path::to_path_buf))
                .unwrap_or_else(|| PathBuf::from("."));
            default_database_path(&exe_dir)
        })
}

/// Resolve the default database location relative to the executable directory
///
/// Executables under `target/debug` or `target/release` resolve to the project root.
pub fn default_database_path(exe_dir: &Path) -> PathBuf {
    let mut path = exe_dir.to_path_buf();
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(project_root) = path.parent().and_then(Path::parent) {
            path = project_root.to_path_buf();
        }
    }
    path.push("data");
    path.push(DEFAULT_DATABASE_FILE);
    path
}
