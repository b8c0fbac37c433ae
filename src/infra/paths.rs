// src/infra/paths.rs — Config directory resolution
//
// SESSION_SCORER_HOME overrides everything. Without it the config lives in
// ~/.session-scorer/ and falls back to the working directory when no home
// directory can be determined (e.g. minimal containers).

use std::path::{Path, PathBuf};

pub const HOME_ENV: &str = "SESSION_SCORER_HOME";

fn scorer_home() -> Option<PathBuf> {
    std::env::var_os(HOME_ENV).map(PathBuf::from)
}

/// Configuration directory: $SESSION_SCORER_HOME/ or ~/.session-scorer/
pub fn config_dir() -> PathBuf {
    if let Some(home) = scorer_home() {
        return home;
    }
    match directories::BaseDirs::new() {
        Some(base) => base.home_dir().join(".session-scorer"),
        None => PathBuf::from("."),
    }
}

pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
