//! Path resolution for the client-secret file.
//!
//! The file is looked up in the current working directory under a fixed
//! name unless `--credentials` points elsewhere.

use std::path::{Path, PathBuf};

pub const CREDENTIALS_FILE: &str = "credentials.json";

/// Return the default client-secret path (cwd-relative).
pub fn credentials_json() -> PathBuf {
    PathBuf::from(CREDENTIALS_FILE)
}

/// Resolve an explicit path, falling back to the default.
pub fn credentials_path(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(p) => expand_tilde(&p.to_string_lossy()),
        None => credentials_json(),
    }
}

/// Get the user's home directory.
pub fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Expand ~ to home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home_dir().join(rest)
    } else if path == "~" {
        home_dir()
    } else {
        PathBuf::from(path)
    }
}
