//! Environment loading helpers

use std::path::Path;

/// Load a `.env`-style file into the process environment
///
/// Variables already set in the environment win over the file. A missing
/// file is not an error; the return value says whether anything was loaded.
pub fn load_env_file(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    match dotenvy::from_path(path) {
        Ok(()) => {
            tracing::debug!("Loaded environment from {}", path.display());
            true
        }
        Err(e) if e.not_found() => {
            tracing::debug!("No env file at {}", path.display());
            false
        }
        Err(e) => {
            tracing::warn!("Failed to load env file {}: {}", path.display(), e);
            false
        }
    }
}

/// Read an environment variable, falling back to `default` when unset or empty
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Read a boolean flag (`1`, `true`, `yes`, `on`, case-insensitive)
pub fn env_flag(key: &str) -> Option<bool> {
    let value = std::env::var(key).ok()?;
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
