//! Config and settings file discovery and loading.
//!
//! The session config comes from the command line (default
//! `./sessions.conf`). The optional settings file is searched in this order:
//!
//! 1. `$XDG_CONFIG_HOME/muxfile/settings.toml`
//! 2. `~/.config/muxfile/settings.toml`
//! 3. Platform default (e.g., `~/Library/Application Support` on macOS)

use crate::error::{MuxfileError, Result};
use crate::settings::Settings;
use std::path::{Path, PathBuf};

/// Session config used when no path is given.
pub const DEFAULT_CONFIG: &str = "sessions.conf";

/// Read the session config text.
///
/// # Errors
///
/// - [`MuxfileError::ConfigNotFound`] if the file doesn't exist
/// - [`MuxfileError::Read`] if reading fails
pub fn load_config(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(MuxfileError::ConfigNotFound(path.to_path_buf()));
    }
    std::fs::read_to_string(path).map_err(|source| MuxfileError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Find an existing settings file.
///
/// Returns `Ok(None)` when no settings file exists in any search location.
///
/// # Errors
///
/// Returns [`MuxfileError::NoConfigDir`] if neither `$XDG_CONFIG_HOME`, the
/// home directory, nor a platform config directory can be determined.
pub fn settings_path() -> Result<Option<PathBuf>> {
    let mut candidates = Vec::new();

    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        candidates.push(PathBuf::from(xdg));
    }
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".config"));
    }
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir);
    }
    if candidates.is_empty() {
        return Err(MuxfileError::NoConfigDir);
    }

    Ok(candidates
        .into_iter()
        .map(|dir| dir.join("muxfile").join("settings.toml"))
        .find(|path| path.exists()))
}

/// Load and parse a settings file from the given path.
///
/// # Errors
///
/// - [`MuxfileError::Read`] if reading fails
/// - [`MuxfileError::Settings`] if TOML parsing fails
pub fn load_settings(path: &Path) -> Result<Settings> {
    let contents = std::fs::read_to_string(path).map_err(|source| MuxfileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Settings::from_toml(&contents).map_err(|source| MuxfileError::Settings {
        path: path.to_path_buf(),
        source,
    })
}

/// Load settings from the default locations, falling back to defaults.
///
/// A missing settings file or config directory is not an error; a settings
/// file that exists but does not parse is.
pub fn load_default_settings() -> Result<Settings> {
    match settings_path() {
        Ok(Some(path)) => {
            log::debug!("loading settings from {}", path.display());
            load_settings(&path)
        }
        Ok(None) | Err(MuxfileError::NoConfigDir) => Ok(Settings::default()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ColorChoice;
    use std::io::Write;

    #[test]
    fn test_load_config_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.conf");
        assert!(matches!(
            load_config(&path),
            Err(MuxfileError::ConfigNotFound(p)) if p == path
        ));
    }

    #[test]
    fn test_load_config_reads_text() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dev]\n- a = ls").unwrap();
        let text = load_config(file.path()).unwrap();
        assert!(text.starts_with("[dev]"));
    }

    #[test]
    fn test_load_settings() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display]\ncolor = \"always\"").unwrap();
        let settings = load_settings(file.path()).unwrap();
        assert_eq!(settings.display.color, ColorChoice::Always);
    }

    #[test]
    fn test_load_settings_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display\ncolor = ").unwrap();
        assert!(matches!(
            load_settings(file.path()),
            Err(MuxfileError::Settings { .. })
        ));
    }
}
