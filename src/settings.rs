//! Tool settings read from `settings.toml`.
//!
//! Settings are optional; every key has a default. They only affect how
//! muxfile talks to tmux and how results are displayed, never what gets
//! reconciled.
//!
//! ```toml
//! [tmux]
//! binary = "/opt/homebrew/bin/tmux"
//!
//! [display]
//! color = "never"
//! name_width = 16
//! command_width = 60
//! ```

use serde::Deserialize;

/// When to use colored glyphs instead of bracketed labels.
#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Color when stdout is a capable terminal.
    #[default]
    Auto,
    /// Always use colored glyphs.
    Always,
    /// Always use plain labels.
    Never,
}

/// `[tmux]` table.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TmuxSettings {
    /// Executable invoked for every tmux call.
    pub binary: String,
}

impl Default for TmuxSettings {
    fn default() -> Self {
        Self {
            binary: "tmux".to_string(),
        }
    }
}

/// `[display]` table.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DisplaySettings {
    /// Marker style selection.
    pub color: ColorChoice,
    /// Column width the window name is padded to.
    pub name_width: usize,
    /// Maximum displayed command length, ellipsis included.
    pub command_width: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            color: ColorChoice::Auto,
            name_width: 20,
            command_width: 50,
        }
    }
}

/// Top-level settings structure.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// How to reach tmux.
    pub tmux: TmuxSettings,
    /// Result line formatting.
    pub display: DisplaySettings,
}

impl Settings {
    /// Parse settings from a TOML string. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `toml::de::Error` if the TOML is malformed or a key has the
    /// wrong type.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}
