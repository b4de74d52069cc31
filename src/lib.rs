//! # Muxfile
//!
//! Declarative tmux provisioning: describe sessions and windows in a small
//! text file, run `muxfile`, and whatever is missing gets created. Running it
//! again is safe; existing windows are skipped unless `--restart` is given.
//!
//! ## Quick Example
//!
//! ```text
//! # sessions.conf
//! [api]
//! workdir = ~/src/api
//! - editor = nvim .
//! - server = cargo watch -x run
//! + echo "watching"
//!
//! [ops]
//! - logs = journalctl -f
//! ```
//!
//! ## Architecture
//!
//! The crate is organized into these modules:
//!
//! - [`parser`]: Line classification (`[session]`, `- window`, `+ continuation`, options)
//! - [`config`]: Session and window data model
//! - [`provision`]: Streaming driver, session state and run summary
//! - [`reconcile`]: Per-window create/add/skip/restart decision and execution
//! - [`tmux`]: Probe and mutation traits and the tmux implementation
//! - [`report`]: Result line formatting and marker styles
//! - [`list`]: Live session table for `muxfile-ls`
//! - [`settings`]: Optional `settings.toml`
//! - [`loader`]: Config and settings file loading
//! - [`cli`]: Command-line argument parsing with clap
//! - [`error`]: Error types
//!
//! ## Known limitation
//!
//! Existence checks and mutations are separate tmux calls. Two muxfile runs
//! against the same tmux server at the same time can both decide to create
//! the same window.

pub mod cli;
pub mod config;
pub mod error;
pub mod list;
pub mod loader;
pub mod parser;
pub mod provision;
pub mod reconcile;
pub mod report;
pub mod settings;
pub mod tmux;

pub use config::{SessionBlock, WindowIntent};
pub use error::{MuxfileError, Result};
pub use provision::{Provisioner, RunSummary, Warning};
pub use reconcile::{Action, Outcome};
pub use tmux::{Multiplexer, Probe, Tmux};

use std::io::Write;

/// Environment variable that overrides the log filter.
pub const LOG_ENV: &str = "MUXFILE_LOG";

/// Initialize stderr logging for the binaries.
///
/// Defaults to warnings only; set `MUXFILE_LOG=debug` to see every tmux call.
pub fn init_logging() {
    let env = env_logger::Env::new().filter_or(LOG_ENV, "warn");
    env_logger::Builder::from_env(env)
        .format(|buf, record| {
            let level = match record.level() {
                log::Level::Warn => "warning".to_string(),
                other => other.as_str().to_lowercase(),
            };
            writeln!(buf, "{}: {}", level, record.args())
        })
        .init();
}
