//! Tmux session and window operations.
//!
//! The reconciler talks to tmux through two traits:
//!
//! - [`Probe`] answers read-only existence questions.
//! - [`Multiplexer`] adds the mutating calls.
//!
//! [`Tmux`] implements both by shelling out to the tmux binary. Sessions are
//! always targeted with the `=` prefix so that `dev` never matches `dev2`.
//! Windows are resolved to their `@id` before being killed or sent keys: a
//! `session:name` target treats a numeric name as an index and falls back to
//! prefix matching.
//!
//! # Mutation status
//!
//! Mutating calls return `Ok(true)` when tmux exited successfully and
//! `Ok(false)` when it did not. Callers must not treat `false` as failure:
//! `new-window` can exit non-zero (for example with "no current client")
//! after the window was created. Success is decided by probing again.

use crate::error::{MuxfileError, Result};
use std::process::{Command, Output};

/// Read-only queries against live multiplexer state.
pub trait Probe {
    /// Does a session with exactly this name exist?
    fn session_exists(&self, session: &str) -> Result<bool>;

    /// Does a window with exactly this name exist inside `session`?
    fn window_exists(&self, session: &str, window: &str) -> Result<bool>;
}

/// Mutating multiplexer operations.
pub trait Multiplexer: Probe {
    /// Create a detached session whose first window is named `window`.
    fn create_session(&mut self, session: &str, window: &str) -> Result<bool>;

    /// Create a named window in an existing session without selecting it.
    fn create_window(&mut self, session: &str, window: &str) -> Result<bool>;

    /// Destroy a named window.
    fn kill_window(&mut self, session: &str, window: &str) -> Result<bool>;

    /// Type `command` literally into `session:window` and press Enter.
    fn send_command(&mut self, session: &str, window: &str, command: &str) -> Result<()>;
}

/// One row of `list-windows -a`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    /// Owning session name.
    pub session: String,
    /// Window index within the session.
    pub index: u32,
    /// Window name.
    pub name: String,
    /// Whether this is the session's active window.
    pub active: bool,
}

/// Tmux client that invokes the tmux binary for every operation.
#[derive(Debug, Clone)]
pub struct Tmux {
    binary: String,
}

impl Tmux {
    /// Create a client using the given tmux executable.
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn output(&self, args: &[&str]) -> Result<Output> {
        log::debug!("{} {}", self.binary, args.join(" "));
        Command::new(&self.binary)
            .args(args)
            .output()
            .map_err(|e| MuxfileError::TmuxError(format!("{}: {}", self.binary, e)))
    }

    /// Run a command and report whether it exited successfully.
    fn status(&self, args: &[&str]) -> Result<bool> {
        let output = self.output(args)?;
        if !output.status.success() {
            log::debug!(
                "{} {} exited with {}: {}",
                self.binary,
                args.first().copied().unwrap_or_default(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(output.status.success())
    }

    /// List the window names of a session. A missing session has no windows.
    pub fn window_names(&self, session: &str) -> Result<Vec<String>> {
        let target = session_target(session);
        let output = self.output(&["list-windows", "-t", &target, "-F", "#{window_name}"])?;
        if !output.status.success() {
            return Ok(Vec::new());
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_string)
            .collect())
    }

    /// Look up the `@id` of the window named exactly `window` in `session`.
    ///
    /// If several windows share the name, the last one listed wins.
    pub fn window_id(&self, session: &str, window: &str) -> Result<Option<String>> {
        let target = session_target(session);
        let output = self.output(&[
            "list-windows",
            "-t",
            &target,
            "-F",
            "#{window_id}\t#{window_name}",
        ])?;
        if !output.status.success() {
            return Ok(None);
        }

        let ids = parse_window_ids(&String::from_utf8_lossy(&output.stdout));
        Ok(find_window_id(&ids, window).map(str::to_string))
    }

    /// List every window of every session.
    ///
    /// Returns an empty list when no server is running.
    pub fn list_all_windows(&self) -> Result<Vec<WindowInfo>> {
        let output = self.output(&[
            "list-windows",
            "-a",
            "-F",
            "#{session_name}\t#{window_index}\t#{window_active}\t#{window_name}",
        ])?;
        if !output.status.success() {
            return Ok(Vec::new());
        }

        Ok(parse_window_list(&String::from_utf8_lossy(&output.stdout)))
    }
}

impl Probe for Tmux {
    fn session_exists(&self, session: &str) -> Result<bool> {
        let target = session_target(session);
        self.status(&["has-session", "-t", &target])
    }

    fn window_exists(&self, session: &str, window: &str) -> Result<bool> {
        Ok(self.window_names(session)?.iter().any(|n| n == window))
    }
}

impl Multiplexer for Tmux {
    fn create_session(&mut self, session: &str, window: &str) -> Result<bool> {
        self.status(&["new-session", "-d", "-s", session, "-n", window])
    }

    fn create_window(&mut self, session: &str, window: &str) -> Result<bool> {
        let target = format!("{}:", session_target(session));
        self.status(&["new-window", "-d", "-t", &target, "-n", window])
    }

    fn kill_window(&mut self, session: &str, window: &str) -> Result<bool> {
        match self.window_id(session, window)? {
            Some(target) => self.status(&["kill-window", "-t", &target]),
            None => {
                log::debug!("no window {}:{} to kill", session, window);
                Ok(false)
            }
        }
    }

    fn send_command(&mut self, session: &str, window: &str, command: &str) -> Result<()> {
        let target = self.window_id(session, window)?.ok_or_else(|| {
            MuxfileError::TmuxError(format!("window {}:{} not found", session, window))
        })?;
        if !self.status(&["send-keys", "-t", &target, "-l", command])? {
            return Err(MuxfileError::TmuxError(format!(
                "send-keys to {} failed",
                target
            )));
        }
        if !self.status(&["send-keys", "-t", &target, "Enter"])? {
            return Err(MuxfileError::TmuxError(format!(
                "send-keys Enter to {} failed",
                target
            )));
        }
        Ok(())
    }
}

/// Exact-match target for a session.
pub fn session_target(session: &str) -> String {
    format!("={}", session)
}

/// Parse tab-separated `id, name` rows from `list-windows`.
///
/// Rows without an `@id` are skipped. The name may contain tabs.
pub fn parse_window_ids(raw: &str) -> Vec<(String, String)> {
    raw.lines()
        .filter_map(|line| {
            let (id, name) = line.split_once('\t')?;
            if !id.starts_with('@') {
                return None;
            }
            Some((id.to_string(), name.to_string()))
        })
        .collect()
}

/// Find the id of the window whose name equals `window` exactly.
pub fn find_window_id<'a>(ids: &'a [(String, String)], window: &str) -> Option<&'a str> {
    ids.iter()
        .rev()
        .find(|(_, name)| name == window)
        .map(|(id, _)| id.as_str())
}

/// Parse tab-separated `session, index, active, name` rows.
///
/// Malformed rows are skipped. The name is the last field so it may contain
/// tabs.
pub fn parse_window_list(raw: &str) -> Vec<WindowInfo> {
    raw.lines()
        .filter_map(|line| {
            let mut parts = line.splitn(4, '\t');
            let session = parts.next()?;
            let index = parts.next()?.trim().parse().ok()?;
            let active = parts.next()? == "1";
            let name = parts.next()?;
            Some(WindowInfo {
                session: session.to_string(),
                index,
                name: name.to_string(),
                active,
            })
        })
        .collect()
}
