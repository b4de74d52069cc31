#![allow(dead_code)]

use muxfile::error::{MuxfileError, Result};
use muxfile::report::Reporter;
use muxfile::{Multiplexer, Outcome, Probe};

/// In-memory tmux server.
#[derive(Debug, Default)]
pub struct FakeMux {
    /// Sessions and their window names, in creation order.
    pub sessions: Vec<(String, Vec<String>)>,
    /// Every `send_command` call as `(session, window, command)`.
    pub sent: Vec<(String, String, String)>,
    /// Every mutating call, e.g. `new-window dev:editor`.
    pub mutations: Vec<String>,
    /// `create_window` creates the window but reports failure.
    pub benign_window_failure: bool,
    /// Window names that can never be created.
    pub broken_windows: Vec<String>,
    /// Every probe fails as if the tmux binary were missing.
    pub probe_error: bool,
}

impl FakeMux {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window(mut self, session: &str, window: &str) -> Self {
        match self.sessions.iter_mut().find(|(s, _)| s == session) {
            Some((_, windows)) => windows.push(window.to_string()),
            None => self
                .sessions
                .push((session.to_string(), vec![window.to_string()])),
        }
        self
    }

    pub fn windows(&self, session: &str) -> Vec<String> {
        self.sessions
            .iter()
            .find(|(s, _)| s == session)
            .map(|(_, w)| w.clone())
            .unwrap_or_default()
    }

    pub fn window_count(&self) -> usize {
        self.sessions.iter().map(|(_, w)| w.len()).sum()
    }

    pub fn sent_to(&self, session: &str, window: &str) -> Vec<&str> {
        self.sent
            .iter()
            .filter(|(s, w, _)| s == session && w == window)
            .map(|(_, _, c)| c.as_str())
            .collect()
    }

    fn check_probe(&self) -> Result<()> {
        if self.probe_error {
            return Err(MuxfileError::TmuxError("tmux: No such file or directory".into()));
        }
        Ok(())
    }
}

impl Probe for FakeMux {
    fn session_exists(&self, session: &str) -> Result<bool> {
        self.check_probe()?;
        Ok(self.sessions.iter().any(|(s, _)| s == session))
    }

    fn window_exists(&self, session: &str, window: &str) -> Result<bool> {
        self.check_probe()?;
        Ok(self.windows(session).iter().any(|w| w == window))
    }
}

impl Multiplexer for FakeMux {
    fn create_session(&mut self, session: &str, window: &str) -> Result<bool> {
        self.mutations
            .push(format!("new-session {}:{}", session, window));
        if self.broken_windows.iter().any(|w| w == window) {
            return Ok(false);
        }
        if self.sessions.iter().any(|(s, _)| s == session) {
            return Ok(false);
        }
        self.sessions
            .push((session.to_string(), vec![window.to_string()]));
        Ok(true)
    }

    fn create_window(&mut self, session: &str, window: &str) -> Result<bool> {
        self.mutations
            .push(format!("new-window {}:{}", session, window));
        if self.broken_windows.iter().any(|w| w == window) {
            return Ok(false);
        }
        match self.sessions.iter_mut().find(|(s, _)| s == session) {
            Some((_, windows)) => {
                windows.push(window.to_string());
                Ok(!self.benign_window_failure)
            }
            None => Ok(false),
        }
    }

    fn kill_window(&mut self, session: &str, window: &str) -> Result<bool> {
        self.mutations
            .push(format!("kill-window {}:{}", session, window));
        let Some(pos) = self.sessions.iter().position(|(s, _)| s == session) else {
            return Ok(false);
        };
        let windows = &mut self.sessions[pos].1;
        let Some(idx) = windows.iter().position(|w| w == window) else {
            return Ok(false);
        };
        windows.remove(idx);
        if windows.is_empty() {
            self.sessions.remove(pos);
        }
        Ok(true)
    }

    fn send_command(&mut self, session: &str, window: &str, command: &str) -> Result<()> {
        self.sent
            .push((session.to_string(), window.to_string(), command.to_string()));
        Ok(())
    }
}

/// Reporter that keeps every call.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub sessions: Vec<String>,
    pub windows: Vec<(String, String, Outcome)>,
}

impl Reporter for RecordingReporter {
    fn session(&mut self, name: &str) {
        self.sessions.push(name.to_string());
    }

    fn window(&mut self, window: &str, command: &str, outcome: &Outcome) {
        self.windows
            .push((window.to_string(), command.to_string(), outcome.clone()));
    }
}
