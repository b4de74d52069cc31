//! Streaming driver that turns config lines into tmux state.
//!
//! [`Provisioner`] consumes classified lines in source order and keeps the
//! state of the session block currently being read. Window lines are
//! reconciled immediately, so a later window observes everything earlier
//! windows changed (the first window of a new session creates it, the
//! second one is added to it).
//!
//! Config problems never abort a run. They are logged with `log::warn!` and
//! collected as [`Warning`]s in the [`RunSummary`].

use crate::config::WindowIntent;
use crate::parser::{self, Line};
use crate::reconcile::{self, Outcome};
use crate::report::Reporter;
use crate::tmux::Multiplexer;
use std::fmt;

/// Non-fatal config problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Option key other than `workdir`.
    UnknownOption {
        /// 1-based line number.
        line: usize,
        /// Session the option appeared in.
        session: String,
        /// The unknown key.
        key: String,
    },
    /// Line inside a session that matches no pattern.
    UnrecognizedLine {
        /// 1-based line number.
        line: usize,
        /// The line after comment stripping.
        text: String,
    },
    /// `+` line with no window to attach to.
    OrphanContinuation {
        /// 1-based line number.
        line: usize,
    },
    /// Session block without any window lines.
    EmptySession {
        /// Session name.
        name: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnknownOption { line, session, key } => write!(
                f,
                "line {}: unknown option '{}' in session '{}', ignored",
                line, key, session
            ),
            Warning::UnrecognizedLine { line, text } => {
                write!(f, "line {}: unrecognized line, ignored: {}", line, text)
            }
            Warning::OrphanContinuation { line } => write!(
                f,
                "line {}: continuation without a preceding window, ignored",
                line
            ),
            Warning::EmptySession { name } => write!(f, "session '{}' has no windows", name),
        }
    }
}

/// State of the session block being read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Session name from the header.
    pub name: String,
    /// Working directory for windows declared from here on.
    pub workdir: Option<String>,
    /// Windows reconciled without failure.
    pub windows: usize,
    /// Window lines seen, whatever their outcome.
    pub declared: usize,
    /// Last window that reconciled without failure.
    pub last_window: Option<String>,
    /// Set when the last window was skipped or failed; continuations are
    /// dropped while it is set.
    pub last_window_skipped: bool,
}

impl SessionState {
    /// Fresh state for a new `[name]` block.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Per-session totals recorded when a block is flushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Session name.
    pub name: String,
    /// Window lines in the block.
    pub declared: usize,
    /// Windows reconciled without failure.
    pub windows: usize,
}

/// Outcome of one window, kept for the run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowResult {
    /// Session name.
    pub session: String,
    /// Window name.
    pub window: String,
    /// What happened.
    pub outcome: Outcome,
}

/// Everything a run produced besides tmux side effects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Flushed sessions in source order.
    pub sessions: Vec<SessionSummary>,
    /// Window outcomes in source order.
    pub results: Vec<WindowResult>,
    /// Config warnings in source order.
    pub warnings: Vec<Warning>,
}

impl RunSummary {
    /// Summary for a session by name. Returns the last one if the name repeats.
    pub fn session(&self, name: &str) -> Option<&SessionSummary> {
        self.sessions.iter().rev().find(|s| s.name == name)
    }

    /// Outcomes of every window named `window` in `session`.
    pub fn outcomes(&self, session: &str, window: &str) -> Vec<&Outcome> {
        self.results
            .iter()
            .filter(|r| r.session == session && r.window == window)
            .map(|r| &r.outcome)
            .collect()
    }

    /// Number of results matching a predicate.
    pub fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.outcome)).count()
    }

    /// One-line totals, e.g. `2 created, 0 added, 1 skipped, 0 restarted, 0 failed`.
    pub fn totals_line(&self) -> String {
        format!(
            "{} created, {} added, {} skipped, {} restarted, {} failed",
            self.count(|o| *o == Outcome::Created),
            self.count(|o| *o == Outcome::Added),
            self.count(|o| *o == Outcome::Skipped),
            self.count(|o| *o == Outcome::Restarted),
            self.count(Outcome::is_failed),
        )
    }
}

/// Stateful driver for one run.
pub struct Provisioner<'a, M: Multiplexer, R: Reporter + ?Sized> {
    mux: &'a mut M,
    reporter: &'a mut R,
    restart: bool,
    current: Option<SessionState>,
    summary: RunSummary,
}

impl<'a, M: Multiplexer, R: Reporter + ?Sized> Provisioner<'a, M, R> {
    /// Create a driver. `restart` applies to every window of the run.
    pub fn new(mux: &'a mut M, reporter: &'a mut R, restart: bool) -> Self {
        Self {
            mux,
            reporter,
            restart,
            current: None,
            summary: RunSummary::default(),
        }
    }

    /// State of the session block being read, if any.
    pub fn current(&self) -> Option<&SessionState> {
        self.current.as_ref()
    }

    /// Feed every line of a config.
    pub fn run(&mut self, text: &str) {
        for (number, line) in parser::lines(text) {
            self.feed(number, line);
        }
    }

    /// Handle one classified line.
    pub fn feed(&mut self, number: usize, line: Line) {
        match line {
            Line::Session(name) => self.start_session(name),
            Line::Continuation(command) => self.continuation(number, &command),
            Line::Window { name, command } => self.window(name, command),
            Line::Option { key, value } => self.option(number, key, value),
            Line::Unrecognized(text) => {
                if self.current.is_some() {
                    self.warn(Warning::UnrecognizedLine { line: number, text });
                }
            }
        }
    }

    /// Flush the last session and return the summary.
    pub fn finish(mut self) -> RunSummary {
        self.flush();
        self.summary
    }

    fn start_session(&mut self, name: String) {
        self.flush();
        self.reporter.session(&name);
        self.current = Some(SessionState::new(name));
    }

    fn flush(&mut self) {
        let Some(state) = self.current.take() else {
            return;
        };
        if state.declared == 0 {
            self.warn(Warning::EmptySession {
                name: state.name.clone(),
            });
        }
        self.summary.sessions.push(SessionSummary {
            name: state.name,
            declared: state.declared,
            windows: state.windows,
        });
    }

    fn option(&mut self, number: usize, key: String, value: String) {
        let Some(state) = self.current.as_mut() else {
            return;
        };
        if key == "workdir" {
            state.workdir = Some(value);
        } else {
            let session = state.name.clone();
            self.warn(Warning::UnknownOption {
                line: number,
                session,
                key,
            });
        }
    }

    fn window(&mut self, name: String, command: String) {
        let Some(state) = self.current.as_mut() else {
            return;
        };
        state.declared += 1;
        let intent = WindowIntent::new(state.name.clone(), name, command, state.workdir.clone());

        let outcome = reconcile::reconcile(self.mux, &intent, self.restart);
        self.reporter.window(&intent.name, &intent.command, &outcome);

        if !outcome.is_failed() {
            state.windows += 1;
            state.last_window = Some(intent.name.clone());
        }
        state.last_window_skipped = outcome.blocks_continuations();

        self.summary.results.push(WindowResult {
            session: intent.session,
            window: intent.name,
            outcome,
        });
    }

    fn continuation(&mut self, number: usize, command: &str) {
        let Some(state) = self.current.as_ref() else {
            self.warn(Warning::OrphanContinuation { line: number });
            return;
        };
        if state.last_window_skipped {
            log::debug!("line {}: window not touched, continuation dropped", number);
            return;
        }
        match state.last_window.as_deref() {
            Some(window) => reconcile::deliver(self.mux, &state.name, window, command),
            None => self.warn(Warning::OrphanContinuation { line: number }),
        }
    }

    fn warn(&mut self, warning: Warning) {
        log::warn!("{}", warning);
        self.summary.warnings.push(warning);
    }
}

/// Provision every session in `text` and return the run summary.
pub fn provision<M: Multiplexer, R: Reporter + ?Sized>(
    mux: &mut M,
    reporter: &mut R,
    text: &str,
    restart: bool,
) -> RunSummary {
    let mut provisioner = Provisioner::new(mux, reporter, restart);
    provisioner.run(text);
    provisioner.finish()
}
