//! Per-window reconciliation.
//!
//! Each declared window is compared against live tmux state and exactly one
//! [`Action`] is chosen:
//!
//! | session exists | window exists | restart | action |
//! |---|---|---|---|
//! | no  | -   | -   | [`Action::Create`] |
//! | yes | no  | -   | [`Action::Add`] |
//! | yes | yes | no  | [`Action::Skip`] |
//! | yes | yes | yes | [`Action::Restart`] |
//!
//! Mutations are verified by probing for the window afterwards; the exit
//! status of the mutating tmux call is only logged.

use crate::config::WindowIntent;
use crate::error::Result;
use crate::tmux::Multiplexer;

/// What to do with one declared window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Create the session with this window as its first window.
    Create,
    /// Add the window to an existing session.
    Add,
    /// Leave the existing window alone.
    Skip,
    /// Kill the existing window and create it again.
    Restart,
}

impl Action {
    /// Pick the action for the probed state. `window_exists` is ignored when
    /// the session does not exist.
    pub fn decide(session_exists: bool, window_exists: bool, restart: bool) -> Self {
        match (session_exists, window_exists, restart) {
            (false, _, _) => Action::Create,
            (true, false, _) => Action::Add,
            (true, true, false) => Action::Skip,
            (true, true, true) => Action::Restart,
        }
    }

    /// The tmux change this action makes, or `None` for [`Action::Skip`].
    pub fn mutation(self) -> Option<Mutation> {
        match self {
            Action::Create => Some(Mutation::Create),
            Action::Add => Some(Mutation::Add),
            Action::Skip => None,
            Action::Restart => Some(Mutation::Restart),
        }
    }
}

/// An [`Action`] that changes tmux state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// `new-session` with the window as its first window.
    Create,
    /// `new-window` in the existing session.
    Add,
    /// `kill-window`, then recreate.
    Restart,
}

impl Mutation {
    /// Reason reported when the window is missing after this mutation.
    pub fn failure_reason(self) -> &'static str {
        match self {
            Mutation::Create => "session creation failed",
            Mutation::Add => "window creation failed",
            Mutation::Restart => "restart failed",
        }
    }

    fn outcome(self) -> Outcome {
        match self {
            Mutation::Create => Outcome::Created,
            Mutation::Add => Outcome::Added,
            Mutation::Restart => Outcome::Restarted,
        }
    }
}

/// Result of reconciling one window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A new session was created with this window.
    Created,
    /// The window was added to an existing session.
    Added,
    /// The window already existed and was left untouched.
    Skipped,
    /// The window existed and was killed and recreated.
    Restarted,
    /// The action could not be carried out.
    Failed(String),
}

impl Outcome {
    /// Whether the action failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    /// Whether continuation commands must not be sent to this window.
    pub fn blocks_continuations(&self) -> bool {
        matches!(self, Outcome::Skipped | Outcome::Failed(_))
    }

    /// Parenthesized detail shown after the command, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Outcome::Restarted => Some("restarted"),
            Outcome::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Reconcile one window against live state and drive tmux accordingly.
///
/// On success the window receives `cd <workdir>` (when set), its primary
/// command, then any continuations already attached to `intent`, in that
/// order. A skipped or failed window receives nothing.
pub fn reconcile<M: Multiplexer>(mux: &mut M, intent: &WindowIntent, restart: bool) -> Outcome {
    let action = match probe(mux, intent, restart) {
        Ok(action) => action,
        Err(e) => return Outcome::Failed(e.to_string()),
    };
    log::debug!("{}:{} -> {:?}", intent.session, intent.name, action);

    let Some(mutation) = action.mutation() else {
        return Outcome::Skipped;
    };

    if let Err(e) = execute(mux, mutation, intent) {
        return Outcome::Failed(e.to_string());
    }

    match mux.window_exists(&intent.session, &intent.name) {
        Ok(true) => {}
        Ok(false) => return Outcome::Failed(mutation.failure_reason().to_string()),
        Err(e) => return Outcome::Failed(e.to_string()),
    }

    let (session, window) = (intent.session.as_str(), intent.name.as_str());
    if let Some(dir) = intent.workdir.as_deref().filter(|d| !d.is_empty()) {
        deliver(mux, session, window, &format!("cd {}", dir));
    }
    deliver(mux, session, window, &intent.command);
    for cmd in &intent.continuations {
        deliver(mux, session, window, cmd);
    }

    mutation.outcome()
}

fn probe<M: Multiplexer>(mux: &M, intent: &WindowIntent, restart: bool) -> Result<Action> {
    let session_exists = mux.session_exists(&intent.session)?;
    let window_exists = session_exists && mux.window_exists(&intent.session, &intent.name)?;
    Ok(Action::decide(session_exists, window_exists, restart))
}

fn execute<M: Multiplexer>(mux: &mut M, mutation: Mutation, intent: &WindowIntent) -> Result<()> {
    let (session, window) = (intent.session.as_str(), intent.name.as_str());
    let reported = match mutation {
        Mutation::Create => mux.create_session(session, window)?,
        Mutation::Add => mux.create_window(session, window)?,
        Mutation::Restart => {
            mux.kill_window(session, window)?;
            // Killing the last window destroys the session.
            if mux.session_exists(session)? {
                mux.create_window(session, window)?
            } else {
                mux.create_session(session, window)?
            }
        }
    };
    if !reported {
        log::debug!("{:?} of {}:{} reported failure, verifying", mutation, session, window);
    }
    Ok(())
}

/// Send one command to `session:window`, logging a warning on failure.
pub fn deliver<M: Multiplexer>(mux: &mut M, session: &str, window: &str, command: &str) {
    if let Err(e) = mux.send_command(session, window, command) {
        log::warn!("could not send command to {}:{}: {}", session, window, e);
    }
}
