//! Data model for the session config.
//!
//! A config is an ordered list of session blocks. Each block owns the window
//! intents declared under its `[name]` header, in source order.
//!
//! # Config Format
//!
//! ```text
//! # comment
//! [work]
//! workdir = ~/src/project
//! - editor = nvim .
//! - server = cargo watch -x run
//! + echo "server started"
//! ```

/// A window the config asks for, as seen at the moment it was declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowIntent {
    /// Session the window belongs to.
    pub session: String,
    /// Window name, unique target inside the session.
    pub name: String,
    /// Primary command sent to the window after it is created.
    pub command: String,
    /// Commands from `+` lines that follow the window definition.
    pub continuations: Vec<String>,
    /// Working directory of the session at declaration time.
    pub workdir: Option<String>,
}

impl WindowIntent {
    /// Create an intent with no continuations.
    pub fn new(
        session: impl Into<String>,
        name: impl Into<String>,
        command: impl Into<String>,
        workdir: Option<String>,
    ) -> Self {
        Self {
            session: session.into(),
            name: name.into(),
            command: command.into(),
            continuations: Vec::new(),
            workdir,
        }
    }
}

/// A `[name]` block and everything declared under it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionBlock {
    /// Session name from the header.
    pub name: String,
    /// Window intents in source order.
    pub windows: Vec<WindowIntent>,
    /// Value of the last `workdir` option seen in the block.
    pub workdir: Option<String>,
}

impl SessionBlock {
    /// Create an empty block.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Get a window intent by name. Returns the last one if the name repeats.
    pub fn window(&self, name: &str) -> Option<&WindowIntent> {
        self.windows.iter().rev().find(|w| w.name == name)
    }
}
