//! Line classifier for the session config.
//!
//! Each raw line is stripped of comments and trailing whitespace, then
//! matched against four patterns in priority order:
//!
//! 1. `[name]` - session header
//! 2. `+ command` - continuation of the last window
//! 3. `- name = command` - window definition
//! 4. `key = value` - session option
//!
//! Anything else is [`Line::Unrecognized`]. The classifier has no state; what
//! a line means in context is decided by [`crate::provision::Provisioner`].

use crate::config::{SessionBlock, WindowIntent};
use regex::Regex;
use std::sync::LazyLock;

static SESSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([^\]]+)\]$").expect("SESSION_RE regex pattern is valid"));
static CONTINUATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+ +(.+)$").expect("CONTINUATION_RE regex pattern is valid"));
static WINDOW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^- ([^=]+)= *(.+)$").expect("WINDOW_RE regex pattern is valid"));
static OPTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^=]+)= ?(.+)$").expect("OPTION_RE regex pattern is valid"));

/// A classified, non-empty config line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// `[name]`
    Session(String),
    /// `+ command`
    Continuation(String),
    /// `- name = command`
    Window {
        /// Window name, trimmed.
        name: String,
        /// Command text after `=`.
        command: String,
    },
    /// `key = value`
    Option {
        /// Option key, trimmed.
        key: String,
        /// Option value, trimmed.
        value: String,
    },
    /// Content that matches no pattern.
    Unrecognized(String),
}

/// Remove a `#` comment and trailing whitespace.
///
/// `\#` is an escaped marker: it becomes a literal `#` and does not start a
/// comment.
///
/// # Examples
///
/// ```
/// use muxfile::parser::strip_comment;
///
/// assert_eq!(strip_comment("- a = ls   # list"), "- a = ls");
/// assert_eq!(strip_comment("- a = echo \\#1"), "- a = echo #1");
/// ```
pub fn strip_comment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'#') => {
                out.push('#');
                chars.next();
            }
            '#' => break,
            _ => out.push(c),
        }
    }
    out.truncate(out.trim_end().len());
    out
}

/// Classify a single raw line. Returns `None` for blank and comment-only lines.
pub fn parse_line(raw: &str) -> Option<Line> {
    let line = strip_comment(raw);
    if line.is_empty() {
        return None;
    }

    if let Some(caps) = SESSION_RE.captures(&line) {
        return Some(Line::Session(caps[1].to_string()));
    }
    if let Some(caps) = CONTINUATION_RE.captures(&line) {
        return Some(Line::Continuation(caps[1].to_string()));
    }
    if let Some(caps) = WINDOW_RE.captures(&line) {
        // Only the padding before `=` is dropped; leading spaces belong to the name.
        let name = caps[1].trim_end();
        if name.is_empty() {
            return Some(Line::Unrecognized(line));
        }
        return Some(Line::Window {
            name: name.to_string(),
            command: caps[2].to_string(),
        });
    }
    if let Some(caps) = OPTION_RE.captures(&line) {
        let key = caps[1].trim();
        let value = caps[2].trim();
        if !key.is_empty() && !value.is_empty() {
            return Some(Line::Option {
                key: key.to_string(),
                value: value.to_string(),
            });
        }
    }

    Some(Line::Unrecognized(line))
}

/// Classify every line of a config, yielding `(line_number, line)` pairs.
///
/// Line numbers are 1-based. Blank and comment-only lines are skipped.
pub fn lines(text: &str) -> impl Iterator<Item = (usize, Line)> + '_ {
    text.lines()
        .enumerate()
        .filter_map(|(i, raw)| parse_line(raw).map(|line| (i + 1, line)))
}

/// Materialize a whole config into session blocks.
///
/// Follows the same attachment rules as the streaming driver: options and
/// windows before the first header are dropped, continuations attach to the
/// most recent window of the current block, and unknown lines are ignored.
pub fn parse_blocks(text: &str) -> Vec<SessionBlock> {
    let mut blocks: Vec<SessionBlock> = Vec::new();

    for (_, line) in lines(text) {
        if let Line::Session(name) = line {
            blocks.push(SessionBlock::new(name));
            continue;
        }
        let Some(block) = blocks.last_mut() else {
            continue;
        };
        match line {
            Line::Option { key, value } if key == "workdir" => {
                block.workdir = Some(value);
            }
            Line::Window { name, command } => {
                let intent = WindowIntent::new(
                    block.name.clone(),
                    name,
                    command,
                    block.workdir.clone(),
                );
                block.windows.push(intent);
            }
            Line::Continuation(cmd) => {
                if let Some(window) = block.windows.last_mut() {
                    window.continuations.push(cmd);
                }
            }
            _ => {}
        }
    }

    blocks
}
