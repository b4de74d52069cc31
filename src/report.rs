//! Result line formatting.
//!
//! Every reconciled window produces one line:
//!
//! ```text
//! ✚ editor               nvim .
//! ↻ server               cargo watch -x run (restarted)
//! [failed]    logs                 tail -f /var/log/app.log (window creation failed)
//! ```
//!
//! The status marker comes from a [`Markers`] strategy chosen once at
//! startup, so formatting never inspects the output environment itself.

use crate::reconcile::Outcome;
use crate::settings::{ColorChoice, DisplaySettings};
use std::io::{IsTerminal, Write};

const ELLIPSIS: &str = "...";

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Strategy for rendering status markers and headings.
pub trait Markers {
    /// Marker printed at the start of a result line.
    fn marker(&self, outcome: &Outcome) -> String;

    /// Heading printed before a session's results.
    fn heading(&self, session: &str) -> String;
}

/// ANSI-colored symbols for capable terminals.
#[derive(Debug, Clone, Copy, Default)]
pub struct Glyphs;

impl Markers for Glyphs {
    fn marker(&self, outcome: &Outcome) -> String {
        let (color, glyph) = match outcome {
            Outcome::Created => (GREEN, "✚"),
            Outcome::Added => (GREEN, "+"),
            Outcome::Skipped => (DIM, "·"),
            Outcome::Restarted => (YELLOW, "↻"),
            Outcome::Failed(_) => (RED, "✗"),
        };
        format!("{}{}{}", color, glyph, RESET)
    }

    fn heading(&self, session: &str) -> String {
        format!("{}[{}]{}", BOLD, session, RESET)
    }
}

/// Bracketed text labels for pipes, logs and dumb terminals.
#[derive(Debug, Clone, Copy, Default)]
pub struct Labels;

impl Markers for Labels {
    fn marker(&self, outcome: &Outcome) -> String {
        let label = match outcome {
            Outcome::Created => "[created]",
            Outcome::Added => "[added]",
            Outcome::Skipped => "[skipped]",
            Outcome::Restarted => "[restarted]",
            Outcome::Failed(_) => "[failed]",
        };
        format!("{:<11}", label)
    }

    fn heading(&self, session: &str) -> String {
        format!("[{}]", session)
    }
}

/// Whether stdout can render colored glyphs.
///
/// Requires a terminal, no `NO_COLOR` and a `TERM` other than `dumb`.
pub fn stdout_supports_color() -> bool {
    std::io::stdout().is_terminal()
        && std::env::var_os("NO_COLOR").is_none()
        && std::env::var("TERM").map(|t| t != "dumb").unwrap_or(false)
}

/// Pick the marker strategy for a color setting.
pub fn markers_for(choice: ColorChoice) -> Box<dyn Markers> {
    let color = match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => stdout_supports_color(),
    };
    if color {
        Box::new(Glyphs)
    } else {
        Box::new(Labels)
    }
}

/// Shorten `text` to at most `max` characters, ending in `...` when cut.
///
/// Widths below three get as many dots as fit.
///
/// # Examples
///
/// ```
/// use muxfile::report::truncate;
///
/// assert_eq!(truncate("short", 10), "short");
/// assert_eq!(truncate("a very long command", 10), "a very ...");
/// ```
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max < ELLIPSIS.len() {
        return ELLIPSIS[..max].to_string();
    }
    let mut out: String = text.chars().take(max - ELLIPSIS.len()).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Build one result line.
pub fn format_line(
    markers: &dyn Markers,
    display: &DisplaySettings,
    window: &str,
    command: &str,
    outcome: &Outcome,
) -> String {
    let mut line = format!(
        "{} {:<width$} {}",
        markers.marker(outcome),
        window,
        truncate(command, display.command_width),
        width = display.name_width
    );
    if let Some(reason) = outcome.reason() {
        line.push_str(&format!(" ({})", reason));
    }
    line
}

/// Receives reconciliation results as they happen.
pub trait Reporter {
    /// A new session block begins.
    fn session(&mut self, name: &str);

    /// One window was reconciled.
    fn window(&mut self, window: &str, command: &str, outcome: &Outcome);
}

/// Reporter that writes formatted lines to a stream, normally stdout.
pub struct ConsoleReporter<W: Write> {
    out: W,
    markers: Box<dyn Markers>,
    display: DisplaySettings,
    pending_heading: Option<String>,
}

impl<W: Write> ConsoleReporter<W> {
    /// Create a reporter writing to `out`.
    pub fn new(out: W, markers: Box<dyn Markers>, display: DisplaySettings) -> Self {
        Self {
            out,
            markers,
            display,
            pending_heading: None,
        }
    }

    /// Write a free-form line, such as the run totals.
    pub fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            log::debug!("failed to write report line: {}", e);
        }
    }

    /// Consume the reporter and return the underlying stream.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn session(&mut self, name: &str) {
        // Printed lazily so empty sessions produce no heading.
        self.pending_heading = Some(self.markers.heading(name));
    }

    fn window(&mut self, window: &str, command: &str, outcome: &Outcome) {
        if let Some(heading) = self.pending_heading.take() {
            self.line(&heading);
        }
        let line = format_line(
            self.markers.as_ref(),
            &self.display,
            window,
            command,
            outcome,
        );
        self.line(&line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display() -> DisplaySettings {
        DisplaySettings {
            color: ColorChoice::Never,
            name_width: 8,
            command_width: 12,
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("exactly-12ch", 12), "exactly-12ch");
        assert_eq!(truncate("thirteen-char", 12), "thirteen-...");
        assert_eq!(truncate("héllo wörld!!", 8), "héllo...");
    }

    #[test]
    fn test_truncate_narrow_width_stays_within_limit() {
        assert_eq!(truncate("abcdef", 3), "...");
        assert_eq!(truncate("abcdef", 2), "..");
        assert_eq!(truncate("abcdef", 1), ".");
        assert_eq!(truncate("abcdef", 0), "");
        for max in 0..8 {
            assert!(truncate("a long command", max).chars().count() <= max);
        }
    }

    #[test]
    fn test_truncated_text_never_leaks() {
        let cmd = "tail -f /var/log/really/long/path/application.log";
        let line = format_line(&Labels, &display(), "logs", cmd, &Outcome::Added);
        assert!(!line.contains(cmd));
        assert!(line.ends_with("tail -f /..."));
    }

    #[test]
    fn test_format_line_labels() {
        let line = format_line(&Labels, &display(), "web", "npm start", &Outcome::Created);
        assert_eq!(line, "[created]   web      npm start");
    }

    #[test]
    fn test_format_line_reason_suffix() {
        let line = format_line(&Labels, &display(), "web", "npm start", &Outcome::Restarted);
        assert_eq!(line, "[restarted] web      npm start (restarted)");

        let failed = Outcome::Failed("window creation failed".into());
        let line = format_line(&Labels, &display(), "web", "npm start", &failed);
        assert!(line.starts_with("[failed]    web"));
        assert!(line.ends_with("(window creation failed)"));
    }

    #[test]
    fn test_glyphs_are_colored() {
        let marker = Glyphs.marker(&Outcome::Failed("x".into()));
        assert!(marker.contains('✗'));
        assert!(marker.starts_with(RED));
        assert!(marker.ends_with(RESET));
    }

    #[test]
    fn test_markers_for_explicit_choice() {
        let labels = markers_for(ColorChoice::Never);
        assert_eq!(labels.marker(&Outcome::Skipped).trim_end(), "[skipped]");
        let glyphs = markers_for(ColorChoice::Always);
        assert!(glyphs.marker(&Outcome::Skipped).contains('·'));
    }

    #[test]
    fn test_console_reporter_heading_once() {
        let mut reporter = ConsoleReporter::new(Vec::new(), Box::new(Labels), display());
        reporter.session("empty");
        reporter.session("dev");
        reporter.window("a", "ls", &Outcome::Created);
        reporter.window("b", "ls", &Outcome::Added);
        let out = String::from_utf8(reporter.into_inner()).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "[dev]");
        assert!(lines[1].starts_with("[created]"));
        assert!(lines[2].starts_with("[added]"));
    }
}
