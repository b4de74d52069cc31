//! Read-only listing of live sessions and windows.
//!
//! Used by the `muxfile-ls` binary. Windows are grouped by session in the
//! order tmux reports them, and each session's active window is marked.

use crate::tmux::WindowInfo;

/// Printed when tmux reports no windows at all.
pub const NO_SESSIONS: &str = "No tmux sessions running.";

const ACTIVE_MARKER: &str = "*";

/// Group windows by session, keeping first-seen session order.
pub fn group_by_session(windows: &[WindowInfo]) -> Vec<(&str, Vec<&WindowInfo>)> {
    let mut groups: Vec<(&str, Vec<&WindowInfo>)> = Vec::new();
    for window in windows {
        match groups.iter_mut().find(|(name, _)| *name == window.session) {
            Some((_, list)) => list.push(window),
            None => groups.push((window.session.as_str(), vec![window])),
        }
    }
    groups
}

/// Render the session table.
///
/// # Examples
///
/// ```
/// use muxfile::list::render;
///
/// assert_eq!(render(&[]), "No tmux sessions running.\n");
/// ```
pub fn render(windows: &[WindowInfo]) -> String {
    if windows.is_empty() {
        return format!("{}\n", NO_SESSIONS);
    }

    let index_width = windows
        .iter()
        .map(|w| w.index.to_string().len())
        .max()
        .unwrap_or(1);

    let mut out = String::new();
    for (session, list) in group_by_session(windows) {
        out.push_str(session);
        out.push('\n');
        for w in list {
            let marker = if w.active { ACTIVE_MARKER } else { " " };
            out.push_str(&format!(
                "  {} {:>width$}  {}\n",
                marker,
                w.index,
                w.name,
                width = index_width
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn win(session: &str, index: u32, name: &str, active: bool) -> WindowInfo {
        WindowInfo {
            session: session.into(),
            index,
            name: name.into(),
            active,
        }
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&[]), "No tmux sessions running.\n");
    }

    #[test]
    fn test_render_groups_and_marks_active() {
        let windows = vec![
            win("dev", 0, "editor", false),
            win("dev", 1, "server", true),
            win("ops", 10, "logs", true),
        ];
        let expected = "\
dev
     0  editor
  *  1  server
ops
  * 10  logs
";
        assert_eq!(render(&windows), expected);
    }

    #[test]
    fn test_group_by_session_keeps_order() {
        let windows = vec![
            win("b", 0, "x", true),
            win("a", 0, "y", true),
            win("b", 1, "z", false),
        ];
        let groups = group_by_session(&windows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "b");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "a");
    }
}
