//! `muxfile-ls`: print every tmux session and its windows.
//!
//! The active window of each session is marked with `*`.

use muxfile::error::Result;
use muxfile::{list, loader, Tmux};

fn main() {
    muxfile::init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let settings = loader::load_default_settings()?;
    let tmux = Tmux::new(settings.tmux.binary);
    let windows = tmux.list_all_windows()?;
    print!("{}", list::render(&windows));
    Ok(())
}
