//! Muxfile CLI entry point.
//!
//! This binary provides the `muxfile` command for provisioning tmux sessions
//! and windows from a session config.

use clap::Parser;
use muxfile::cli::Cli;
use muxfile::error::Result;
use muxfile::report::{self, ConsoleReporter};
use muxfile::{loader, provision, Tmux};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // Usage errors exit 1 rather than clap's 2.
        Err(e) if e.use_stderr() => {
            eprint!("{}", e);
            std::process::exit(1);
        }
        // Help and version print to stdout and exit 0.
        Err(e) => e.exit(),
    };

    muxfile::init_logging();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic.
///
/// Window failures are reported per line and do not fail the run.
fn run(cli: &Cli) -> Result<()> {
    let text = loader::load_config(&cli.config)?;
    let settings = loader::load_default_settings()?;

    let mut tmux = Tmux::new(settings.tmux.binary.as_str());
    let markers = report::markers_for(settings.display.color);
    let mut reporter = ConsoleReporter::new(std::io::stdout(), markers, settings.display);

    let summary = provision::provision(&mut tmux, &mut reporter, &text, cli.restart);

    if !summary.results.is_empty() {
        reporter.line("");
        reporter.line(&summary.totals_line());
    }

    Ok(())
}
