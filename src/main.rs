//! github-commit-status-mark entry point.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use github_commit_status_mark::cli::{self, Cli};
use github_commit_status_mark::ui::format_error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
///
/// Logs go to stderr; stdout carries only the mark.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("github_commit_status_mark=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("github_commit_status_mark=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("Starting with args: {:?}", cli);

    if let Some(shell) = cli.completions {
        cli::write_completions(shell, &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    match cli::run(&cli) {
        Ok(mark) => {
            let mut stdout = std::io::stdout();
            if let Err(e) = write!(stdout, "{}", mark).and_then(|_| stdout.flush()) {
                eprintln!("{}", format_error(&e.to_string()));
                return ExitCode::from(1);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            ExitCode::from(1)
        }
    }
}
