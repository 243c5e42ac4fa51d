//! envmatch CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use envmatch::cli::{Cli, CommandDispatcher};
use envmatch::config::find_project_root;
use envmatch::ui::{create_ui, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("envmatch=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("envmatch=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("envmatch starting with args: {:?}", cli);

    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    };

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    // --project wins; otherwise walk up from the working directory.
    let cwd = std::env::current_dir().unwrap_or_default();
    let project_root = cli
        .project
        .clone()
        .or_else(|| find_project_root(&cwd))
        .unwrap_or(cwd);

    let mut ui = create_ui(output_mode);
    let dispatcher = CommandDispatcher::new(project_root, cli.config.clone());

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.process_code()),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(2)
        }
    }
}
