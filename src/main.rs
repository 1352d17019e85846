use clap::Parser;
use std::process::ExitCode;
use topo::cli::{Cli, Commands};
use topo::cli_handlers;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Diagnostics go to stderr so stdout stays a clean ordering.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result = match &cli.command {
        Commands::Sort { input, tie_break } => cli_handlers::handle_sort(config, input, *tie_break),
        Commands::Check { input } => cli_handlers::handle_check(config, input),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}
